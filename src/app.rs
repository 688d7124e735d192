use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{any, get, patch, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/day", any(handlers::day))
        .route("/api/day/records", post(handlers::add_record))
        .route(
            "/api/day/records/:id",
            patch(handlers::update_record).delete(handlers::remove_record),
        )
        .route("/api/day/records/:id/planned", put(handlers::set_planned))
        .route(
            "/api/day/records/:id/ticks/:index",
            post(handlers::toggle_tick),
        )
        .route("/api/day/duplicate", post(handlers::duplicate))
        .route("/api/day/candidates", get(handlers::candidates))
        .route("/api/day/export", get(handlers::export))
        .with_state(state)
}
