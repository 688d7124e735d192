pub mod app;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod kv;
pub mod models;
pub mod plan;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::{Backend, Settings};
pub use state::AppState;
pub use store::{DayStore, PlanningStore};
