use crate::errors::AppError;
use crate::export::{export_csv, export_filename};
use crate::models::{
    CandidatesResponse, DateQuery, DayPlan, DayResponse, DuplicateRequest, OkResponse,
    PlannedRequest, RecordPatch, SaveDayRequest,
};
use crate::plan::{clamp_planned, day_totals, normalize};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, header},
    response::{Html, IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use tracing::info;

/// Largest planned count accepted over HTTP. Requests past it are refused
/// instead of being stored with a huge tick vector.
pub const MAX_PLANNED_PER_REQUEST: u32 = 1000;

pub async fn index() -> Html<String> {
    Html(render_index(&today_string()))
}

/// `GET` reads a day, `PUT`/`POST` replace it.
pub async fn day(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<DateQuery>,
    body: Bytes,
) -> Result<Response, AppError> {
    let date = require_date(query)?;

    match method {
        Method::GET => {
            let list = state.store.get_day(&date).await?;
            Ok(Json(to_response(date, list)).into_response())
        }
        Method::PUT | Method::POST => {
            let request: SaveDayRequest = serde_json::from_slice(&body)
                .map_err(|err| AppError::bad_request(format!("invalid body: {err}")))?;
            let list = request.into_plan();
            if let Some(record) = list
                .iter()
                .find(|record| record.planned > MAX_PLANNED_PER_REQUEST)
            {
                return Err(planned_too_large(record.planned));
            }
            let list = normalize(list);
            info!(date = %date, records = list.len(), "replacing day");
            state.store.set_day(&date, list).await?;
            Ok(Json(OkResponse { ok: true }).into_response())
        }
        _ => Err(AppError::method_not_allowed()),
    }
}

pub async fn add_record(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = require_date(query)?;
    let list = state.store.add_record(&date).await?;
    Ok(Json(to_response(date, list)))
}

pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
    Json(patch): Json<RecordPatch>,
) -> Result<Json<DayResponse>, AppError> {
    let date = require_date(query)?;
    let list = state.store.update_fields(&date, &id, &patch).await?;
    Ok(Json(to_response(date, list)))
}

pub async fn remove_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = require_date(query)?;
    let list = state.store.remove_record(&date, &id).await?;
    Ok(Json(to_response(date, list)))
}

pub async fn set_planned(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DateQuery>,
    Json(payload): Json<PlannedRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date = require_date(query)?;
    let planned = clamp_planned(&payload.planned);
    if planned > MAX_PLANNED_PER_REQUEST {
        return Err(planned_too_large(planned));
    }
    let list = state.store.set_planned(&date, &id, planned).await?;
    Ok(Json(to_response(date, list)))
}

pub async fn toggle_tick(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = require_date(query)?;
    match state.store.toggle_tick(&date, &id, index).await? {
        Some(list) => Ok(Json(to_response(date, list))),
        None => Err(AppError::bad_request(format!(
            "record {id} has no delivery {index}"
        ))),
    }
}

pub async fn duplicate(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
    Json(payload): Json<DuplicateRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date = require_date(query)?;
    let source = parse_date(&payload.from)?;
    let list = match state.store.duplicate_from(&date, &source).await? {
        Some(list) => list,
        None => state.store.get_day(&date).await?,
    };
    Ok(Json(to_response(date, list)))
}

pub async fn candidates(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CandidatesResponse>, AppError> {
    let date = require_date(query)?;
    let candidates = state.store.duplicate_candidates(&date).await?;
    Ok(Json(CandidatesResponse { date, candidates }))
}

pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Response, AppError> {
    let date = require_date(query)?;
    let list = state.store.get_day(&date).await?;
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&date));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export_csv(&date, &list),
    )
        .into_response())
}

fn planned_too_large(planned: u32) -> AppError {
    AppError::bad_request(format!(
        "planned {planned} exceeds the limit of {MAX_PLANNED_PER_REQUEST}"
    ))
}

fn require_date(query: DateQuery) -> Result<String, AppError> {
    match query.date {
        Some(date) if !date.trim().is_empty() => parse_date(&date),
        _ => Err(AppError::bad_request("date required")),
    }
}

fn parse_date(raw: &str) -> Result<String, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))
}

fn to_response(date: String, list: DayPlan) -> DayResponse {
    DayResponse {
        totals: day_totals(&list),
        date,
        list,
    }
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
