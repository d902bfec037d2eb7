//! Daily report API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::daily_report::{CreateDailyReport, DailyReport, UpdateDailyReport},
};

/// List all daily reports, newest date first
#[utoipa::path(
    get,
    path = "/daily-reports",
    tag = "daily-reports",
    responses(
        (status = 200, description = "Daily reports list", body = Vec<DailyReport>)
    )
)]
pub async fn list_daily_reports(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<DailyReport>>> {
    let reports = state.repository.daily_reports.list().await?;
    Ok(Json(reports))
}

/// Get a daily report by ID
#[utoipa::path(
    get,
    path = "/daily-reports/{id}",
    tag = "daily-reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report details", body = DailyReport),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_daily_report(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DailyReport>> {
    let report = state.repository.daily_reports.get(id).await?;
    Ok(Json(report))
}

/// Create a daily report (at most one per calendar date)
#[utoipa::path(
    post,
    path = "/daily-reports",
    tag = "daily-reports",
    request_body = CreateDailyReport,
    responses(
        (status = 201, description = "Report created", body = DailyReport),
        (status = 400, description = "Report already exists for this date", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_daily_report(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateDailyReport>,
) -> AppResult<(StatusCode, Json<DailyReport>)> {
    let report = state.repository.daily_reports.create(data).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Apply a partial update to a daily report
#[utoipa::path(
    put,
    path = "/daily-reports/{id}",
    tag = "daily-reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateDailyReport,
    responses(
        (status = 200, description = "Report updated", body = DailyReport),
        (status = 400, description = "No fields to update", body = crate::error::ErrorResponse),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_daily_report(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateDailyReport>,
) -> AppResult<Json<DailyReport>> {
    let report = state.repository.daily_reports.update(id, &data).await?;
    Ok(Json(report))
}

/// Delete a daily report
#[utoipa::path(
    delete,
    path = "/daily-reports/{id}",
    tag = "daily-reports",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 204, description = "Report deleted"),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_daily_report(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.repository.daily_reports.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
