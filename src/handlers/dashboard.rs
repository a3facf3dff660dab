// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{dashboard::DashboardMetrics, events::ScheduledEvent},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MetricsQuery {
    /// Restrict to one joint; all joints when absent.
    pub joint_id: Option<Uuid>,
    /// Rows fetched per stream; defaults to 5.
    pub window: Option<i64>,
}

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    params(MetricsQuery),
    responses(
        (status = 200, description = "Windowed stock/owed figures and the recent-activity feed", body = DashboardMetrics)
    )
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state
        .ledger_service
        .compute_balances(query.joint_id, query.window)
        .await?;
    Ok((StatusCode::OK, Json(metrics)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UpcomingQuery {
    pub joint_id: Option<Uuid>,
    /// How far ahead to look; defaults to 7 days.
    pub horizon_days: Option<i64>,
}

// GET /api/dashboard/upcoming
#[utoipa::path(
    get,
    path = "/api/dashboard/upcoming",
    tag = "Dashboard",
    params(UpcomingQuery),
    responses(
        (status = 200, description = "Scheduled events inside the horizon, soonest first", body = Vec<ScheduledEvent>)
    )
)]
pub async fn get_upcoming(
    State(app_state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let events = app_state
        .events_service
        .compute_upcoming(query.joint_id, query.horizon_days)
        .await?;
    Ok((StatusCode::OK, Json(events)))
}
