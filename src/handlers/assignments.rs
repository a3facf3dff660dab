// src/handlers/assignments.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, models::assignments::AssignedSeller,
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ActiveAssignmentsQuery {
    /// Restrict to one joint; all joints when absent.
    pub joint_id: Option<Uuid>,
    /// Reference time; defaults to now.
    pub as_of: Option<DateTime<Utc>>,
}

// GET /api/assignments/active
#[utoipa::path(
    get,
    path = "/api/assignments/active",
    tag = "Assignments",
    params(ActiveAssignmentsQuery),
    responses(
        (status = 200, description = "Sellers currently authorized, newest start first", body = Vec<AssignedSeller>)
    )
)]
pub async fn get_active_assignments(
    State(app_state): State<AppState>,
    Query(query): Query<ActiveAssignmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bindings = app_state
        .assignment_service
        .resolve_active(query.joint_id, query.as_of)
        .await?;
    Ok((StatusCode::OK, Json(bindings)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignSellerPayload {
    #[validate(required(message = "The 'sellerId' field is required."))]
    pub seller_id: Option<Uuid>,

    #[validate(required(message = "The 'jointId' field is required."))]
    pub joint_id: Option<Uuid>,

    pub note: Option<String>,
}

// POST /api/assignments
#[utoipa::path(
    post,
    path = "/api/assignments",
    tag = "Assignments",
    request_body = AssignSellerPayload,
    responses(
        (status = 201, description = "Seller reassigned; the previous open window was closed", body = AssignedSeller),
        (status = 404, description = "Seller or joint does not resolve to an active entity")
    )
)]
pub async fn assign_seller(
    State(app_state): State<AppState>,
    Json(payload): Json<AssignSellerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let binding = app_state
        .assignment_service
        .assign(
            payload.seller_id.unwrap(),
            payload.joint_id.unwrap(),
            payload.note.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(binding)))
}
