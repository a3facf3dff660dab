// src/handlers/stock.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::ledger::{Allocation, Delivery},
};

// ---
// Custom validation
// ---
pub(crate) fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("The value must be greater than zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordDeliveryPayload {
    #[validate(required(message = "The 'jointId' field is required."))]
    pub joint_id: Option<Uuid>,

    pub supplier_id: Option<Uuid>,

    #[validate(custom(function = "validate_positive"))]
    pub qty: Decimal,

    pub note: Option<String>,
}

// POST /api/stock/deliveries
#[utoipa::path(
    post,
    path = "/api/stock/deliveries",
    tag = "Stock",
    request_body = RecordDeliveryPayload,
    responses(
        (status = 201, description = "Delivery recorded", body = Delivery),
        (status = 400, description = "Non-positive quantity"),
        (status = 404, description = "Joint does not resolve")
    )
)]
pub async fn record_delivery(
    State(app_state): State<AppState>,
    Json(payload): Json<RecordDeliveryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let delivery = app_state
        .ledger_service
        .record_delivery(
            payload.joint_id.unwrap(),
            payload.supplier_id,
            payload.qty,
            payload.note.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(delivery)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAllocationPayload {
    #[validate(required(message = "The 'jointId' field is required."))]
    pub joint_id: Option<Uuid>,

    #[validate(required(message = "The 'sellerId' field is required."))]
    pub seller_id: Option<Uuid>,

    #[validate(custom(function = "validate_positive"))]
    pub qty_basis: Decimal,

    pub note: Option<String>,
}

// POST /api/stock/allocations
#[utoipa::path(
    post,
    path = "/api/stock/allocations",
    tag = "Stock",
    request_body = RecordAllocationPayload,
    responses(
        (status = 201, description = "Allocation recorded", body = Allocation),
        (status = 400, description = "Non-positive quantity"),
        (status = 404, description = "Joint, or the seller's assignment at it, does not resolve")
    )
)]
pub async fn record_allocation(
    State(app_state): State<AppState>,
    Json(payload): Json<RecordAllocationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let allocation = app_state
        .ledger_service
        .record_allocation(
            payload.joint_id.unwrap(),
            payload.seller_id.unwrap(),
            payload.qty_basis,
            payload.note.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(allocation)))
}
