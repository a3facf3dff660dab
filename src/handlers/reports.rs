// src/handlers/reports.rs
//
// Payments and audits: the two report streams, plus their write paths.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::stock::validate_positive,
    models::ledger::{Audit, Payment, PaymentReportEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportFilterQuery {
    pub joint_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentPayload {
    #[validate(required(message = "The 'jointId' field is required."))]
    pub joint_id: Option<Uuid>,

    #[validate(required(message = "The 'sellerId' field is required."))]
    pub seller_id: Option<Uuid>,

    #[validate(custom(function = "validate_positive"))]
    pub amount_ghs: Decimal,

    pub note: Option<String>,

    #[validate(length(min = 4, message = "The seller PIN is required."))]
    pub seller_pin: String,
}

// POST /api/payments/confirm
#[utoipa::path(
    post,
    path = "/api/payments/confirm",
    tag = "Reports",
    request_body = ConfirmPaymentPayload,
    responses(
        (status = 201, description = "Payment recorded, confirmed by seller PIN", body = Payment),
        (status = 400, description = "Non-positive amount or missing PIN"),
        (status = 500, description = "PIN rejected by the store procedure")
    )
)]
pub async fn confirm_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<ConfirmPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let payment = app_state
        .ledger_service
        .confirm_payment(
            payload.joint_id.unwrap(),
            payload.seller_id.unwrap(),
            payload.amount_ghs,
            payload.note.as_deref(),
            &payload.seller_pin,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Reports",
    params(ReportFilterQuery),
    responses(
        (status = 200, description = "Payments newest first, with basis-unit equivalents", body = Vec<PaymentReportEntry>)
    )
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    Query(query): Query<ReportFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .ledger_service
        .list_payments(query.joint_id, query.seller_id)
        .await?;
    Ok((StatusCode::OK, Json(payments)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAuditPayload {
    #[validate(required(message = "The 'jointId' field is required."))]
    pub joint_id: Option<Uuid>,

    pub seller_id: Option<Uuid>,

    pub counted_qty: Decimal,

    pub note: Option<String>,
}

// POST /api/audits
#[utoipa::path(
    post,
    path = "/api/audits",
    tag = "Reports",
    request_body = RecordAuditPayload,
    responses(
        (status = 201, description = "Count snapshot recorded", body = Audit),
        (status = 400, description = "Negative counted quantity")
    )
)]
pub async fn record_audit(
    State(app_state): State<AppState>,
    Json(payload): Json<RecordAuditPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let audit = app_state
        .ledger_service
        .record_audit(
            payload.joint_id.unwrap(),
            payload.seller_id,
            payload.counted_qty,
            payload.note.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(audit)))
}

// GET /api/audits
#[utoipa::path(
    get,
    path = "/api/audits",
    tag = "Reports",
    params(ReportFilterQuery),
    responses(
        (status = 200, description = "Count snapshots newest first", body = Vec<Audit>)
    )
)]
pub async fn list_audits(
    State(app_state): State<AppState>,
    Query(query): Query<ReportFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let audits = app_state
        .ledger_service
        .list_audits(query.joint_id, query.seller_id)
        .await?;
    Ok((StatusCode::OK, Json(audits)))
}
