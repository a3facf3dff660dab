// src/handlers/events.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    db::events_repo::{NewEvent, NewPricing},
    models::events::{EventStatus, EventWithPricing},
};

fn validate_not_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("The value cannot be negative.".into());
        return Err(err);
    }
    Ok(())
}

fn default_status() -> EventStatus {
    EventStatus::Planned
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsPayload {
    #[validate(required(message = "The 'jointId' field is required."))]
    pub joint_id: Option<Uuid>,

    pub event_ts: DateTime<Utc>,

    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub location_note: Option<String>,

    #[serde(default = "default_status")]
    pub status: EventStatus,

    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPricingPayload {
    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub coconut_qty: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub coconut_unit_price: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub delivery_fee: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub opening_fee: Decimal,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub other_fee: Decimal,

    pub other_fee_note: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEventPayload {
    #[validate(nested)]
    pub event: EventDetailsPayload,

    #[validate(nested)]
    pub pricing: EventPricingPayload,
}

// POST /api/events
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    request_body = ScheduleEventPayload,
    responses(
        (status = 201, description = "Event scheduled with its pricing", body = EventWithPricing),
        (status = 404, description = "Joint does not resolve")
    )
)]
pub async fn schedule_event(
    State(app_state): State<AppState>,
    Json(payload): Json<ScheduleEventPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = NewEvent {
        joint_id: payload.event.joint_id.unwrap(),
        event_ts: payload.event.event_ts,
        customer_name: payload.event.customer_name.as_deref(),
        customer_phone: payload.event.customer_phone.as_deref(),
        location_note: payload.event.location_note.as_deref(),
        status: payload.event.status,
        note: payload.event.note.as_deref(),
    };
    let pricing = NewPricing {
        coconut_qty: payload.pricing.coconut_qty,
        coconut_unit_price: payload.pricing.coconut_unit_price,
        delivery_fee: payload.pricing.delivery_fee,
        opening_fee: payload.pricing.opening_fee,
        other_fee: payload.pricing.other_fee,
        other_fee_note: payload.pricing.other_fee_note.as_deref(),
    };

    let created = app_state.events_service.schedule_event(event, pricing).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses(
        (status = 200, description = "All events soonest first, pricing and quoted totals attached", body = Vec<EventWithPricing>)
    )
)]
pub async fn list_events(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let events = app_state.events_service.list_events().await?;
    Ok((StatusCode::OK, Json(events)))
}
