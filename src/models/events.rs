// src/models/events.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Planned,
    Confirmed,
    Done,
    Cancelled,
}

// --- Scheduled customer event ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: Uuid,
    pub joint_id: Uuid,
    pub event_ts: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub location_note: Option<String>,
    pub status: EventStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Pricing attached to an event ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventPricing {
    pub event_id: Uuid,
    pub coconut_qty: Decimal,
    pub coconut_unit_price: Decimal,
    pub delivery_fee: Decimal,
    pub opening_fee: Decimal,
    pub other_fee: Decimal,
    pub other_fee_note: Option<String>,
}

// Event + pricing as the events tab lists them, with the quoted total.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventWithPricing {
    #[serde(flatten)]
    pub event: ScheduledEvent,
    pub pricing: Option<EventPricing>,
    pub quoted_total: Option<Decimal>,
}
