// src/models/ledger.rs
//
// The three append-only event streams the reconciliation engine folds, plus
// the audit snapshot stream (display/cross-check only, never folded).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Delivery: stock entering a joint ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: Uuid,
    pub joint_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub qty: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Allocation: stock handed to a seller, in basis units ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: Uuid,
    pub joint_id: Uuid,
    pub seller_id: Uuid,
    pub qty_basis: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Payment: money returned by a seller ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub joint_id: Uuid,
    pub seller_id: Uuid,
    pub amount_ghs: Decimal,
    pub confirmed_by_seller: bool,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Audit: physical count snapshot ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub id: Uuid,
    pub joint_id: Uuid,
    pub seller_id: Option<Uuid>,
    pub counted_qty: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// A payment as the reports screen shows it: the currency amount plus its
// basis-unit equivalent at the configured unit price.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReportEntry {
    pub id: Uuid,
    pub joint_id: Uuid,
    pub seller_id: Uuid,
    pub amount_ghs: Decimal,
    pub basis_equivalent: Decimal,
    pub confirmed_by_seller: bool,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
