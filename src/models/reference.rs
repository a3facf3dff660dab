// src/models/reference.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- 1. Joints (sales locations) ---
// Immutable identity; an administrator toggles `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Joint {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// --- 2. Sellers ---
// Identity independent of any joint; the link is a SellerAssignment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// --- 3. Suppliers ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone_whatsapp: Option<String>,
    pub note: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// Everything the selection forms and report filters need, in one payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub joints: Vec<Joint>,
    pub sellers: Vec<Seller>,
    pub suppliers: Vec<Supplier>,
}
