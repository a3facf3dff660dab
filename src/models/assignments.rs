// src/models/assignments.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Seller assignment (authorization window) ---
// A seller's `[start_at, end_at)` window at a joint. Closed rows stay around
// for audit; reassignment closes, never deletes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerAssignment {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub joint_id: Uuid,
    pub active: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// One candidate row as fetched from the store: the assignment joined with
// the names and active flags of both endpoints. The resolver's pure filter
// works on this snapshot.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentCandidate {
    pub assignment_id: Uuid,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub seller_is_active: bool,
    pub joint_id: Uuid,
    pub joint_name: String,
    pub joint_is_active: bool,
    pub active: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

// The resolved binding handed to the UI layer.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignedSeller {
    pub assignment_id: Uuid,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub joint_id: Uuid,
    pub joint_name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl From<AssignmentCandidate> for AssignedSeller {
    fn from(row: AssignmentCandidate) -> Self {
        Self {
            assignment_id: row.assignment_id,
            seller_id: row.seller_id,
            seller_name: row.seller_name,
            joint_id: row.joint_id,
            joint_name: row.joint_name,
            start_at: row.start_at,
            end_at: row.end_at,
            note: row.note,
        }
    }
}
