// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. The top cards.
// Both figures are windowed approximations over the most recent rows per
// stream — a "recent activity" picture, not a full-history total.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub expected_stock: Decimal,  // recent deliveries minus allocations
    pub expected_seller: Decimal, // recent allocations minus payments, in basis units
    pub activity: Vec<ActivityEntry>,
}

// 2. The unified recent-activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ActivityKind {
    Delivery,
    Allocation,
    Payment,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub created_at: DateTime<Utc>,
}
