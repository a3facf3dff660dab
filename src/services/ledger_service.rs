// src/services/ledger_service.rs
//
// The reconciliation engine. Folds the delivery, allocation and payment
// streams into the dashboard's expected-stock and expected-seller figures
// and the unified activity feed, and owns the write path for all four
// append-only streams.
//
// Both figures are computed over a bounded recent window per stream, not the
// full history — a deliberate trade of completeness for bounded query cost.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{LedgerRepository, ReferenceRepository},
    models::{
        dashboard::{ActivityEntry, ActivityKind, DashboardMetrics},
        ledger::{Allocation, Audit, Delivery, Payment, PaymentReportEntry},
    },
    services::assignment_service::AssignmentService,
};

/// Rows fetched per stream when no window override is given.
pub const DEFAULT_WINDOW: i64 = 5;

/// The activity feed is capped at this many entries after merging.
const ACTIVITY_LIMIT: usize = 6;

#[derive(Clone)]
pub struct LedgerService {
    repo: LedgerRepository,
    reference_repo: ReferenceRepository,
    assignments: AssignmentService,
    basis_unit_price: Decimal,
}

impl LedgerService {
    pub fn new(
        repo: LedgerRepository,
        reference_repo: ReferenceRepository,
        assignments: AssignmentService,
        basis_unit_price: Decimal,
    ) -> Self {
        Self { repo, reference_repo, assignments, basis_unit_price }
    }

    /// Computes the dashboard metrics over the most recent `window` rows per
    /// stream (optionally restricted to one joint).
    ///
    /// A fetch failure in any single stream degrades that stream to an empty
    /// contribution instead of failing the dashboard; only a misconfigured
    /// unit price is a hard error.
    pub async fn compute_balances(
        &self,
        joint_id: Option<Uuid>,
        window: Option<i64>,
    ) -> Result<DashboardMetrics, AppError> {
        let window = window.unwrap_or(DEFAULT_WINDOW).max(1);

        let deliveries = self.repo.recent_deliveries(joint_id, window).await;
        let allocations = self.repo.recent_allocations(joint_id, window).await;
        let payments = self.repo.recent_payments(joint_id, window).await;

        fold_metrics(deliveries, allocations, payments, self.basis_unit_price)
    }

    // ---
    // Write path
    // ---

    pub async fn record_delivery(
        &self,
        joint_id: Uuid,
        supplier_id: Option<Uuid>,
        qty: Decimal,
        note: Option<&str>,
    ) -> Result<Delivery, AppError> {
        if qty <= Decimal::ZERO {
            return Err(AppError::invalid_field("qty", "Quantity must be greater than zero."));
        }
        self.require_joint(joint_id).await?;
        self.repo.insert_delivery(joint_id, supplier_id, qty, note).await
    }

    pub async fn record_allocation(
        &self,
        joint_id: Uuid,
        seller_id: Uuid,
        qty_basis: Decimal,
        note: Option<&str>,
    ) -> Result<Allocation, AppError> {
        if qty_basis <= Decimal::ZERO {
            return Err(AppError::invalid_field("qtyBasis", "Quantity must be greater than zero."));
        }
        self.require_joint(joint_id).await?;

        // Stock is only handed to a seller currently authorized at the joint.
        let assigned = self.assignments.resolve_active(Some(joint_id), None).await?;
        if !assigned.iter().any(|binding| binding.seller_id == seller_id) {
            return Err(AppError::NotFound("assignment"));
        }

        self.repo.insert_allocation(joint_id, seller_id, qty_basis, note).await
    }

    /// Records a seller payment through the server-validated confirmation
    /// procedure. A PIN mismatch (or any other store refusal) surfaces as an
    /// error value; it is never dropped.
    pub async fn confirm_payment(
        &self,
        joint_id: Uuid,
        seller_id: Uuid,
        amount_ghs: Decimal,
        note: Option<&str>,
        pin: &str,
    ) -> Result<Payment, AppError> {
        if amount_ghs <= Decimal::ZERO {
            return Err(AppError::invalid_field("amountGhs", "Amount must be greater than zero."));
        }
        self.require_joint(joint_id).await?;
        self.reference_repo
            .find_active_seller(seller_id)
            .await?
            .ok_or(AppError::NotFound("seller"))?;

        self.repo
            .confirm_payment_with_pin(joint_id, seller_id, amount_ghs, note, pin)
            .await
    }

    pub async fn record_audit(
        &self,
        joint_id: Uuid,
        seller_id: Option<Uuid>,
        counted_qty: Decimal,
        note: Option<&str>,
    ) -> Result<Audit, AppError> {
        if counted_qty < Decimal::ZERO {
            return Err(AppError::invalid_field("countedQty", "Counted quantity cannot be negative."));
        }
        self.require_joint(joint_id).await?;
        self.repo.insert_audit(joint_id, seller_id, counted_qty, note).await
    }

    // ---
    // Report listings
    // ---

    pub async fn list_payments(
        &self,
        joint_id: Option<Uuid>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<PaymentReportEntry>, AppError> {
        let payments = self.repo.list_payments(joint_id, seller_id).await?;
        report_entries(payments, self.basis_unit_price)
    }

    pub async fn list_audits(
        &self,
        joint_id: Option<Uuid>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Audit>, AppError> {
        self.repo.list_audits(joint_id, seller_id).await
    }

    // A disabled joint never accepts new rows, even though its history stays
    // readable.
    async fn require_joint(&self, joint_id: Uuid) -> Result<(), AppError> {
        self.reference_repo
            .find_active_joint(joint_id)
            .await?
            .ok_or(AppError::NotFound("joint"))?;
        Ok(())
    }
}

/// Folds the three fetched windows into the metrics object.
///
/// Each stream arrives as its own fetch `Result`; a failed stream is logged
/// and contributes nothing. The fold itself never touches the store.
fn fold_metrics(
    deliveries: Result<Vec<Delivery>, AppError>,
    allocations: Result<Vec<Allocation>, AppError>,
    payments: Result<Vec<Payment>, AppError>,
    unit_price: Decimal,
) -> Result<DashboardMetrics, AppError> {
    // Fail closed before any division.
    if unit_price <= Decimal::ZERO {
        return Err(AppError::ConfigError(format!(
            "basis unit price must be positive, got {unit_price}"
        )));
    }

    let deliveries = salvage("deliveries", deliveries);
    let allocations = salvage("allocations", allocations);
    let payments = salvage("payments", payments);

    let delivered: Decimal = deliveries.iter().map(|row| row.qty).sum();
    let allocated: Decimal = allocations.iter().map(|row| row.qty_basis).sum();
    let paid_in_basis: Decimal = payments
        .iter()
        .map(|row| row.amount_ghs / unit_price)
        .sum();

    // Merge the windows into one feed, newest first. The sort is stable, so
    // equal timestamps keep the deliveries, allocations, payments input
    // order — a reproducible tie-break, not an accidental one.
    let mut activity: Vec<ActivityEntry> = deliveries
        .iter()
        .map(|row| ActivityEntry { kind: ActivityKind::Delivery, created_at: row.created_at })
        .chain(allocations.iter().map(|row| ActivityEntry {
            kind: ActivityKind::Allocation,
            created_at: row.created_at,
        }))
        .chain(payments.iter().map(|row| ActivityEntry {
            kind: ActivityKind::Payment,
            created_at: row.created_at,
        }))
        .collect();
    activity.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    activity.truncate(ACTIVITY_LIMIT);

    Ok(DashboardMetrics {
        expected_stock: delivered - allocated,
        // May go negative when a seller has overpaid; rendered as-is.
        expected_seller: allocated - paid_in_basis,
        activity,
    })
}

fn salvage<T>(stream: &'static str, result: Result<Vec<T>, AppError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(error) => {
            tracing::warn!(stream, %error, "stream fetch failed, contributing nothing");
            Vec::new()
        }
    }
}

fn report_entries(
    payments: Vec<Payment>,
    unit_price: Decimal,
) -> Result<Vec<PaymentReportEntry>, AppError> {
    if unit_price <= Decimal::ZERO {
        return Err(AppError::ConfigError(format!(
            "basis unit price must be positive, got {unit_price}"
        )));
    }

    Ok(payments
        .into_iter()
        .map(|payment| PaymentReportEntry {
            id: payment.id,
            joint_id: payment.joint_id,
            seller_id: payment.seller_id,
            basis_equivalent: payment.amount_ghs / unit_price,
            amount_ghs: payment.amount_ghs,
            confirmed_by_seller: payment.confirmed_by_seller,
            note: payment.note,
            created_at: payment.created_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, minute, 0).unwrap()
    }

    fn delivery(qty: i64, created_at: DateTime<Utc>) -> Delivery {
        Delivery {
            id: Uuid::new_v4(),
            joint_id: Uuid::new_v4(),
            supplier_id: None,
            qty: Decimal::from(qty),
            note: None,
            created_at,
        }
    }

    fn allocation(qty_basis: i64, created_at: DateTime<Utc>) -> Allocation {
        Allocation {
            id: Uuid::new_v4(),
            joint_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            qty_basis: Decimal::from(qty_basis),
            note: None,
            created_at,
        }
    }

    fn payment(amount: i64, created_at: DateTime<Utc>) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            joint_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
            amount_ghs: Decimal::from(amount),
            confirmed_by_seller: true,
            note: None,
            created_at,
        }
    }

    fn unit_price() -> Decimal {
        Decimal::from(6)
    }

    #[test]
    fn expected_stock_is_deliveries_minus_allocations() {
        let metrics = fold_metrics(
            Ok(vec![delivery(100, at(1)), delivery(50, at(2))]),
            Ok(vec![allocation(80, at(3))]),
            Ok(vec![]),
            unit_price(),
        )
        .unwrap();

        assert_eq!(metrics.expected_stock, Decimal::from(70));
    }

    #[test]
    fn expected_seller_is_allocations_minus_payments_in_basis_units() {
        let metrics = fold_metrics(
            Ok(vec![]),
            Ok(vec![allocation(80, at(1))]),
            Ok(vec![payment(240, at(2))]),
            unit_price(),
        )
        .unwrap();

        // 80 - 240 / 6 = 40
        assert_eq!(metrics.expected_seller, Decimal::from(40));
    }

    #[test]
    fn expected_seller_goes_negative_when_the_seller_overpaid() {
        let metrics = fold_metrics(
            Ok(vec![]),
            Ok(vec![allocation(10, at(1))]),
            Ok(vec![payment(120, at(2))]),
            unit_price(),
        )
        .unwrap();

        assert_eq!(metrics.expected_seller, Decimal::from(-10));
    }

    #[test]
    fn expected_stock_is_order_independent() {
        let forward = fold_metrics(
            Ok(vec![delivery(100, at(1)), delivery(50, at(2)), delivery(7, at(3))]),
            Ok(vec![allocation(80, at(4))]),
            Ok(vec![]),
            unit_price(),
        )
        .unwrap();
        let shuffled = fold_metrics(
            Ok(vec![delivery(7, at(3)), delivery(100, at(1)), delivery(50, at(2))]),
            Ok(vec![allocation(80, at(4))]),
            Ok(vec![]),
            unit_price(),
        )
        .unwrap();

        assert_eq!(forward.expected_stock, shuffled.expected_stock);
    }

    #[test]
    fn widening_the_window_adds_exactly_the_extra_rows_contribution() {
        let window_k = vec![delivery(100, at(5)), delivery(50, at(4))];
        let older_row = delivery(30, at(1));
        let mut window_k_plus_one = window_k.clone();
        window_k_plus_one.push(older_row.clone());

        let narrow = fold_metrics(Ok(window_k), Ok(vec![]), Ok(vec![]), unit_price()).unwrap();
        let wide =
            fold_metrics(Ok(window_k_plus_one), Ok(vec![]), Ok(vec![]), unit_price()).unwrap();

        assert_eq!(wide.expected_stock, narrow.expected_stock + older_row.qty);
    }

    #[test]
    fn failed_stream_contributes_zero_instead_of_aborting() {
        let metrics = fold_metrics(
            Err(sqlx::Error::RowNotFound.into()),
            Ok(vec![allocation(80, at(1))]),
            Ok(vec![payment(240, at(2))]),
            unit_price(),
        )
        .unwrap();

        assert_eq!(metrics.expected_stock, Decimal::from(-80));
        assert_eq!(metrics.expected_seller, Decimal::from(40));
    }

    #[test]
    fn all_streams_failing_still_yields_a_metrics_object() {
        let metrics = fold_metrics(
            Err(sqlx::Error::RowNotFound.into()),
            Err(sqlx::Error::RowNotFound.into()),
            Err(sqlx::Error::RowNotFound.into()),
            unit_price(),
        )
        .unwrap();

        assert_eq!(metrics.expected_stock, Decimal::ZERO);
        assert_eq!(metrics.expected_seller, Decimal::ZERO);
        assert!(metrics.activity.is_empty());
    }

    #[test]
    fn zero_unit_price_fails_closed_without_dividing() {
        let result = fold_metrics(
            Ok(vec![delivery(100, at(1))]),
            Ok(vec![]),
            Ok(vec![payment(240, at(2))]),
            Decimal::ZERO,
        );

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn activity_feed_is_merged_newest_first_and_capped() {
        let deliveries: Vec<Delivery> = (1..=4).map(|m| delivery(1, at(m))).collect();
        let allocations: Vec<Allocation> = (5..=7).map(|m| allocation(1, at(m))).collect();
        let payments: Vec<Payment> = (8..=9).map(|m| payment(6, at(m))).collect();

        let metrics =
            fold_metrics(Ok(deliveries), Ok(allocations), Ok(payments), unit_price()).unwrap();

        assert_eq!(metrics.activity.len(), 6);
        assert!(
            metrics
                .activity
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
        assert_eq!(metrics.activity[0].kind, ActivityKind::Payment);
        assert_eq!(metrics.activity[0].created_at, at(9));
    }

    #[test]
    fn equal_timestamps_keep_stream_order_in_the_feed() {
        let tied = at(30);
        let metrics = fold_metrics(
            Ok(vec![delivery(1, tied)]),
            Ok(vec![allocation(1, tied)]),
            Ok(vec![payment(6, tied)]),
            unit_price(),
        )
        .unwrap();

        let kinds: Vec<ActivityKind> = metrics.activity.iter().map(|entry| entry.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Delivery, ActivityKind::Allocation, ActivityKind::Payment]
        );
    }

    #[test]
    fn payment_report_entries_carry_the_basis_equivalent() {
        let entries = report_entries(vec![payment(240, at(1))], unit_price()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].basis_equivalent, Decimal::from(40));
    }

    #[test]
    fn payment_report_fails_closed_on_zero_unit_price() {
        let result = report_entries(vec![payment(240, at(1))], Decimal::ZERO);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
