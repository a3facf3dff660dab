// src/db/ledger_repo.rs
//
// Store access for the three folded event streams plus the audit snapshots.
// Every stream is append-only: inserts and windowed/filtered reads, no
// updates or deletes.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ledger::{Allocation, Audit, Delivery, Payment},
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Windowed reads (most recent N, created_at descending)
    // ---

    pub async fn recent_deliveries(
        &self,
        joint_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Delivery>, AppError> {
        let rows = sqlx::query_as::<_, Delivery>(
            r#"
            SELECT id, joint_id, supplier_id, qty, note, created_at
            FROM deliveries
            WHERE ($1::uuid IS NULL OR joint_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(joint_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn recent_allocations(
        &self,
        joint_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Allocation>, AppError> {
        let rows = sqlx::query_as::<_, Allocation>(
            r#"
            SELECT id, joint_id, seller_id, qty_basis, note, created_at
            FROM allocations
            WHERE ($1::uuid IS NULL OR joint_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(joint_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn recent_payments(
        &self,
        joint_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<Payment>, AppError> {
        let rows = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, joint_id, seller_id, amount_ghs, confirmed_by_seller, note, created_at
            FROM payments
            WHERE ($1::uuid IS NULL OR joint_id = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(joint_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Inserts
    // ---

    pub async fn insert_delivery(
        &self,
        joint_id: Uuid,
        supplier_id: Option<Uuid>,
        qty: Decimal,
        note: Option<&str>,
    ) -> Result<Delivery, AppError> {
        let delivery = sqlx::query_as::<_, Delivery>(
            r#"
            INSERT INTO deliveries (joint_id, supplier_id, qty, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, joint_id, supplier_id, qty, note, created_at
            "#,
        )
        .bind(joint_id)
        .bind(supplier_id)
        .bind(qty)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;
        Ok(delivery)
    }

    pub async fn insert_allocation(
        &self,
        joint_id: Uuid,
        seller_id: Uuid,
        qty_basis: Decimal,
        note: Option<&str>,
    ) -> Result<Allocation, AppError> {
        let allocation = sqlx::query_as::<_, Allocation>(
            r#"
            INSERT INTO allocations (joint_id, seller_id, qty_basis, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, joint_id, seller_id, qty_basis, note, created_at
            "#,
        )
        .bind(joint_id)
        .bind(seller_id)
        .bind(qty_basis)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;
        Ok(allocation)
    }

    pub async fn insert_audit(
        &self,
        joint_id: Uuid,
        seller_id: Option<Uuid>,
        counted_qty: Decimal,
        note: Option<&str>,
    ) -> Result<Audit, AppError> {
        let audit = sqlx::query_as::<_, Audit>(
            r#"
            INSERT INTO audits (joint_id, seller_id, counted_qty, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, joint_id, seller_id, counted_qty, note, created_at
            "#,
        )
        .bind(joint_id)
        .bind(seller_id)
        .bind(counted_qty)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;
        Ok(audit)
    }

    /// Payment confirmation is server-validated: the PIN is checked inside
    /// the database function, next to the stored hash. On mismatch the
    /// function raises and the error surfaces as a store error.
    pub async fn confirm_payment_with_pin(
        &self,
        joint_id: Uuid,
        seller_id: Uuid,
        amount_ghs: Decimal,
        note: Option<&str>,
        pin: &str,
    ) -> Result<Payment, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            "SELECT * FROM confirm_payment_with_pin($1, $2, $3, $4, $5)",
        )
        .bind(joint_id)
        .bind(seller_id)
        .bind(amount_ghs)
        .bind(note)
        .bind(pin)
        .fetch_one(&self.pool)
        .await?;
        Ok(payment)
    }

    // ---
    // Report listings (equality filters, newest first)
    // ---

    pub async fn list_payments(
        &self,
        joint_id: Option<Uuid>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Payment>, AppError> {
        let rows = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, joint_id, seller_id, amount_ghs, confirmed_by_seller, note, created_at
            FROM payments
            WHERE ($1::uuid IS NULL OR joint_id = $1)
              AND ($2::uuid IS NULL OR seller_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(joint_id)
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_audits(
        &self,
        joint_id: Option<Uuid>,
        seller_id: Option<Uuid>,
    ) -> Result<Vec<Audit>, AppError> {
        let rows = sqlx::query_as::<_, Audit>(
            r#"
            SELECT id, joint_id, seller_id, counted_qty, note, created_at
            FROM audits
            WHERE ($1::uuid IS NULL OR joint_id = $1)
              AND ($2::uuid IS NULL OR seller_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(joint_id)
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
