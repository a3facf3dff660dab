// src/db/assignment_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::assignments::{AssignmentCandidate, SellerAssignment},
};

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the open-flagged assignment rows joined with both endpoints,
    /// newest start first. The resolver applies the full window/flag
    /// predicate on top of this snapshot.
    pub async fn fetch_candidates(
        &self,
        joint_id: Option<Uuid>,
    ) -> Result<Vec<AssignmentCandidate>, AppError> {
        let rows = sqlx::query_as::<_, AssignmentCandidate>(
            r#"
            SELECT
                a.id AS assignment_id,
                a.seller_id,
                s.name AS seller_name,
                s.is_active AS seller_is_active,
                a.joint_id,
                j.name AS joint_name,
                j.is_active AS joint_is_active,
                a.active,
                a.start_at,
                a.end_at,
                a.note
            FROM seller_assignments a
            JOIN sellers s ON s.id = a.seller_id
            JOIN joints j ON j.id = a.joint_id
            WHERE a.active = TRUE
              AND ($1::uuid IS NULL OR a.joint_id = $1)
            ORDER BY a.start_at DESC
            "#,
        )
        .bind(joint_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Closes any open assignment for the seller and inserts the new one,
    /// inside a single transaction so concurrent reassigns cannot leave two
    /// open rows. A partial unique index on the table backstops this.
    pub async fn reassign(
        &self,
        seller_id: Uuid,
        joint_id: Uuid,
        note: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<SellerAssignment, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE seller_assignments
            SET active = FALSE, end_at = $2
            WHERE seller_id = $1 AND active = TRUE AND end_at IS NULL
            "#,
        )
        .bind(seller_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let assignment = sqlx::query_as::<_, SellerAssignment>(
            r#"
            INSERT INTO seller_assignments (seller_id, joint_id, active, start_at, end_at, note)
            VALUES ($1, $2, TRUE, $3, NULL, $4)
            RETURNING id, seller_id, joint_id, active, start_at, end_at, note, created_at
            "#,
        )
        .bind(seller_id)
        .bind(joint_id)
        .bind(now)
        .bind(note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(assignment)
    }
}
