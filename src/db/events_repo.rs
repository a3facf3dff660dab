// src/db/events_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::events::{EventPricing, EventStatus, ScheduledEvent},
};

#[derive(Clone)]
pub struct EventsRepository {
    pool: PgPool,
}

pub struct NewEvent<'a> {
    pub joint_id: Uuid,
    pub event_ts: DateTime<Utc>,
    pub customer_name: Option<&'a str>,
    pub customer_phone: Option<&'a str>,
    pub location_note: Option<&'a str>,
    pub status: EventStatus,
    pub note: Option<&'a str>,
}

pub struct NewPricing<'a> {
    pub coconut_qty: rust_decimal::Decimal,
    pub coconut_unit_price: rust_decimal::Decimal,
    pub delivery_fee: rust_decimal::Decimal,
    pub opening_fee: rust_decimal::Decimal,
    pub other_fee: rust_decimal::Decimal,
    pub other_fee_note: Option<&'a str>,
}

impl EventsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn fetch_between(
        &self,
        joint_id: Option<Uuid>,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ScheduledEvent>, AppError> {
        let rows = sqlx::query_as::<_, ScheduledEvent>(
            r#"
            SELECT id, joint_id, event_ts, customer_name, customer_phone,
                   location_note, status, note, created_at
            FROM events
            WHERE ($1::uuid IS NULL OR joint_id = $1)
              AND event_ts >= $2
              AND event_ts <= $3
            ORDER BY event_ts ASC
            "#,
        )
        .bind(joint_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_all(&self) -> Result<Vec<ScheduledEvent>, AppError> {
        let rows = sqlx::query_as::<_, ScheduledEvent>(
            r#"
            SELECT id, joint_id, event_ts, customer_name, customer_phone,
                   location_note, status, note, created_at
            FROM events
            ORDER BY event_ts ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn fetch_pricing(
        &self,
        event_ids: &[Uuid],
    ) -> Result<Vec<EventPricing>, AppError> {
        let rows = sqlx::query_as::<_, EventPricing>(
            r#"
            SELECT event_id, coconut_qty, coconut_unit_price, delivery_fee,
                   opening_fee, other_fee, other_fee_note
            FROM event_pricing
            WHERE event_id = ANY($1)
            "#,
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts the event and its pricing row in one transaction, so an event
    /// never exists half-priced.
    pub async fn create_with_pricing(
        &self,
        event: NewEvent<'_>,
        pricing: NewPricing<'_>,
    ) -> Result<(ScheduledEvent, EventPricing), AppError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, ScheduledEvent>(
            r#"
            INSERT INTO events (joint_id, event_ts, customer_name, customer_phone,
                                location_note, status, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, joint_id, event_ts, customer_name, customer_phone,
                      location_note, status, note, created_at
            "#,
        )
        .bind(event.joint_id)
        .bind(event.event_ts)
        .bind(event.customer_name)
        .bind(event.customer_phone)
        .bind(event.location_note)
        .bind(event.status)
        .bind(event.note)
        .fetch_one(&mut *tx)
        .await?;

        let created_pricing = sqlx::query_as::<_, EventPricing>(
            r#"
            INSERT INTO event_pricing (event_id, coconut_qty, coconut_unit_price,
                                       delivery_fee, opening_fee, other_fee, other_fee_note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING event_id, coconut_qty, coconut_unit_price, delivery_fee,
                      opening_fee, other_fee, other_fee_note
            "#,
        )
        .bind(created.id)
        .bind(pricing.coconut_qty)
        .bind(pricing.coconut_unit_price)
        .bind(pricing.delivery_fee)
        .bind(pricing.opening_fee)
        .bind(pricing.other_fee)
        .bind(pricing.other_fee_note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((created, created_pricing))
    }
}
