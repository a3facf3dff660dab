// src/services/events_service.rs

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EventsRepository, ReferenceRepository},
    db::events_repo::{NewEvent, NewPricing},
    models::events::{EventPricing, EventWithPricing, ScheduledEvent},
};

/// How far ahead the dashboard looks when no horizon override is given.
pub const DEFAULT_HORIZON_DAYS: i64 = 7;

#[derive(Clone)]
pub struct EventsService {
    repo: EventsRepository,
    reference_repo: ReferenceRepository,
}

impl EventsService {
    pub fn new(repo: EventsRepository, reference_repo: ReferenceRepository) -> Self {
        Self { repo, reference_repo }
    }

    /// Scheduled events within `[now, now + horizon_days]`, soonest first.
    /// Pure read, no aggregation.
    pub async fn compute_upcoming(
        &self,
        joint_id: Option<Uuid>,
        horizon_days: Option<i64>,
    ) -> Result<Vec<ScheduledEvent>, AppError> {
        let horizon = horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS).max(0);
        let now = Utc::now();
        let rows = self
            .repo
            .fetch_between(joint_id, now, now + Duration::days(horizon))
            .await?;
        Ok(rows
            .into_iter()
            .filter(|event| within_horizon(event.event_ts, now, horizon))
            .collect())
    }

    /// Schedules an event together with its pricing in one store
    /// transaction.
    pub async fn schedule_event(
        &self,
        event: NewEvent<'_>,
        pricing: NewPricing<'_>,
    ) -> Result<EventWithPricing, AppError> {
        self.reference_repo
            .find_active_joint(event.joint_id)
            .await?
            .ok_or(AppError::NotFound("joint"))?;

        let (created, created_pricing) = self.repo.create_with_pricing(event, pricing).await?;
        let quoted_total = Some(quote_total(&created_pricing));

        tracing::info!(event_id = %created.id, "event scheduled");

        Ok(EventWithPricing { event: created, pricing: Some(created_pricing), quoted_total })
    }

    /// Every event, soonest first, with pricing and quoted totals attached
    /// where a pricing row exists.
    pub async fn list_events(&self) -> Result<Vec<EventWithPricing>, AppError> {
        let events = self.repo.fetch_all().await?;
        let ids: Vec<Uuid> = events.iter().map(|event| event.id).collect();
        let mut pricing_by_event: HashMap<Uuid, EventPricing> = self
            .repo
            .fetch_pricing(&ids)
            .await?
            .into_iter()
            .map(|pricing| (pricing.event_id, pricing))
            .collect();

        Ok(events
            .into_iter()
            .map(|event| {
                let pricing = pricing_by_event.remove(&event.id);
                let quoted_total = pricing.as_ref().map(quote_total);
                EventWithPricing { event, pricing, quoted_total }
            })
            .collect())
    }
}

/// The customer-facing estimate for an event:
/// coconuts at unit price plus the flat fees.
pub fn quote_total(pricing: &EventPricing) -> Decimal {
    pricing.coconut_qty * pricing.coconut_unit_price
        + pricing.delivery_fee
        + pricing.opening_fee
        + pricing.other_fee
}

/// The upcoming-window predicate, kept separate so the horizon rule is
/// testable without a store: `now <= event_ts <= now + horizon_days`.
pub fn within_horizon(event_ts: DateTime<Utc>, now: DateTime<Utc>, horizon_days: i64) -> bool {
    event_ts >= now && event_ts <= now + Duration::days(horizon_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn event_one_day_out_is_upcoming_ten_days_out_is_not() {
        let soon = now() + Duration::days(1);
        let far = now() + Duration::days(10);

        assert!(within_horizon(soon, now(), DEFAULT_HORIZON_DAYS));
        assert!(!within_horizon(far, now(), DEFAULT_HORIZON_DAYS));
    }

    #[test]
    fn past_events_are_not_upcoming() {
        let yesterday = now() - Duration::days(1);
        assert!(!within_horizon(yesterday, now(), DEFAULT_HORIZON_DAYS));
    }

    #[test]
    fn horizon_boundary_is_inclusive() {
        let boundary = now() + Duration::days(DEFAULT_HORIZON_DAYS);
        assert!(within_horizon(boundary, now(), DEFAULT_HORIZON_DAYS));
    }

    #[test]
    fn quote_total_is_quantity_times_unit_price_plus_fees() {
        let pricing = EventPricing {
            event_id: Uuid::new_v4(),
            coconut_qty: Decimal::from(20),
            coconut_unit_price: Decimal::from(6),
            delivery_fee: Decimal::from(15),
            opening_fee: Decimal::from(10),
            other_fee: Decimal::from(5),
            other_fee_note: None,
        };

        // 20 * 6 + 15 + 10 + 5
        assert_eq!(quote_total(&pricing), Decimal::from(150));
    }
}
