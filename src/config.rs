// src/config.rs

use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::error::AppError,
    db::{AssignmentRepository, EventsRepository, LedgerRepository, ReferenceRepository},
    services::{AssignmentService, EventsService, LedgerService, ReferenceService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bind_addr: String,
    pub reference_service: ReferenceService,
    pub assignment_service: AssignmentService,
    pub ledger_service: LedgerService,
    pub events_service: EventsService,
}

impl AppState {
    /// Builds the whole application state: one pool, constructed once,
    /// handed to every repository by clone. Nothing else in the process
    /// opens or caches a connection.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        // The fixed conversion rate between currency and basis units.
        // Refuse to start on a non-positive value: every owed-balance
        // computation divides by it.
        let basis_unit_price: Decimal = env::var("BASIS_UNIT_PRICE")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .map_err(|e| AppError::ConfigError(format!("BASIS_UNIT_PRICE is not a number: {e}")))?;
        if basis_unit_price <= Decimal::ZERO {
            return Err(AppError::ConfigError(format!(
                "basis unit price must be positive, got {basis_unit_price}"
            ))
            .into());
        }

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("database connection established");

        // --- Dependency graph ---
        let reference_repo = ReferenceRepository::new(db_pool.clone());
        let assignment_repo = AssignmentRepository::new(db_pool.clone());
        let ledger_repo = LedgerRepository::new(db_pool.clone());
        let events_repo = EventsRepository::new(db_pool.clone());

        let reference_service = ReferenceService::new(reference_repo.clone());
        let assignment_service =
            AssignmentService::new(assignment_repo, reference_repo.clone());
        let ledger_service = LedgerService::new(
            ledger_repo,
            reference_repo.clone(),
            assignment_service.clone(),
            basis_unit_price,
        );
        let events_service = EventsService::new(events_repo, reference_repo);

        Ok(Self {
            db_pool,
            bind_addr,
            reference_service,
            assignment_service,
            ledger_service,
            events_service,
        })
    }
}
