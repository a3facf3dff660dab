// src/services/reference_service.rs

use crate::{
    common::error::AppError,
    db::ReferenceRepository,
    models::reference::{ReferenceData, Supplier},
};

// Thin delegate: the filters and selection forms just need the three
// name-ordered listings in one round trip.
#[derive(Clone)]
pub struct ReferenceService {
    repo: ReferenceRepository,
}

impl ReferenceService {
    pub fn new(repo: ReferenceRepository) -> Self {
        Self { repo }
    }

    pub async fn reference_data(&self) -> Result<ReferenceData, AppError> {
        let joints = self.repo.list_joints().await?;
        let sellers = self.repo.list_sellers().await?;
        let suppliers = self.repo.list_suppliers().await?;
        Ok(ReferenceData { joints, sellers, suppliers })
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.repo.list_suppliers().await
    }
}
