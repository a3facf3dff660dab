// src/db/reference_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reference::{Joint, Seller, Supplier},
};

// Reference data the selection forms and filters are built from.
#[derive(Clone)]
pub struct ReferenceRepository {
    pool: PgPool,
}

impl ReferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_joints(&self) -> Result<Vec<Joint>, AppError> {
        let joints = sqlx::query_as::<_, Joint>(
            "SELECT id, name, is_active, created_at FROM joints ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(joints)
    }

    pub async fn list_sellers(&self) -> Result<Vec<Seller>, AppError> {
        let sellers = sqlx::query_as::<_, Seller>(
            "SELECT id, name, is_active, created_at FROM sellers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(sellers)
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, phone_whatsapp, note, is_active, created_at
             FROM suppliers ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    // Lookup helpers for precondition checks: a disabled row does not resolve.

    pub async fn find_active_joint(&self, id: Uuid) -> Result<Option<Joint>, AppError> {
        let joint = sqlx::query_as::<_, Joint>(
            "SELECT id, name, is_active, created_at FROM joints WHERE id = $1 AND is_active",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(joint)
    }

    pub async fn find_active_seller(&self, id: Uuid) -> Result<Option<Seller>, AppError> {
        let seller = sqlx::query_as::<_, Seller>(
            "SELECT id, name, is_active, created_at FROM sellers WHERE id = $1 AND is_active",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(seller)
    }
}
