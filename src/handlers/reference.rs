// src/handlers/reference.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    models::reference::{ReferenceData, Supplier},
};

// GET /api/reference
#[utoipa::path(
    get,
    path = "/api/reference",
    tag = "Reference",
    responses(
        (status = 200, description = "Joints, sellers and suppliers for filters and forms", body = ReferenceData)
    )
)]
pub async fn get_reference_data(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state.reference_service.reference_data().await?;
    Ok((StatusCode::OK, Json(data)))
}

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Reference",
    responses(
        (status = 200, description = "Suppliers, name ascending", body = Vec<Supplier>)
    )
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.reference_service.list_suppliers().await?;
    Ok((StatusCode::OK, Json(suppliers)))
}
