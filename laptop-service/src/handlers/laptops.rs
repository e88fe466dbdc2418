//! Catalog endpoints. Each handler builds one [`LaptopQuery`] and hands it to
//! the store; failures surface through `AppError`.

use crate::dtos::{LaptopListParams, LaptopResponse, LimitParams};
use crate::services::LaptopQuery;
use crate::startup::AppState;
use crate::utils::StrictQuery;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

pub const NOT_FOUND_MESSAGE: &str = "laptop not found";

async fn run_query(
    state: &AppState,
    view: &'static str,
    query: LaptopQuery,
) -> Result<Json<Vec<LaptopResponse>>, AppError> {
    let laptops = state.store.find(&query).await?;
    tracing::info!(view, count = laptops.len(), "Laptops fetched");

    Ok(Json(laptops.into_iter().map(LaptopResponse::from).collect()))
}

/// `GET /laptops`
pub async fn list_laptops(
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<LaptopListParams>,
) -> Result<Json<Vec<LaptopResponse>>, AppError> {
    let query = params.into_query()?;
    run_query(&state, "catalog", query).await
}

/// `GET /laptops/:laptopId`
///
/// An id that is not a valid ObjectId is reported like any other lookup
/// failure (500), not as a missing record.
pub async fn get_laptop(
    State(state): State<AppState>,
    Path(laptop_id): Path<String>,
) -> Result<Json<LaptopResponse>, AppError> {
    let id = ObjectId::parse_str(&laptop_id).map_err(|e| {
        tracing::warn!(laptop_id = %laptop_id, "Malformed laptop id");
        AppError::InternalError(anyhow::anyhow!("malformed laptop id {:?}: {}", laptop_id, e))
    })?;

    let laptop = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!(NOT_FOUND_MESSAGE)))?;

    Ok(Json(LaptopResponse::from(laptop)))
}

/// `GET /flash-sales`
///
/// A query string that cannot be read at all is treated like a missing
/// `limit`.
pub async fn flash_sales(
    State(state): State<AppState>,
    params: Option<Query<LimitParams>>,
) -> Result<Json<Vec<LaptopResponse>>, AppError> {
    let params = params.map(|Query(params)| params).unwrap_or_default();
    run_query(&state, "flash_sales", LaptopQuery::flash_sales(params.limit())).await
}

/// `GET /trending`
pub async fn trending(
    State(state): State<AppState>,
) -> Result<Json<Vec<LaptopResponse>>, AppError> {
    run_query(&state, "trending", LaptopQuery::trending()).await
}
