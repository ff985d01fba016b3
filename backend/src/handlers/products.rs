//! HTTP handlers for catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Product;
use crate::services::catalog::{AdjustStockInput, CatalogService, CreateProductInput};
use crate::AppState;

/// Add a product to the catalog
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db, state.feed);
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// List products in creation order
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.db, state.feed);
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db, state.feed);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Adjust a product's stock by a signed delta
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<Product>> {
    let service = CatalogService::new(state.db, state.feed);
    let product = service.adjust_stock(product_id, input).await?;
    Ok(Json(product))
}

/// Remove a product from the catalog
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = CatalogService::new(state.db, state.feed);
    service.delete_product(product_id).await?;
    Ok(Json(()))
}
