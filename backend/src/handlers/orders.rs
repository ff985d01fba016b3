//! HTTP handlers for order endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Order;
use crate::services::orders::{
    CreateOrderInput, OrderService, UpdateOrderInput, UpdateStatusInput,
};
use crate::AppState;

/// Record a new order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db, state.feed);
    let order = service.create_order(input).await?;
    Ok(Json(order))
}

/// List orders, newest first
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(state.db, state.feed);
    let orders = service.list_orders().await?;
    Ok(Json(orders))
}

/// Get a single order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db, state.feed);
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Edit an order's customer, product or quantity
pub async fn update_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db, state.feed);
    let order = service.update_order(order_id, input).await?;
    Ok(Json(order))
}

/// Mark an order paid, optionally via QR
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(state.db, state.feed);
    let order = service.update_status(order_id, input).await?;
    Ok(Json(order))
}
