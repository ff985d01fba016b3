//! Route definitions for the retail back-office API

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/expenses", expense_routes())
        .nest("/billing", billing_routes())
        .nest("/grid", grid_routes())
        .nest("/sync", sync_routes())
}

/// Catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::products::get_product).delete(handlers::products::delete_product),
        )
        .route("/:product_id/stock", post(handlers::products::adjust_stock))
}

/// Order routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route(
            "/:order_id",
            get(handlers::orders::get_order).put(handlers::orders::update_order),
        )
        .route("/:order_id/status", put(handlers::orders::update_status))
}

/// Expense routes
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::expenses::list_expenses).post(handlers::expenses::create_expense),
        )
        .route("/:expense_id", delete(handlers::expenses::delete_expense))
}

/// Billing report routes
fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::billing::get_summary))
        .route("/export.csv", get(handlers::billing::export_csv))
}

/// Grid routes
fn grid_routes() -> Router<AppState> {
    Router::new()
        .route("/evaluate", post(handlers::grid::evaluate))
        .route("/apply", post(handlers::grid::apply))
}

/// Change feed routes
fn sync_routes() -> Router<AppState> {
    Router::new().route("/changes", get(handlers::sync::get_changes))
}
