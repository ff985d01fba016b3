//! HTTP handlers for billing report endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::error::AppResult;
use crate::services::billing::{BillingFilter, BillingReport, BillingService};
use crate::services::export::report_to_csv;
use crate::AppState;

/// Full billing report for the requested window
pub async fn get_summary(
    State(state): State<AppState>,
    Query(filter): Query<BillingFilter>,
) -> AppResult<Json<BillingReport>> {
    let service = BillingService::new(state.db);
    let report = service
        .summary(&filter, state.config.billing.default_opening_balance)
        .await?;
    Ok(Json(report))
}

/// Billing report as a downloadable CSV file
pub async fn export_csv(
    State(state): State<AppState>,
    Query(filter): Query<BillingFilter>,
) -> AppResult<impl IntoResponse> {
    let service = BillingService::new(state.db);
    let report = service
        .summary(&filter, state.config.billing.default_opening_balance)
        .await?;
    let csv = report_to_csv(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"billing.csv\"",
            ),
        ],
        csv,
    ))
}
