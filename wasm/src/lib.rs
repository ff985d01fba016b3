//! WebAssembly module for the Retail Back-Office Platform
//!
//! Provides client-side computation for:
//! - Formula evaluation against a serialized grid
//! - Billing report figures without a server round-trip
//! - Cell id helpers and offline input validation

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::billing::{
    aggregate_overall_totals, aggregate_product_totals, compute_cash_in_bank,
    compute_financial_summary, sum_expenses,
};
use shared::grid::{self, Grid};
use shared::models::{FinancialSummary, Snapshot};
use shared::types::PaymentMethod;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Evaluate operator input against a JSON-serialized grid.
///
/// Returns the display value; formula failures come back as a JS error so
/// the caller can show them next to the cell.
#[wasm_bindgen]
pub fn evaluate_formula(input: &str, grid_json: &str) -> Result<String, JsValue> {
    let grid: Grid = serde_json::from_str(grid_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid grid JSON: {}", e)))?;

    grid::evaluate_formula(input, &grid)
        .map(|value| value.display())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`evaluate_formula`], but renders failures as the `"ERROR"` literal
#[wasm_bindgen]
pub fn evaluate_or_error(input: &str, grid_json: &str) -> Result<String, JsValue> {
    let grid: Grid = serde_json::from_str(grid_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid grid JSON: {}", e)))?;
    Ok(grid::evaluate_or_error(input, &grid))
}

/// Compute the full billing report from a JSON-serialized snapshot.
///
/// Returns the per-product rollups, overall totals and financial summary as
/// one JSON object, matching the server's `/billing/summary` shape.
#[wasm_bindgen]
pub fn billing_summary(snapshot_json: &str, opening_balance: &str) -> Result<String, JsValue> {
    let snapshot: Snapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid snapshot JSON: {}", e)))?;
    let opening_balance: Decimal = opening_balance
        .parse()
        .map_err(|_| JsValue::from_str("Invalid opening balance"))?;

    let product_totals =
        aggregate_product_totals(&snapshot.products, &snapshot.orders, |_| true);
    let overall = aggregate_overall_totals(&product_totals);

    let total_expenses = sum_expenses(&snapshot.expenses, |_| true, None);
    let online_expenses = sum_expenses(&snapshot.expenses, |_| true, Some(PaymentMethod::Online));

    let (cash_in_counter, net_profit) =
        compute_financial_summary(overall.sales, total_expenses, opening_balance);
    let financial = FinancialSummary {
        cash_in_counter,
        cash_in_bank: compute_cash_in_bank(overall.digital_payments(), online_expenses),
        net_profit,
    };

    serde_json::to_string(&serde_json::json!({
        "product_totals": product_totals,
        "overall": overall,
        "financial": financial,
        "total_expenses": total_expenses,
    }))
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format a 1-based (column, row) pair as a cell id
#[wasm_bindgen]
pub fn format_cell_id(col: u32, row: u32) -> String {
    grid::format_cell_id(col, row)
}

/// Check whether a string is a valid cell id
#[wasm_bindgen]
pub fn is_valid_cell_id(id: &str) -> bool {
    grid::parse_cell_id(id).is_some()
}
