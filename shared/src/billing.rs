//! Billing aggregation engine
//!
//! Pure functions turning a snapshot of products, orders and expenses into
//! per-product and overall financial figures. The caller supplies the date
//! filter as a plain predicate, so the engine stays agnostic of how the UI
//! expresses "all time", "today" or a custom range.
//!
//! No function here validates its input; the form layer owns that. Negative
//! figures flow through the arithmetic unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{Expense, Order, OverallTotals, Product, ProductTotal};
use crate::types::PaymentMethod;

/// Roll up orders per product within the filter window.
///
/// Output preserves the iteration order of `products`, and products with no
/// matching orders are kept with all-zero figures. `amount` counts paid and
/// unpaid orders alike (gross sales); `reclassified_to_paid` counts only the
/// currently-paid subset, so the two figures overlap.
pub fn aggregate_product_totals<F>(
    products: &[Product],
    orders: &[Order],
    include_date: F,
) -> Vec<ProductTotal>
where
    F: Fn(DateTime<Utc>) -> bool,
{
    products
        .iter()
        .map(|product| {
            let mut total = ProductTotal::zero(product.id, product.name.clone());
            for order in orders
                .iter()
                .filter(|o| o.product_id == product.id && include_date(o.date))
            {
                total.quantity += i64::from(order.quantity);
                total.amount += order.total;
                if order.is_paid {
                    total.reclassified_to_paid += order.total;
                    if order.paid_with_qr {
                        if order.was_unpaid {
                            total.unpaid_to_paid_qr += order.total;
                        } else {
                            total.paid_with_qr += order.total;
                        }
                    }
                }
            }
            total
        })
        .collect()
}

/// Coordinate-wise sum of per-product rollups. Zeros for empty input.
pub fn aggregate_overall_totals(product_totals: &[ProductTotal]) -> OverallTotals {
    product_totals
        .iter()
        .fold(OverallTotals::default(), |mut acc, t| {
            acc.quantity += t.quantity;
            acc.sales += t.amount;
            acc.reclassified_to_paid += t.reclassified_to_paid;
            acc.paid_with_qr += t.paid_with_qr;
            acc.unpaid_to_paid_qr += t.unpaid_to_paid_qr;
            acc
        })
}

/// Counter cash and profit for a window.
///
/// The opening balance feeds `cash_in_counter` but never `net_profit`: it is
/// capital carried over from the previous window, not money earned in it.
pub fn compute_financial_summary(
    sales: Decimal,
    total_expenses: Decimal,
    opening_balance: Decimal,
) -> (Decimal, Decimal) {
    let cash_in_counter = sales - total_expenses + opening_balance;
    let net_profit = sales - total_expenses;
    (cash_in_counter, net_profit)
}

/// Bank-side cash: digital collections minus expenses paid online
pub fn compute_cash_in_bank(digital_payments: Decimal, online_expenses: Decimal) -> Decimal {
    digital_payments - online_expenses
}

/// Sum of expenses within the window, optionally restricted to one method
pub fn sum_expenses<F>(
    expenses: &[Expense],
    include_date: F,
    method: Option<PaymentMethod>,
) -> Decimal
where
    F: Fn(DateTime<Utc>) -> bool,
{
    expenses
        .iter()
        .filter(|e| include_date(e.date) && method.map_or(true, |m| e.payment_method == m))
        .map(|e| e.amount)
        .sum()
}
