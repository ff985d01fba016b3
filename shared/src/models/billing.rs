//! Derived billing types
//!
//! None of these are persisted; they are recomputed in full from a snapshot
//! of products, orders and expenses whenever the caller needs fresh figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Expense, Order, Product};

/// Consistent snapshot of the persisted collections, as handed to the
/// aggregation engine by the persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub expenses: Vec<Expense>,
}

/// Per-product rollup within a date filter window.
///
/// `reclassified_to_paid` is the sum of totals of orders that are *currently
/// paid* within the window: value collected, not value outstanding. Despite
/// the lineage of the figure, it has nothing to do with money still owed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductTotal {
    pub id: Uuid,
    pub name: String,
    /// Units sold in the window, paid or not
    pub quantity: i64,
    /// Gross sales attributable to the product, paid or not
    pub amount: Decimal,
    /// Totals of orders currently paid (intentionally overlaps `amount`)
    pub reclassified_to_paid: Decimal,
    /// Totals of QR-paid orders that were never unpaid
    pub paid_with_qr: Decimal,
    /// Totals of QR-paid orders that had been unpaid first
    pub unpaid_to_paid_qr: Decimal,
}

impl ProductTotal {
    pub fn zero(id: Uuid, name: String) -> Self {
        Self {
            id,
            name,
            quantity: 0,
            amount: Decimal::ZERO,
            reclassified_to_paid: Decimal::ZERO,
            paid_with_qr: Decimal::ZERO,
            unpaid_to_paid_qr: Decimal::ZERO,
        }
    }
}

/// Coordinate-wise sum of all per-product rollups
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OverallTotals {
    pub quantity: i64,
    pub sales: Decimal,
    pub reclassified_to_paid: Decimal,
    pub paid_with_qr: Decimal,
    pub unpaid_to_paid_qr: Decimal,
}

impl OverallTotals {
    /// Value collected through digital channels in the window
    pub fn digital_payments(&self) -> Decimal {
        self.paid_with_qr + self.unpaid_to_paid_qr
    }
}

/// Cash position and profit for the window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialSummary {
    /// sales - expenses + opening balance
    pub cash_in_counter: Decimal,
    /// digital payments - online expenses
    pub cash_in_bank: Decimal,
    /// sales - expenses; opening balance is carried capital, not profit
    pub net_profit: Decimal,
}
