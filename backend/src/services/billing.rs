//! Billing service
//!
//! Loads a consistent snapshot from the database and feeds it to the pure
//! aggregation engine in the shared crate. The report is recomputed from
//! scratch on every request; nothing here is cached or stored.

use chrono::{DateTime, Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Expense, FinancialSummary, Order, OverallTotals, Product, ProductTotal, Snapshot,
};
use shared::billing;
use shared::types::{DateRange, PaymentMethod};

/// Date window requested by the caller
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Today,
    Range,
}

/// Query parameters for the billing report
#[derive(Debug, Default, Deserialize)]
pub struct BillingFilter {
    #[serde(default)]
    pub period: Period,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub opening_balance: Option<Decimal>,
}

impl BillingFilter {
    /// Turn the filter into a date predicate over order and expense timestamps.
    ///
    /// Timestamps are compared in the server's local calendar, matching how
    /// the shop staff reason about "today".
    pub fn date_predicate(&self) -> AppResult<Box<dyn Fn(DateTime<Utc>) -> bool + Send + Sync>> {
        match self.period {
            Period::All => Ok(Box::new(|_| true)),
            Period::Today => {
                let today = Local::now().date_naive();
                Ok(Box::new(move |d| {
                    d.with_timezone(&Local).date_naive() == today
                }))
            }
            Period::Range => {
                let (start, end) = match (self.start, self.end) {
                    (Some(start), Some(end)) if start <= end => (start, end),
                    (Some(_), Some(_)) => {
                        return Err(AppError::Validation {
                            field: "start".to_string(),
                            message: "Start date must not be after end date".to_string(),
                        })
                    }
                    _ => {
                        return Err(AppError::Validation {
                            field: "period".to_string(),
                            message: "Range period requires both start and end dates".to_string(),
                        })
                    }
                };
                let range = DateRange { start, end };
                Ok(Box::new(move |d| {
                    range.contains(d.with_timezone(&Local).date_naive())
                }))
            }
        }
    }
}

/// Complete billing report for one filter window
#[derive(Debug, Clone, Serialize)]
pub struct BillingReport {
    pub product_totals: Vec<ProductTotal>,
    pub overall: OverallTotals,
    pub financial: FinancialSummary,
    pub total_expenses: Decimal,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    stock: i32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    customer_name: String,
    product_id: Uuid,
    quantity: i32,
    total: Decimal,
    date: DateTime<Utc>,
    is_paid: bool,
    was_unpaid: bool,
    paid_with_qr: bool,
}

#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: Uuid,
    category: String,
    amount: Decimal,
    description: String,
    date: DateTime<Utc>,
    payment_method: String,
}

/// Billing service
#[derive(Clone)]
pub struct BillingService {
    db: PgPool,
}

impl BillingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Load all three collections in one go.
    ///
    /// Products come back in creation order so the report rows line up with
    /// the catalog as staff entered it.
    pub async fn snapshot(&self) -> AppResult<Snapshot> {
        let products = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, stock, created_at FROM products ORDER BY created_at ASC",
        )
        .fetch_all(&self.db)
        .await?;

        let orders = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_name, product_id, quantity, total, date,
                   is_paid, was_unpaid, paid_with_qr
            FROM orders
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let expenses = sqlx::query_as::<_, ExpenseRow>(
            "SELECT id, category, amount, description, date, payment_method FROM expenses",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(Snapshot {
            products: products.into_iter().map(Product::from).collect(),
            orders: orders.into_iter().map(Order::from).collect(),
            expenses: expenses
                .into_iter()
                .map(Expense::try_from)
                .collect::<AppResult<Vec<_>>>()?,
        })
    }

    /// Compute the full report for the given window.
    ///
    /// `opening_balance` falls back to the configured default when the filter
    /// leaves it unset.
    pub async fn summary(
        &self,
        filter: &BillingFilter,
        default_opening_balance: Decimal,
    ) -> AppResult<BillingReport> {
        let include_date = filter.date_predicate()?;
        let snapshot = self.snapshot().await?;
        let opening_balance = filter.opening_balance.unwrap_or(default_opening_balance);

        let product_totals =
            billing::aggregate_product_totals(&snapshot.products, &snapshot.orders, &include_date);
        let overall = billing::aggregate_overall_totals(&product_totals);

        let total_expenses = billing::sum_expenses(&snapshot.expenses, &include_date, None);
        let online_expenses = billing::sum_expenses(
            &snapshot.expenses,
            &include_date,
            Some(PaymentMethod::Online),
        );

        let (cash_in_counter, net_profit) =
            billing::compute_financial_summary(overall.sales, total_expenses, opening_balance);
        let cash_in_bank =
            billing::compute_cash_in_bank(overall.digital_payments(), online_expenses);

        Ok(BillingReport {
            product_totals,
            overall,
            financial: FinancialSummary {
                cash_in_counter,
                cash_in_bank,
                net_profit,
            },
            total_expenses,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            customer_name: row.customer_name,
            product_id: row.product_id,
            quantity: row.quantity,
            total: row.total,
            date: row.date,
            is_paid: row.is_paid,
            was_unpaid: row.was_unpaid,
            paid_with_qr: row.paid_with_qr,
        }
    }
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = AppError;

    fn try_from(row: ExpenseRow) -> AppResult<Self> {
        let payment_method = match row.payment_method.as_str() {
            "cash" => PaymentMethod::Cash,
            "online" => PaymentMethod::Online,
            other => {
                return Err(AppError::Internal(format!(
                    "unknown payment method: {other}"
                )))
            }
        };
        Ok(Expense {
            id: row.id,
            category: row.category,
            amount: row.amount,
            description: row.description,
            date: row.date,
            payment_method,
        })
    }
}
