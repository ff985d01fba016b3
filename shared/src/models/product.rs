//! Catalog product model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product in the shop catalog.
///
/// Referenced (never owned) by orders via `product_id`. Stock changes only
/// through explicit adjustment; the price an order was created at is frozen
/// into the order's `total`, so later price changes never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Unit price in currency units, never negative
    pub price: Decimal,
    /// Units on hand
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}
