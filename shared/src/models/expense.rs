//! Expense model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PaymentMethod;

/// A recorded shop expense. Created and deleted explicitly, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub category: String,
    /// Always positive
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

impl Expense {
    pub fn is_online(&self) -> bool {
        self.payment_method == PaymentMethod::Online
    }
}
