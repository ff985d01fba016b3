//! Expense service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::Expense;
use crate::services::feed::{ChangeFeed, ChangeOp, EntityKind};
use shared::types::{DateRange, PaymentMethod};

/// Expense service
#[derive(Clone)]
pub struct ExpenseService {
    db: PgPool,
    feed: ChangeFeed,
}

/// Input for recording an expense
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseInput {
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub payment_method: PaymentMethod,
    pub date: Option<DateTime<Utc>>,
}

/// Row for expense queries
#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: Uuid,
    category: String,
    amount: Decimal,
    description: String,
    date: DateTime<Utc>,
    payment_method: String,
}

impl ExpenseRow {
    fn into_expense(self) -> AppResult<Expense> {
        let payment_method = match self.payment_method.as_str() {
            "cash" => PaymentMethod::Cash,
            "online" => PaymentMethod::Online,
            other => {
                return Err(AppError::Internal(format!(
                    "unknown payment method: {other}"
                )))
            }
        };
        Ok(Expense {
            id: self.id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
            payment_method,
        })
    }
}

impl ExpenseService {
    pub fn new(db: PgPool, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// Record an expense
    pub async fn create_expense(&self, input: CreateExpenseInput) -> AppResult<Expense> {
        super::check_input(&input)?;
        shared::validation::validate_expense_amount(input.amount).map_err(|msg| {
            AppError::Validation {
                field: "amount".to_string(),
                message: msg.to_string(),
            }
        })?;

        let date = input.date.unwrap_or_else(Utc::now);
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (category, amount, description, date, payment_method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, category, amount, description, date, payment_method
            "#,
        )
        .bind(&input.category)
        .bind(input.amount)
        .bind(&input.description)
        .bind(date)
        .bind(input.payment_method.as_str())
        .fetch_one(&self.db)
        .await?;

        let expense = row.into_expense()?;
        self.feed
            .record(EntityKind::Expense, ChangeOp::Inserted, expense.id)
            .await?;
        Ok(expense)
    }

    /// List expenses, newest first, optionally limited to a date range
    pub async fn list_expenses(&self, range: Option<DateRange>) -> AppResult<Vec<Expense>> {
        let rows = match range {
            Some(range) => {
                sqlx::query_as::<_, ExpenseRow>(
                    r#"
                    SELECT id, category, amount, description, date, payment_method
                    FROM expenses
                    WHERE date::date BETWEEN $1 AND $2
                    ORDER BY date DESC
                    "#,
                )
                .bind(range.start)
                .bind(range.end)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, ExpenseRow>(
                    r#"
                    SELECT id, category, amount, description, date, payment_method
                    FROM expenses
                    ORDER BY date DESC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        rows.into_iter().map(ExpenseRow::into_expense).collect()
    }

    /// Delete an expense
    pub async fn delete_expense(&self, expense_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Expense".to_string()));
        }

        self.feed
            .record(EntityKind::Expense, ChangeOp::Deleted, expense_id)
            .await?;
        Ok(())
    }
}
