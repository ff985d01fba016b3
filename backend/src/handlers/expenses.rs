//! HTTP handlers for expense endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Expense;
use crate::services::expenses::{CreateExpenseInput, ExpenseService};
use crate::AppState;
use shared::types::DateRange;

/// Optional date window for expense listings
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ExpenseListQuery {
    fn into_range(self) -> AppResult<Option<DateRange>> {
        match (self.start, self.end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) if start <= end => Ok(Some(DateRange { start, end })),
            (Some(_), Some(_)) => Err(AppError::Validation {
                field: "start".to_string(),
                message: "Start date must not be after end date".to_string(),
            }),
            _ => Err(AppError::Validation {
                field: "start".to_string(),
                message: "Both start and end dates are required for a range".to_string(),
            }),
        }
    }
}

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<CreateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db, state.feed);
    let expense = service.create_expense(input).await?;
    Ok(Json(expense))
}

/// List expenses, optionally limited to a date range
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseListQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let service = ExpenseService::new(state.db, state.feed);
    let expenses = service.list_expenses(query.into_range()?).await?;
    Ok(Json(expenses))
}

/// Delete an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ExpenseService::new(state.db, state.feed);
    service.delete_expense(expense_id).await?;
    Ok(Json(()))
}
