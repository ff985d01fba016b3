//! HTTP handlers for the spreadsheet grid
//!
//! The grid is client state: every request carries the full grid in, and the
//! apply endpoint hands the mutated grid back. The server contributes the
//! formula engine and the cell operations, nothing is persisted here.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use shared::grid::{evaluate_formula, CellPatch, CellValue, Grid};
use shared::validation::validate_cell_id;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub grid: Grid,
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub value: String,
}

/// One cell operation applied in sequence by [`apply`]
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum GridOp {
    Set { id: String, patch: CellPatch },
    Clear { id: String },
    Copy { id: String },
    Cut { id: String },
    Paste { id: String },
    Enter { id: String, input: String },
}

impl GridOp {
    fn cell_id(&self) -> &str {
        match self {
            GridOp::Set { id, .. }
            | GridOp::Clear { id }
            | GridOp::Copy { id }
            | GridOp::Cut { id }
            | GridOp::Paste { id }
            | GridOp::Enter { id, .. } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub grid: Grid,
    pub ops: Vec<GridOp>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub grid: Grid,
}

/// Evaluate operator input against the supplied grid without mutating it
pub async fn evaluate(Json(request): Json<EvaluateRequest>) -> AppResult<Json<EvaluateResponse>> {
    let value = evaluate_formula(&request.input, &request.grid)?;
    Ok(Json(EvaluateResponse {
        value: value.display(),
    }))
}

/// Apply a batch of cell operations to the supplied grid.
///
/// Operations run in order; the first failure aborts the batch and the
/// caller keeps its original grid.
pub async fn apply(Json(request): Json<ApplyRequest>) -> AppResult<Json<ApplyResponse>> {
    let mut grid = request.grid;
    for op in request.ops {
        validate_cell_id(op.cell_id()).map_err(|msg| AppError::Validation {
            field: "id".to_string(),
            message: msg.to_string(),
        })?;
        match op {
            GridOp::Set { id, patch } => grid.set(&id, patch),
            GridOp::Clear { id } => grid.clear(&id),
            GridOp::Copy { id } => {
                grid.copy(&id);
            }
            GridOp::Cut { id } => {
                grid.cut(&id);
            }
            GridOp::Paste { id } => {
                grid.paste(&id);
            }
            GridOp::Enter { id, input } => {
                let _: CellValue = grid.enter(&id, &input)?;
            }
        }
    }
    Ok(Json(ApplyResponse { grid }))
}
