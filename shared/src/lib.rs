//! Shared types and core logic for the Retail Back-Office Platform
//!
//! This crate contains the domain models, the billing aggregation engine and
//! the spreadsheet grid used by the backend, the WASM dashboard bindings and
//! tests. Everything in here is pure: no I/O, no async, no database access.

pub mod billing;
pub mod grid;
pub mod models;
pub mod types;
pub mod validation;

pub use billing::*;
pub use models::*;
pub use types::*;
