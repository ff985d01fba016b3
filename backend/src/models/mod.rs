//! Database models for the Retail Back-Office Platform
//!
//! Everything persisted lives in the shared crate so the wasm dashboard can
//! reuse it; this module only re-exports.

pub use shared::models::*;
