//! Domain models for the Retail Back-Office Platform

mod billing;
mod expense;
mod order;
mod product;

pub use billing::*;
pub use expense::*;
pub use order::*;
pub use product::*;
