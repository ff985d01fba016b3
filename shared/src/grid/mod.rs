//! Spreadsheet grid feature: sparse cell store, formula evaluation and the
//! billing-to-grid export layout.

mod cell;
mod export;
mod formula;

pub use cell::*;
pub use export::*;
pub use formula::*;
