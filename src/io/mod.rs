//! Input/output helpers.
//!
//! - displayed-view exports (CSV/JSON) (`export`)

pub mod export;

pub use export::*;
