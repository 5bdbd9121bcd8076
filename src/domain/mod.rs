//! Domain types used throughout the app.
//!
//! This module defines:
//!
//! - the fetched record shape (`FinancialRecord`)
//! - user constraints (`Constraints`, `DateRange`, `AmountRange`)
//! - sort selectors (`SortColumn`, `SortOrder`)

pub mod types;

pub use types::*;
