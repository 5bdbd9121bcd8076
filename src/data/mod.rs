//! Data sources.

pub mod fmp;

pub use fmp::{DEFAULT_BASE_URL, DEFAULT_SYMBOL, FmpClient};
