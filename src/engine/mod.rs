//! Filter/sort engine.
//!
//! Pure functions over the fetched record slice. Nothing here holds state;
//! callers pass the full record set and the constraints every time.

pub mod filter;
pub mod sort;

pub use filter::{filter, filter_with, FilterSet};
pub use sort::sort;
