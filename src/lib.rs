//! `fins` library crate.
//!
//! The binary (`fins`) is a thin wrapper around this library so that:
//!
//! - the filter/sort engine is testable without a terminal or network
//! - the TUI and the one-shot `table` command share one view state

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
