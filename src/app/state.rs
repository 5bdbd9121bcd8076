//! View state shared by the CLI and TUI front-ends.
//!
//! The full record set is written once, by the first successful fetch. The
//! displayed view is always recomputed from `(records, applied)` on an explicit
//! action; nothing is derived incrementally from the previous view. Front-ends
//! only edit `draft` and dispatch actions.

use crate::domain::{Constraints, FinancialRecord, SortColumn, SortOrder};
use crate::engine::{self, FilterSet};
use crate::error::FetchError;

/// User-triggered (or fetch-triggered) state transitions.
#[derive(Debug, Clone)]
pub enum Action {
    FetchCompleted(Result<Vec<FinancialRecord>, FetchError>),
    /// Commit the draft date/revenue/net-income bounds.
    ApplyFilters,
    /// Commit the draft sort column/order.
    ApplySort,
}

/// Constraints that have been committed by an action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedView {
    pub filters: Constraints,
    pub sort: Option<(SortColumn, SortOrder)>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    records: Vec<FinancialRecord>,
    loaded: bool,
    displayed: Vec<FinancialRecord>,
    /// What the user is currently typing; not applied until an action.
    pub draft: Constraints,
    applied: AppliedView,
    status: String,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            status: "Fetching income statements...".to_string(),
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn displayed(&self) -> &[FinancialRecord] {
        &self.displayed
    }

    pub fn applied(&self) -> &AppliedView {
        &self.applied
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::FetchCompleted(Ok(records)) => {
                if self.loaded {
                    tracing::warn!("ignoring second fetch result; records are already loaded");
                    return;
                }
                self.loaded = true;
                self.records = records;
                self.recompute();
                self.status = format!("Loaded {} records.", self.records.len());
            }
            Action::FetchCompleted(Err(err)) => {
                // The current view stays as it was.
                tracing::error!(error = %err, "fetch failed");
                self.status = err.to_string();
            }
            Action::ApplyFilters => {
                // Sort fields of `filters` are ignored; the sort is committed separately.
                self.applied.filters = self.draft.clone();
                self.recompute();
                let active = FilterSet::parse(&self.applied.filters).active_count();
                tracing::debug!(active, shown = self.displayed.len(), "applied filters");
                self.status = format!(
                    "Filters applied ({active} active): {} of {} records.",
                    self.displayed.len(),
                    self.records.len()
                );
            }
            Action::ApplySort => {
                let (column, order) = (self.draft.sort_column, self.draft.sort_order);
                self.applied.sort = Some((column, order));
                self.recompute();
                tracing::debug!(?column, ?order, "applied sort");
                self.status = format!("Sorted by {} ({}).", column.display_name(), order.display_name());
            }
        }
    }

    fn recompute(&mut self) {
        self.displayed = project(&self.records, &self.applied);
    }
}

/// Filter, then sort if a sort has been applied.
pub fn project(records: &[FinancialRecord], applied: &AppliedView) -> Vec<FinancialRecord> {
    let filtered = engine::filter(records, &applied.filters);
    match applied.sort {
        Some((column, order)) => engine::sort(&filtered, column, order),
        None => filtered,
    }
}
