//! Revisioned dashboard state and last-write-wins view publication.

use super::filter::Filters;
use super::table::Pagination;
use super::view::{build_view, DashboardView};
use crate::aggregator::ColorScheme;
use crate::record::{Field, FieldValue, Record};
use log::debug;
use std::sync::Mutex;

/// Inputs of the dashboard.
///
/// Every change bumps `revision`. Changes to the records, the search term or
/// the field filters also send the table back to page 1.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    records: Vec<Record>,
    filters: Filters,
    pagination: Pagination,
    scheme: ColorScheme,
    revision: u64,
}

impl DashboardState {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination.page_size = page_size;
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.filters_changed();
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
        self.filters_changed();
    }

    pub fn set_filter(&mut self, field: Field, value: Option<FieldValue>) {
        self.filters.set_field(field, value);
        self.filters_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.filters_changed();
    }

    pub fn set_page(&mut self, pagination: Pagination) {
        self.pagination = pagination;
        self.revision += 1;
    }

    fn filters_changed(&mut self) {
        self.pagination = self.pagination.first_page();
        self.revision += 1;
        debug!("Dashboard state now at revision {}", self.revision);
    }

    /// Compute the view for the current revision
    pub fn view(&self) -> DashboardView {
        let mut view = build_view(&self.records, &self.filters, self.pagination, self.scheme);
        view.revision = self.revision;
        view
    }
}

/// Holds the most recently published view.
///
/// When recomputations overlap, a view computed from an older revision than
/// the one already published is discarded.
#[derive(Debug, Default)]
pub struct ViewSlot {
    current: Mutex<Option<DashboardView>>,
}

impl ViewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `view` is stale and was dropped
    pub fn publish(&self, view: DashboardView) -> bool {
        let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = slot.as_ref() {
            if existing.revision > view.revision {
                debug!(
                    "Dropping stale view r{} (published r{})",
                    view.revision, existing.revision
                );
                return false;
            }
        }
        *slot = Some(view);
        true
    }

    pub fn current(&self) -> Option<DashboardView> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn revision(&self) -> Option<u64> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|v| v.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        (0..30)
            .map(|i| {
                Record::new()
                    .with("username", format!("user{}", i))
                    .with("zone", if i % 2 == 0 { "A" } else { "B" })
            })
            .collect()
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = DashboardState::new(records());
        state.set_page(Pagination::new(3, 10));
        assert_eq!(state.pagination().current, 3);

        state.set_filter(Field::Zone, Some(FieldValue::from("A")));
        assert_eq!(state.pagination().current, 1);
        assert_eq!(state.revision(), 2);
    }

    #[test]
    fn test_view_carries_revision() {
        let mut state = DashboardState::new(records());
        state.set_search("user1");
        let view = state.view();
        assert_eq!(view.revision, 1);
        // user1, user10..user19
        assert_eq!(view.filtered_records, 11);
    }

    #[test]
    fn test_slot_drops_stale_view() {
        let mut state = DashboardState::new(records());
        let stale = state.view();
        state.set_filter(Field::Zone, Some(FieldValue::from("B")));
        let fresh = state.view();

        let slot = ViewSlot::new();
        assert!(slot.publish(fresh));
        assert!(!slot.publish(stale));
        assert_eq!(slot.revision(), Some(1));
    }
}
