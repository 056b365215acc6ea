//! The pure reducer from dashboard inputs to a renderable view.

use super::charts::{build_charts, Chart};
use super::filter::{apply_filters, Filters};
use super::table::{paginate, Pagination, TablePage};
use crate::aggregator::ColorScheme;
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Everything the UI layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Revision of the state this view was computed from
    pub revision: u64,
    pub total_records: usize,
    pub filtered_records: usize,
    pub table: TablePage,
    pub charts: Vec<Chart>,
}

/// Filter once, then derive the table page and all charts from the result
pub fn build_view(
    records: &[Record],
    filters: &Filters,
    pagination: Pagination,
    scheme: ColorScheme,
) -> DashboardView {
    let filtered = apply_filters(records, filters);

    DashboardView {
        revision: 0,
        total_records: records.len(),
        filtered_records: filtered.len(),
        table: paginate(&filtered, pagination),
        charts: build_charts(&filtered, scheme),
    }
}
