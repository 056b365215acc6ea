//! Dashboard view model: filtering, pagination and the chart catalogue.
//!
//! The whole view is a pure function of (records, filters, pagination):
//! `build_view` derives the filtered table page and every chart from one
//! filtered record set. `DashboardState` tracks revisions so stale views can
//! be dropped by `ViewSlot`.

pub mod charts;
pub mod filter;
pub mod state;
pub mod table;
pub mod view;

// Re-export main types and functions
pub use charts::{build_charts, Chart, ChartDefinition, ChartKind, Dataset, Dimension, CHARTS};
pub use filter::{apply_filters, filter_options, resolve_filter_value, Filters};
pub use state::{DashboardState, ViewSlot};
pub use table::{paginate, Pagination, TablePage};
pub use view::{build_view, DashboardView};
