//! Versioned JSON schema for exported chart data.

use crate::dashboard::{Chart, DashboardView, Filters};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level chart report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// Records before filtering
    pub total_records: usize,

    /// Records the charts were computed from
    pub filtered_records: usize,

    /// Filters that were active
    pub filters: Filters,

    pub charts: Vec<Chart>,
}

impl DashboardReport {
    pub fn from_view(view: &DashboardView, filters: &Filters) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            total_records: view.total_records,
            filtered_records: view.filtered_records,
            filters: filters.clone(),
            charts: view.charts.clone(),
        }
    }

    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }
}
