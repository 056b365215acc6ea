use crate::aggregator::ColorScheme;
use crate::dashboard::{resolve_filter_value, Filters};
use crate::record::{Field, Record};
use std::path::PathBuf;

/// How records are obtained for a command
#[derive(Debug, Clone, Default)]
pub struct LoadArgs {
    /// Overrides the configured source (URL or file path)
    pub source: Option<String>,

    /// Ignore the cache and fetch again
    pub refresh: bool,

    /// Neither read nor write the cache
    pub no_cache: bool,

    /// Convert integer strings to numbers at ingest
    pub normalize_numbers: bool,
}

/// Search term and per-field selections as typed by the user
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub search: Option<String>,
    pub zone: Option<String>,
    pub device_brand: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_cc: Option<String>,
    pub sdk_int: Option<String>,
}

impl FilterArgs {
    /// Non-empty field selections
    pub fn selections(&self) -> Vec<(Field, &str)> {
        [
            (Field::Zone, &self.zone),
            (Field::DeviceBrand, &self.device_brand),
            (Field::VehicleBrand, &self.vehicle_brand),
            (Field::VehicleCc, &self.vehicle_cc),
            (Field::SdkInt, &self.sdk_int),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (field, v))
        })
        .collect()
    }

    /// Resolve typed text against the loaded records
    pub fn to_filters(&self, records: &[Record]) -> Filters {
        let mut filters = Filters::new().with_search(self.search.clone().unwrap_or_default());
        for (field, text) in self.selections() {
            filters.set_field(field, Some(resolve_filter_value(records, field, text)));
        }
        filters
    }
}

/// Arguments for the table command
#[derive(Debug, Clone)]
pub struct TableArgs {
    pub load: LoadArgs,
    pub filters: FilterArgs,

    /// 1-based page number
    pub page: usize,

    /// Rows per page (None = configured default)
    pub page_size: Option<usize>,

    /// Export every filtered row (not just the page) to this CSV file
    pub csv: Option<PathBuf>,
}

impl Default for TableArgs {
    fn default() -> Self {
        Self {
            load: LoadArgs::default(),
            filters: FilterArgs::default(),
            page: 1,
            page_size: None,
            csv: None,
        }
    }
}

/// Arguments for the charts command
#[derive(Debug, Clone, Default)]
pub struct ChartsArgs {
    pub load: LoadArgs,
    pub filters: FilterArgs,

    /// Output path for the JSON chart report (optional)
    pub output: Option<PathBuf>,

    /// Print charts to stdout
    pub print_summary: bool,

    /// Overrides the configured color scheme
    pub color_scheme: Option<ColorScheme>,
}
