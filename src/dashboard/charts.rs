//! Chart catalogue and Chart.js-shaped chart data.

use crate::aggregator::{
    assign_colors, grouped_count, single_field_count, CategoryCounts, ColorScheme, Label, Rgba,
};
use crate::record::{Field, Record};
use log::debug;
use serde::{Deserialize, Serialize};

/// How a chart is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    StackedBar,
    Doughnut,
    Bar,
}

/// Which fields a chart groups by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Single(Field),
    Grouped { outer: Field, inner: Field },
}

/// Static description of one dashboard chart
#[derive(Debug, Clone, Copy)]
pub struct ChartDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub dimension: Dimension,
    pub dataset_label: Option<&'static str>,
}

/// The charts shown on the dashboard, in display order
pub const CHARTS: [ChartDefinition; 7] = [
    ChartDefinition {
        id: "vehicle-cc-by-zone",
        title: "Vehicle CC Distribution Between Zones",
        kind: ChartKind::StackedBar,
        dimension: Dimension::Grouped {
            outer: Field::Zone,
            inner: Field::VehicleCc,
        },
        dataset_label: None,
    },
    ChartDefinition {
        id: "sdk-int-by-zone",
        title: "SDK Int Distribution Between Zones",
        kind: ChartKind::StackedBar,
        dimension: Dimension::Grouped {
            outer: Field::Zone,
            inner: Field::SdkInt,
        },
        dataset_label: None,
    },
    ChartDefinition {
        id: "device-brand",
        title: "Device Brand Distribution",
        kind: ChartKind::Doughnut,
        dimension: Dimension::Single(Field::DeviceBrand),
        dataset_label: None,
    },
    ChartDefinition {
        id: "vehicle-brand",
        title: "Vehicle Brand Distribution",
        kind: ChartKind::Doughnut,
        dimension: Dimension::Single(Field::VehicleBrand),
        dataset_label: None,
    },
    ChartDefinition {
        id: "vehicle-cc",
        title: "Vehicle CC Distribution",
        kind: ChartKind::Doughnut,
        dimension: Dimension::Single(Field::VehicleCc),
        dataset_label: None,
    },
    ChartDefinition {
        id: "vehicles-by-brand",
        title: "Vehicle Distribution by Brand",
        kind: ChartKind::Bar,
        dimension: Dimension::Single(Field::VehicleBrand),
        dataset_label: Some("Total Vehicles"),
    },
    ChartDefinition {
        id: "devices-by-sdk",
        title: "Device Distribution by SDK Version",
        kind: ChartKind::Bar,
        dimension: Dimension::Single(Field::SdkInt),
        dataset_label: Some("Total Devices"),
    },
];

/// One dataset as consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub data: Vec<u64>,

    /// One color per data point
    pub background_color: Vec<Rgba>,
}

/// Chart-ready labels and datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<Label>,
    pub datasets: Vec<Dataset>,
}

impl Chart {
    /// Sum of every data point across datasets
    pub fn total(&self) -> u64 {
        self.datasets.iter().flat_map(|d| d.data.iter()).sum()
    }
}

impl ChartDefinition {
    /// Aggregate `records` into this chart
    pub fn build(&self, records: &[Record], scheme: ColorScheme) -> Chart {
        let (labels, datasets) = match self.dimension {
            Dimension::Single(field) => {
                let counts = single_field_count(records, field);
                single_datasets(counts, self.dataset_label, scheme)
            }
            Dimension::Grouped { outer, inner } => {
                let grouped = grouped_count(records, outer, inner, scheme);
                let point_count = grouped.labels.len();
                // Category axis is the outer field, one stacked dataset per inner value
                let datasets = grouped
                    .transpose(scheme)
                    .into_iter()
                    .map(|series| Dataset {
                        label: Some(format!("{} {}", inner.title(), series.label)),
                        data: series.counts,
                        background_color: vec![series.color; point_count],
                    })
                    .collect();
                (grouped.labels, datasets)
            }
        };

        Chart {
            id: self.id.to_string(),
            title: self.title.to_string(),
            kind: self.kind,
            labels,
            datasets,
        }
    }
}

fn single_datasets(
    counts: CategoryCounts,
    dataset_label: Option<&str>,
    scheme: ColorScheme,
) -> (Vec<Label>, Vec<Dataset>) {
    if counts.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let dataset = Dataset {
        label: dataset_label.map(str::to_string),
        background_color: assign_colors(counts.labels.len(), scheme),
        data: counts.counts,
    };
    (counts.labels, vec![dataset])
}

/// Build every catalogue chart from the same record set
pub fn build_charts(records: &[Record], scheme: ColorScheme) -> Vec<Chart> {
    debug!("Building {} charts from {} records", CHARTS.len(), records.len());
    CHARTS.iter().map(|def| def.build(records, scheme)).collect()
}
