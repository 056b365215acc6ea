//! Group-by-and-count over categorical record fields.
//!
//! Labels keep first-seen order. A missing or null value becomes the single
//! `Unknown` label. Values are compared exactly, with no type coercion.

use super::colors::{assign_colors, ColorScheme, Rgba};
use crate::record::{FieldValue, Record};
use crate::utils::config::UNKNOWN_LABEL;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A category on a chart axis
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Bucket for missing and null values
    Unknown,
    Value(FieldValue),
}

impl Label {
    pub fn of(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => Self::Unknown,
            other => Self::Value(other.clone()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<FieldValue> for Label {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => Self::Unknown,
            other => Self::Value(other),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str(UNKNOWN_LABEL),
            Self::Value(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unknown => serializer.serialize_str(UNKNOWN_LABEL),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Label {
    /// `"Unknown"` reads back as the unknown bucket
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = FieldValue::deserialize(deserializer)?;
        Ok(match value {
            FieldValue::String(ref s) if s == UNKNOWN_LABEL => Self::Unknown,
            other => Self::from(other),
        })
    }
}

/// Labels paired with one count series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub labels: Vec<Label>,
    pub counts: Vec<u64>,
}

impl CategoryCounts {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Count for one label, zero if absent
    pub fn count_of(&self, label: &Label) -> u64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    /// Pairs sorted by count (descending), ties keep label order
    pub fn ranked(&self) -> Vec<(&Label, u64)> {
        let mut pairs: Vec<(&Label, u64)> =
            self.labels.iter().zip(self.counts.iter().copied()).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

/// One series of a grouped aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSeries {
    pub label: Label,
    pub counts: Vec<u64>,
    pub color: Rgba,
}

/// Outer labels, global inner labels, and one series per outer label
/// whose counts are aligned with `inner_labels`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedCounts {
    pub labels: Vec<Label>,
    pub inner_labels: Vec<Label>,
    pub series: Vec<GroupSeries>,
}

impl GroupedCounts {
    pub fn total(&self) -> u64 {
        self.series.iter().flat_map(|s| s.counts.iter()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Series for one outer label
    pub fn series_for(&self, label: &Label) -> Option<&GroupSeries> {
        self.series.iter().find(|s| &s.label == label)
    }

    /// Flip orientation: one series per inner label, aligned with the outer
    /// labels. This is the dataset layout a stacked bar chart consumes, with
    /// the outer labels on the category axis.
    pub fn transpose(&self, scheme: ColorScheme) -> Vec<GroupSeries> {
        let colors = assign_colors(self.inner_labels.len(), scheme);
        self.inner_labels
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(j, (label, color))| GroupSeries {
                label: label.clone(),
                counts: self.series.iter().map(|s| s.counts[j]).collect(),
                color,
            })
            .collect()
    }
}

/// Distinct labels in first-seen order plus each record's label index
fn index_labels(records: &[Record], field: &str) -> (Vec<Label>, Vec<usize>) {
    let mut labels: Vec<Label> = Vec::new();
    let mut positions: HashMap<Label, usize> = HashMap::new();
    let mut assignment = Vec::with_capacity(records.len());

    for record in records {
        let label = Label::of(record.get(field));
        let idx = match positions.get(&label) {
            Some(&idx) => idx,
            None => {
                let idx = labels.len();
                positions.insert(label.clone(), idx);
                labels.push(label);
                idx
            }
        };
        assignment.push(idx);
    }

    (labels, assignment)
}

/// Count records per distinct value of `field`
///
/// **Public** - feeds pie, doughnut and bar charts
///
/// # Returns
/// Labels in first-seen order with `counts[i]` records carrying `labels[i]`.
/// Empty input yields empty labels and counts.
pub fn single_field_count(records: &[Record], field: impl AsRef<str>) -> CategoryCounts {
    let field = field.as_ref();
    let (labels, assignment) = index_labels(records, field);

    let mut counts = vec![0u64; labels.len()];
    for idx in assignment {
        counts[idx] += 1;
    }

    debug!(
        "Counted {} records into {} '{}' labels",
        records.len(),
        labels.len(),
        field
    );

    CategoryCounts { labels, counts }
}

/// Count records per (outer, inner) value pair
///
/// **Public** - feeds stacked bar charts
///
/// The inner label set is computed across all records, not per outer
/// group, so every series has the same length and legend.
///
/// # Returns
/// A rectangular structure: `series[o].counts[j]` is the number of records
/// with `outer == labels[o]` and `inner == inner_labels[j]`.
pub fn grouped_count(
    records: &[Record],
    outer: impl AsRef<str>,
    inner: impl AsRef<str>,
    scheme: ColorScheme,
) -> GroupedCounts {
    let (outer, inner) = (outer.as_ref(), inner.as_ref());
    if records.is_empty() {
        return GroupedCounts::default();
    }

    let (labels, outer_idx) = index_labels(records, outer);
    let (inner_labels, inner_idx) = index_labels(records, inner);

    let mut matrix = vec![vec![0u64; inner_labels.len()]; labels.len()];
    for (o, i) in outer_idx.into_iter().zip(inner_idx) {
        matrix[o][i] += 1;
    }

    let colors = assign_colors(labels.len(), scheme);
    let series = labels
        .iter()
        .cloned()
        .zip(matrix)
        .zip(colors)
        .map(|((label, counts), color)| GroupSeries {
            label,
            counts,
            color,
        })
        .collect();

    debug!(
        "Grouped {} records into {} '{}' x {} '{}' cells",
        records.len(),
        labels.len(),
        outer,
        inner_labels.len(),
        inner
    );

    GroupedCounts {
        labels,
        inner_labels,
        series,
    }
}
