//! Aggregation of records into chart-ready label/count structures.
//!
//! This module transforms a flat record list into:
//! - Single-field category counts (pie, doughnut and bar charts)
//! - Two-field grouped counts (stacked bar charts)
//! - Display colors for each series or segment
//!
//! Every function here is pure: no I/O, no retained state, and the input
//! records are never mutated.

pub mod colors;
pub mod counts;

// Re-export main types and functions
pub use colors::{assign_colors, ColorScheme, Rgba};
pub use counts::{grouped_count, single_field_count, CategoryCounts, GroupSeries, GroupedCounts, Label};
