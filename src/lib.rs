//! Fleetboard
//!
//! Filtering, chart aggregation and CSV export for user/vehicle/device
//! record lists.
//!
//! This crate provides the core implementation for the `fleetboard` CLI:
//! records are fetched (or served from a local cache), filtered by a search
//! term and per-field selections, paginated into a table, and grouped into
//! chart-ready label/count structures.
//!
//! ## Getting Started
//!
//! ```bash
//! fleetboard charts --zone A --summary
//! fleetboard table --search asha --csv user_list.csv
//! ```

pub mod aggregator;
pub mod commands;
pub mod dashboard;
pub mod output;
pub mod record;
pub mod source;
pub mod utils;
