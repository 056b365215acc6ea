//! Charts command implementation.
//!
//! The charts command:
//! 1. Loads records (cache or source)
//! 2. Builds the dashboard view from the filtered records
//! 3. Writes the JSON chart report and/or prints each chart

use super::load::load_records;
use super::models::ChartsArgs;
use crate::dashboard::{build_view, Pagination};
use crate::output::{render_chart, write_report, DashboardReport};
use crate::utils::config::Config;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the charts command
pub fn execute_charts(config: &Config, args: ChartsArgs) -> Result<()> {
    let start_time = Instant::now();

    let records = load_records(config, &args.load)?;
    let filters = args.filters.to_filters(&records);
    let scheme = args.color_scheme.unwrap_or(config.charts.color_scheme);

    let view = build_view(&records, &filters, Pagination::default(), scheme);
    info!(
        "Built {} charts from {} of {} records",
        view.charts.len(),
        view.filtered_records,
        view.total_records
    );

    for chart in &view.charts {
        debug!("  {}: {} labels, total {}", chart.id, chart.labels.len(), chart.total());
    }

    if let Some(path) = &args.output {
        let report = DashboardReport::from_view(&view, &filters);
        write_report(&report, path).context("Failed to write chart report")?;
        info!("✓ Chart report written to: {}", path.display());
    }

    if args.print_summary || args.output.is_none() {
        for chart in &view.charts {
            print!("{}", render_chart(chart));
        }
    }

    info!("Charts completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}
