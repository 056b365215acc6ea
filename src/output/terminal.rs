//! Terminal rendering for table pages and charts.

use crate::dashboard::{Chart, ChartKind, TablePage};
use crate::record::{Field, FieldValue};
use colored::*;

/// Widest bar drawn for the largest count
const BAR_WIDTH: usize = 40;

/// Render one table page with aligned columns and a footer
pub fn render_table(page: &TablePage) -> String {
    let cells: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|r| Field::ALL.iter().map(|f| r.get(f).to_string()).collect())
        .collect();

    let widths: Vec<usize> = Field::ALL
        .iter()
        .enumerate()
        .map(|(i, f)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(f.title().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = Field::ALL
        .iter()
        .zip(&widths)
        .map(|(f, w)| format!("{:<w$}", f.title(), w = *w))
        .collect();
    out.push_str(&header.join("  ").bold().to_string());
    out.push('\n');

    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "\n{}  (page {} of {})\n",
        page.summary(),
        page.current,
        page.total_pages.max(1)
    ));
    out
}

/// Render a chart as horizontal bars, one line per label
pub fn render_chart(chart: &Chart) -> String {
    let mut out = format!("\n{}\n", chart.title.bold());

    if chart.labels.is_empty() {
        out.push_str(&"  (no data)\n".dimmed().to_string());
        return out;
    }

    let totals: Vec<u64> = (0..chart.labels.len())
        .map(|i| {
            chart
                .datasets
                .iter()
                .map(|d| d.data.get(i).copied().unwrap_or(0))
                .sum()
        })
        .collect();
    let max = totals.iter().copied().max().unwrap_or(0);
    let grand_total: u64 = totals.iter().sum();
    let label_width = chart
        .labels
        .iter()
        .map(|l| l.to_string().chars().count())
        .max()
        .unwrap_or(0);

    for (i, label) in chart.labels.iter().enumerate() {
        let total = totals[i];
        let bar = "█".repeat(scale(total, max));
        let mut line = format!(
            "  {:<w$}  {} {}",
            label.to_string(),
            bar.cyan(),
            total,
            w = label_width
        );

        match chart.kind {
            ChartKind::Doughnut if grand_total > 0 => {
                line.push_str(&format!(" ({:.1}%)", total as f64 * 100.0 / grand_total as f64));
            }
            ChartKind::StackedBar => {
                let parts: Vec<String> = chart
                    .datasets
                    .iter()
                    .filter_map(|d| {
                        let n = d.data.get(i).copied().unwrap_or(0);
                        (n > 0).then(|| format!("{}: {}", d.label.as_deref().unwrap_or("?"), n))
                    })
                    .collect();
                if !parts.is_empty() {
                    line.push_str(&format!(" [{}]", parts.join(", ")).dimmed().to_string());
                }
            }
            _ => {}
        }

        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Render the available choices for one filter
pub fn render_options(field: Field, values: &[FieldValue]) -> String {
    let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!(
        "{} ({}): {}\n",
        field.title().bold(),
        field.as_str(),
        if joined.is_empty() {
            "-".to_string()
        } else {
            joined.join(", ")
        }
    )
}

fn scale(value: u64, max: u64) -> usize {
    if max == 0 || value == 0 {
        return 0;
    }
    // Any non-zero count gets at least one block
    ((value as f64 / max as f64) * BAR_WIDTH as f64).round().max(1.0) as usize
}
