#![deny(warnings)]

//! Read-only consumers of a finished series: chart panels, the insights
//! summary and a short console preview.

use trend_core::{Metric, SeriesTable};

mod charts;
mod insights;

pub use charts::{build_panels, peer_users, Axis, ChartPanel, PanelKind, Series, PEER_COUNTRIES};
pub use insights::{pct_change, recommendations, Insights, MILESTONES};

/// Columns shown by [`preview`].
pub const PREVIEW_COLUMNS: [Metric; 4] = [
    Metric::TiktokUsers,
    Metric::ActiveUsers,
    Metric::AdRevenue,
    Metric::EngagementRate,
];

/// Fixed-width text preview of the first `rows` years.
pub fn preview(table: &SeriesTable, rows: usize) -> String {
    let mut out = format!("{:>6}", "Year");
    for m in PREVIEW_COLUMNS {
        out.push_str(&format!(" {:>20}", m.column_name()));
    }
    out.push('\n');
    for r in table.records.iter().take(rows) {
        out.push_str(&format!("{:>6}", r.year));
        for m in PREVIEW_COLUMNS {
            out.push_str(&format!(" {:>20.2}", r.get(m)));
        }
        out.push('\n');
    }
    out
}

/// Format a number with comma thousands separators and `decimals` digits.
///
/// Example:
/// assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
