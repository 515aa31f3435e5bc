//! The eight analysis panels, built as plain data for any renderer.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trend_core::{Metric, SeriesTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Line,
    StackedBar,
    /// Bars on the primary axis, lines on the secondary axis.
    BarWithLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub color: Option<String>,
    pub axis: Axis,
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
    pub title: String,
    pub y_label: String,
    pub kind: PanelKind,
    pub series: Vec<Series>,
}

/// Hardcoded peers for the comparison panel, with their users base.
pub const PEER_COUNTRIES: [(&str, f64); 5] = [
    ("United States", 100_000_000.0),
    ("China", 600_000_000.0),
    ("India", 200_000_000.0),
    ("Brazil", 82_000_000.0),
    ("Indonesia", 99_000_000.0),
];

const PEER_FALLBACK_USERS: f64 = 50_000_000.0;
const PEER_GROWTH: f64 = 0.2;

const RED: &str = "#FF0051";
const CYAN: &str = "#25F4EE";
const TEAL: &str = "#69C9D0";
const AQUA: &str = "#00F2EA";

fn series(table: &SeriesTable, metric: Metric, label: &str, color: &str) -> Series {
    Series {
        label: label.to_string(),
        color: Some(color.to_string()),
        axis: Axis::Primary,
        values: table.column(metric),
    }
}

fn panel(title: &str, y_label: &str, kind: PanelKind, series: Vec<Series>) -> ChartPanel {
    ChartPanel {
        title: title.to_string(),
        y_label: y_label.to_string(),
        kind,
        series,
    }
}

/// Simplified peer trajectory: `base × (1 + 0.2 × i)` over `years` points.
pub fn peer_users(country: &str, years: usize) -> Vec<f64> {
    let base = PEER_COUNTRIES
        .iter()
        .find(|(name, _)| *name == country)
        .map_or(PEER_FALLBACK_USERS, |(_, users)| *users);
    (0..years)
        .map(|i| base * (1.0 + PEER_GROWTH * i as f64))
        .collect()
}

/// Build the eight panels for a finished table. The table is not modified.
pub fn build_panels(table: &SeriesTable) -> Vec<ChartPanel> {
    let mut growth = vec![series(table, Metric::UserGrowthRate, "Growth rate", RED)];
    let mut virality = series(table, Metric::ViralityScore, "Virality score", CYAN);
    virality.axis = Axis::Secondary;
    growth.push(virality);

    let mut peers: Vec<Series> = PEER_COUNTRIES
        .iter()
        .filter(|(name, _)| *name != table.country)
        .map(|(name, _)| Series {
            label: name.to_string(),
            color: None,
            axis: Axis::Primary,
            values: peer_users(name, table.len()),
        })
        .collect();
    peers.push(series(table, Metric::TiktokUsers, &table.country, RED));
    debug!(country = %table.country, peers = peers.len() - 1, "building chart panels");

    vec![
        panel(
            "User evolution",
            "Users",
            PanelKind::Line,
            vec![
                series(table, Metric::TiktokUsers, "Total users", RED),
                series(table, Metric::ActiveUsers, "Active users", AQUA),
            ],
        ),
        panel(
            "Revenue evolution (M$)",
            "Revenue (M$)",
            PanelKind::Line,
            vec![
                series(table, Metric::AdRevenue, "Ad revenue", RED),
                series(table, Metric::ECommerceRevenue, "E-commerce revenue", CYAN),
                series(table, Metric::CreatorEarnings, "Creator earnings", TEAL),
            ],
        ),
        panel(
            "Engagement",
            "Rate / minutes",
            PanelKind::Line,
            vec![
                series(table, Metric::EngagementRate, "Engagement rate", RED),
                series(table, Metric::TimeSpentPerUser, "Time spent per day (min)", CYAN),
            ],
        ),
        panel(
            "Users by age",
            "Users",
            PanelKind::StackedBar,
            vec![
                series(table, Metric::UsersUnder25, "Under 25", RED),
                series(table, Metric::Users25To34, "25-34", CYAN),
                series(table, Metric::UsersOver35, "35 and over", TEAL),
            ],
        ),
        panel(
            "Content",
            "Count",
            PanelKind::Line,
            vec![
                series(table, Metric::VideosUploaded, "Videos uploaded", RED),
                series(table, Metric::LikesCount, "Likes", CYAN),
                series(table, Metric::SharesCount, "Shares", TEAL),
            ],
        ),
        panel("User growth", "Growth rate", PanelKind::BarWithLine, growth),
        panel(
            "Revenue breakdown (M$)",
            "Revenue (M$)",
            PanelKind::StackedBar,
            vec![
                series(table, Metric::AdRevenue, "Advertising", RED),
                series(table, Metric::ECommerceRevenue, "E-commerce", CYAN),
                series(table, Metric::CreatorEarnings, "Creators", TEAL),
            ],
        ),
        panel(
            "International comparison",
            "Users",
            PanelKind::Line,
            peers,
        ),
    ]
}
