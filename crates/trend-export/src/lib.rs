#![deny(warnings)]

//! Export layer: the per-country CSV table and the chart-panel document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use trend_core::{Metric, SeriesTable};
use trend_report::ChartPanel;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// `<country>_tiktok_data_<start>_<end>.csv`
pub fn csv_file_name(country: &str, start_year: i32, end_year: i32) -> String {
    format!("{country}_tiktok_data_{start_year}_{end_year}.csv")
}

/// `<country>_tiktok_analysis.json`
pub fn chart_file_name(country: &str) -> String {
    format!("{country}_tiktok_analysis.json")
}

/// Header row: `Year` then every metric column in order.
pub fn csv_header() -> String {
    let mut cols = vec!["Year"];
    cols.extend(Metric::ALL.iter().map(|m| m.column_name()));
    cols.join(",")
}

/// Write the table as comma-separated text, one row per year.
pub fn write_csv<W: Write>(table: &SeriesTable, mut out: W) -> Result<(), ExportError> {
    writeln!(out, "{}", csv_header())?;
    for r in &table.records {
        let mut line = r.year.to_string();
        for m in Metric::ALL {
            line.push(',');
            line.push_str(&r.get(m).to_string());
        }
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write the CSV export into `dir` and return its path.
pub fn export_csv(table: &SeriesTable, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(csv_file_name(
        &table.country,
        table.start_year,
        table.end_year,
    ));
    let file = fs::File::create(&path)?;
    write_csv(table, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = table.len(), "csv written");
    Ok(path)
}

/// Chart panels plus the metadata a renderer needs.
#[derive(Debug, Serialize)]
pub struct ChartDocument<'a> {
    pub country: &'a str,
    pub start_year: i32,
    pub end_year: i32,
    pub generated_at: DateTime<Utc>,
    pub years: Vec<i32>,
    pub panels: &'a [ChartPanel],
}

impl<'a> ChartDocument<'a> {
    pub fn new(table: &'a SeriesTable, panels: &'a [ChartPanel]) -> Self {
        Self {
            country: &table.country,
            start_year: table.start_year,
            end_year: table.end_year,
            generated_at: Utc::now(),
            years: table.years(),
            panels,
        }
    }
}

/// Write the chart document into `dir` as pretty JSON and return its path.
pub fn export_charts(
    table: &SeriesTable,
    panels: &[ChartPanel],
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(chart_file_name(&table.country));
    let doc = ChartDocument::new(table, panels);
    let text = serde_json::to_string_pretty(&doc)?;
    fs::write(&path, text)?;
    info!(path = %path.display(), panels = panels.len(), "chart document written");
    Ok(path)
}
