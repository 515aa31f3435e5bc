#![deny(warnings)]

//! Headless CLI: pick a country, simulate its usage series, export the table
//! and chart panels, then print the insights report.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trend_core::{
    load_profiles_yaml, ProfileRegistry, YearRange, DEFAULT_END_YEAR, DEFAULT_START_YEAR,
};
use trend_report::Insights;

mod selection;

#[derive(Parser, Debug)]
#[command(name = "tiktok-trends")]
#[command(about = "Simulate yearly TikTok usage and revenue metrics for a country")]
#[command(version)]
struct Args {
    /// Country name; unknown names use the default profile.
    #[arg(long, conflicts_with = "select")]
    country: Option<String>,

    /// 1-based menu choice instead of the interactive prompt.
    #[arg(long)]
    select: Option<String>,

    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    start: i32,

    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    end: i32,

    /// Directory receiving the CSV and chart files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// YAML file with extra or overriding country profiles.
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Skip writing the chart-panel document.
    #[arg(long)]
    no_charts: bool,

    /// Skip writing the CSV table.
    #[arg(long)]
    no_export: bool,
}

fn load_registry(path: Option<&PathBuf>) -> Result<ProfileRegistry> {
    let mut registry = ProfileRegistry::builtin();
    if let Some(path) = path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading profiles from {}", path.display()))?;
        let extra = load_profiles_yaml(&text)?;
        info!(count = extra.len(), path = %path.display(), "loaded extra profiles");
        registry.merge(extra)?;
    }
    Ok(registry)
}

fn choose_country(args: &Args, registry: &ProfileRegistry) -> Result<String> {
    if let Some(name) = &args.country {
        if !registry.contains(name) {
            warn!(country = %name, "unknown country, falling back to the default profile");
        }
        return Ok(name.clone());
    }
    let selection = match &args.select {
        Some(choice) => {
            let s = selection::select_or_default(choice);
            if let Some(notice) = &s.notice {
                println!("{notice}");
            }
            s
        }
        None => {
            let stdin = std::io::stdin();
            selection::prompt(stdin.lock(), std::io::stdout())?
        }
    };
    Ok(selection.country.to_string())
}

fn main() -> Result<()> {
    // Logging setup; stdout is reserved for the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(?args, "starting CLI");

    let range = YearRange::new(args.start, args.end)?;
    let registry = load_registry(args.profiles.as_ref())?;
    let country = choose_country(&args, &registry)?;
    let profile = registry.resolve(&country);

    let table = trend_runtime::simulate_country(&registry, &country, range);
    println!("Generating TikTok data for {}...", table.country);

    if !args.no_export {
        let path = trend_export::export_csv(&table, &args.out_dir)?;
        println!("Data saved: {}", path.display());
    }

    println!("\nPreview:");
    print!("{}", trend_report::preview(&table, 5));

    if !args.no_charts {
        let panels = trend_report::build_panels(&table);
        let path = trend_export::export_charts(&table, &panels, &args.out_dir)?;
        println!("\nChart panels saved: {}", path.display());
    }

    println!();
    print!("{}", Insights::from_table(profile, &table));

    println!("\nTikTok analysis for {} complete.", table.country);
    println!("Period: {}-{}", range.start, range.end);
    println!("Data: users, engagement, revenue, content");
    Ok(())
}
