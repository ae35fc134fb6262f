//! Command line entry point for the bookstore directory pipeline.
//!
//! Every command rebuilds the record list from the CSV — there is no
//! long-lived state between invocations, matching how the site build
//! consumes this core.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bookdir_core::{AppConfig, Coordinates, ProcessedBookstore};
use bookdir_ingest::{ingest_csv, process_record, IngestReport};
use bookdir_query::{
    apply_filters, extract_cities, extract_provinces, FilterContext, SearchIndex, StoreFilters,
};

#[derive(Debug, Parser)]
#[command(name = "bookdir")]
#[command(about = "Bookstore directory CSV pipeline")]
struct Cli {
    /// Path to the bookstore CSV export (defaults to BOOKDIR_CSV_PATH).
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse and validate the CSV, reporting per-row errors
    Ingest,
    /// Group stores by province with per-city counts
    Provinces,
    /// Flat city list with store counts
    Cities,
    /// Fuzzy search with compound filters
    Search {
        /// Search text; omit to list every store
        query: Option<String>,

        #[arg(long)]
        open_now: bool,
        #[arg(long)]
        has_website: bool,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long)]
        province: Option<String>,
        #[arg(long)]
        price_level: Option<String>,
        /// Maximum distance in km; requires --lat and --lng
        #[arg(long)]
        max_distance: Option<f64>,
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        #[arg(long)]
        open_late: bool,
        #[arg(long)]
        open_weekends: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let config = bookdir_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    let csv_path = cli.csv.clone().unwrap_or_else(|| config.csv_path.clone());

    let report = ingest_csv(&csv_path)?;
    let records: Vec<ProcessedBookstore> = report
        .records
        .iter()
        .map(|r| process_record(r, &config.placeholder_photo_url))
        .collect();
    tracing::info!(
        path = %csv_path.display(),
        records = records.len(),
        skipped = report.errors.len(),
        "loaded bookstore CSV"
    );

    match cli.command {
        Commands::Ingest => print_ingest(&report, cli.json)?,
        Commands::Provinces => {
            let provinces = extract_provinces(&records);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&provinces)?);
            } else {
                for province in &provinces {
                    let code = province.code.as_deref().unwrap_or("--");
                    println!("{} ({code}) — {} stores", province.name, province.total_stores);
                    for city in &province.cities {
                        println!("  {} — {}", city.name, city.store_count);
                    }
                }
            }
        }
        Commands::Cities => {
            let cities = extract_cities(&records);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&cities)?);
            } else {
                for city in &cities {
                    println!("{}, {} — {}", city.name, city.province, city.store_count);
                }
            }
        }
        Commands::Search {
            query,
            open_now,
            has_website,
            min_rating,
            province,
            price_level,
            max_distance,
            lat,
            lng,
            open_late,
            open_weekends,
        } => {
            let filters = StoreFilters {
                open_now,
                has_website,
                min_rating,
                province,
                price_level,
                max_distance_km: max_distance,
                open_late,
                open_weekends,
            };
            let location = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
                _ => None,
            };
            let results = run_search(
                &records,
                query.as_deref().unwrap_or(""),
                &filters,
                location,
                &config,
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for store in &results {
                    println!("{} — {} [{}]", store.name, store.formatted_address, store.slug);
                }
                println!("{} store(s)", results.len());
            }
        }
    }

    Ok(())
}

fn print_ingest(report: &IngestReport, json: bool) -> anyhow::Result<()> {
    if json {
        let summary = serde_json::json!({
            "records": report.records.len(),
            "errors": report.errors,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} record(s) validated, {} row(s) skipped",
            report.records.len(),
            report.errors.len()
        );
        for error in &report.errors {
            println!("  row {}: {}", error.row, error.message);
        }
    }
    Ok(())
}

/// Search with the configured threshold, then narrow by the active filters.
fn run_search<'a>(
    records: &'a [ProcessedBookstore],
    query: &str,
    filters: &StoreFilters,
    location: Option<Coordinates>,
    config: &AppConfig,
) -> Vec<&'a ProcessedBookstore> {
    let index = SearchIndex::with_threshold(records, config.fuzzy_threshold);
    let matched = index.search(records, query);
    let ctx = FilterContext::now(location, config.late_hour);
    apply_filters(matched, filters, &ctx)
}

#[cfg(test)]
mod tests;
