//! CLI entry point for the trip ranker.
//!
//! Provides subcommands for ranking the busiest stations for a set of
//! seasons, listing the seasons a dataset covers, and exporting the daily
//! rides/temperature series.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use trip_ranker::analyzers::report::{build_station_report, build_weather_report};
use trip_ranker::fetch::{BasicClient, fetch_bytes, is_gzip_url};
use trip_ranker::output::{
    print_station_report, print_weather_report, to_json, write_groups_csv, write_series_csv,
};
use trip_ranker::{GroupBy, Season, TripDataset};

const DEFAULT_SOURCE: &str = "df_final_updated_season.csv";

#[derive(Parser)]
#[command(name = "trip_ranker")]
#[command(about = "Rank bike-share stations by trip count", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the busiest groups (stations by default) for the selected seasons
    Top {
        /// Path or URL of the trip CSV (defaults to $TRIPS_SOURCE)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Season to include; repeat for several. Omit to include every season present
        #[arg(short, long = "season")]
        seasons: Vec<Season>,

        /// Number of groups to keep
        #[arg(short, long, default_value_t = 20)]
        n: usize,

        /// Column to group trips on: station, season or date
        #[arg(short, long, default_value_t = GroupBy::Station)]
        by: GroupBy,

        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the seasons present in the dataset, in order of first appearance
    Seasons {
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,
    },
    /// Export the daily rides and temperature series
    Weather {
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        #[arg(short, long = "season")]
        seasons: Vec<Season>,

        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/trip_ranker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("trip_ranker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Top {
            source,
            seasons,
            n,
            by,
            format,
            output,
        } => {
            check_output(format, output.as_deref())?;
            let dataset = load_dataset(&resolve_source(source)).await?;
            run_top(&dataset, seasons, n, by, format, output.as_deref())?;
        }
        Commands::Seasons { source } => {
            let dataset = load_dataset(&resolve_source(source)).await?;
            let seasons = dataset.seasons();
            info!(rows = dataset.len(), ?seasons, "Seasons present");
            for season in seasons {
                println!("{season}");
            }
        }
        Commands::Weather {
            source,
            seasons,
            format,
            output,
        } => {
            check_output(format, output.as_deref())?;
            let dataset = load_dataset(&resolve_source(source)).await?;
            run_weather(&dataset, seasons, format, output.as_deref())?;
        }
    }

    Ok(())
}

fn resolve_source(source: Option<String>) -> String {
    source
        .or_else(|| std::env::var("TRIPS_SOURCE").ok())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
}

/// Loads the dataset from a local file path or fetches it over HTTP.
#[tracing::instrument]
async fn load_dataset(source: &str) -> Result<TripDataset> {
    let dataset = if source.starts_with("http") {
        let client = BasicClient::new()?;
        let bytes = fetch_bytes(&client, source).await?;
        TripDataset::from_bytes(&bytes, is_gzip_url(source))?
    } else {
        TripDataset::load(source).with_context(|| format!("failed to load {source}"))?
    };
    Ok(dataset)
}

/// An empty selection means every season present, as the dashboard's default.
fn selected_seasons(dataset: &TripDataset, seasons: Vec<Season>) -> Vec<Season> {
    if seasons.is_empty() {
        dataset.seasons()
    } else {
        seasons
    }
}

/// Pretty output goes to the log, so it cannot be sent to a file.
fn check_output(format: Format, output: Option<&str>) -> Result<()> {
    if let (Format::Pretty, Some(path)) = (format, output) {
        bail!("--output {path} needs --format json or --format csv");
    }
    Ok(())
}

fn open_output(output: Option<&str>) -> Result<Box<dyn Write>> {
    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {path}"))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    Ok(out)
}

fn write_json(output: Option<&str>, json: &str) -> Result<()> {
    let mut out = open_output(output)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

#[tracing::instrument(skip(dataset, format, output), fields(rows = dataset.len()))]
fn run_top(
    dataset: &TripDataset,
    seasons: Vec<Season>,
    n: usize,
    by: GroupBy,
    format: Format,
    output: Option<&str>,
) -> Result<()> {
    let seasons = selected_seasons(dataset, seasons);
    let report = build_station_report(dataset, &seasons, n, by)?;

    match format {
        Format::Pretty => print_station_report(&report),
        Format::Json => write_json(output, &to_json(&report)?)?,
        Format::Csv => write_groups_csv(open_output(output)?, &report.top)?,
    }

    info!(groups = report.top.len(), total_rides = report.total_rides, "Ranking complete");
    Ok(())
}

#[tracing::instrument(skip(dataset, format, output), fields(rows = dataset.len()))]
fn run_weather(
    dataset: &TripDataset,
    seasons: Vec<Season>,
    format: Format,
    output: Option<&str>,
) -> Result<()> {
    let seasons = selected_seasons(dataset, seasons);
    let report = build_weather_report(dataset, &seasons);

    match format {
        Format::Pretty => print_weather_report(&report),
        Format::Json => write_json(output, &to_json(&report)?)?,
        Format::Csv => write_series_csv(open_output(output)?, &report.days)?,
    }

    Ok(())
}
