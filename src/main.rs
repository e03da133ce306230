//! CLI entry point for the bike-share traffic tool.
//!
//! Loads station metadata and a month of trips, then reports per-station
//! arrivals and departures for the whole day or a two-hour window.

use anyhow::{Context, Result};
use bikeshare_traffic::analyzers::summary::summarize;
use bikeshare_traffic::{
    config::DataSources,
    dataset::Dataset,
    fetch::BasicClient,
    output::{print_json, print_pretty, top_stations, write_csv},
    time::TimeFilter,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_traffic")]
#[command(about = "Per-station bike-share traffic by time of day", long_about = None)]
struct Cli {
    /// Station information JSON (file path or URL)
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    stations: Option<String>,

    /// Trip table CSV (file path or URL)
    #[arg(long, global = true, value_name = "FILE_OR_URL")]
    trips: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute traffic for every station
    Traffic {
        /// Window center as HH:MM or minutes since midnight; "any" or -1 for the whole day
        #[arg(short, long, default_value = "any", allow_hyphen_values = true)]
        time: TimeFilter,

        /// CSV file to write station rows to
        #[arg(short, long)]
        output: Option<String>,

        /// Log all station rows as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Number of busiest stations to log
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Log network-wide totals for one window
    Summary {
        /// Window center as HH:MM or minutes since midnight; "any" or -1 for the whole day
        #[arg(short, long, default_value = "any", allow_hyphen_values = true)]
        time: TimeFilter,
    },
    /// Read one time filter per line from stdin and recompute after each
    Slider,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_traffic.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_traffic.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let sources = DataSources::resolve(cli.stations, cli.trips);
    let client = BasicClient::new().context("failed to build HTTP client")?;
    let dataset = Dataset::load(&client, &sources).await?;

    match cli.command {
        Commands::Traffic {
            time,
            output,
            json,
            top,
        } => {
            let rows = dataset.traffic(time);

            for row in top_stations(&rows, top) {
                info!(
                    station = %row.short_name,
                    name = row.name.as_deref().unwrap_or(""),
                    flow = row.flow_bucket().value(),
                    "{}",
                    row
                );
            }

            if json {
                print_json(&rows)?;
            }

            if let Some(path) = output {
                write_csv(&path, &rows)?;
                info!(path = %path, rows = rows.len(), "Station traffic written");
            }
        }
        Commands::Summary { time } => {
            let summary = summarize(&dataset.traffic(time), time);
            print_pretty(&summary);
            print_json(&summary)?;
        }
        Commands::Slider => run_slider(&dataset).await?,
    }

    Ok(())
}

/// Recomputes traffic for each filter read from stdin, one line at a time.
async fn run_slider(dataset: &Dataset) -> Result<()> {
    info!("Enter a time (HH:MM, minutes, or -1 for any time); Ctrl+D to quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let filter: TimeFilter = match line.parse() {
            Ok(f) => f,
            Err(e) => {
                warn!(input = %line.trim(), error = %e, "Ignoring slider input");
                continue;
            }
        };

        let summary = summarize(&dataset.traffic(filter), filter);
        info!(
            selected_time = %filter,
            stations = summary.active_stations,
            departures = summary.departures,
            arrivals = summary.arrivals,
            max_total_traffic = summary.max_total_traffic,
            busiest = summary.busiest_station.as_deref().unwrap_or("-"),
            "Traffic recomputed"
        );
    }

    Ok(())
}
