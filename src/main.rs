//! CLI entry point for the buslee arrivals service.
//!
//! Provides subcommands for serving the HTTP API, printing a one-off arrival
//! board from a feed file or URL, and probing upstream feed reachability.

use anyhow::{Context, Result};
use buslee::arrivals::{extract_arrivals, soonest_per_route};
use buslee::config::{StationConfig, feed_client};
use buslee::fetch::{HttpClient, fetch_bytes};
use buslee::health::{MTA_FEED_BASE_URL, mta_subway_feed_urls, probe_feeds};
use buslee::output::{print_board, print_json, print_report};
use buslee::parser::parse_feed;
use buslee::server::{AppContext, serve};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "buslee")]
#[command(about = "Realtime NYC subway arrival boards", long_about = None)]
struct Cli {
    /// MTA API key, sent as `x-api-key` when set
    #[arg(long, env = "MTA_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the arrivals and probe endpoints over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "BUSLEE_BIND", default_value = "127.0.0.1:8085")]
        bind: SocketAddr,

        /// GTFS-RT feed the arrival board is built from
        #[arg(long, env = "BUSLEE_FEED_URL", default_value = MTA_FEED_BASE_URL)]
        feed_url: String,

        /// Station config JSON (defaults to Times Sq – 42 St)
        #[arg(long, env = "BUSLEE_STATION")]
        station: Option<String>,

        /// Feeds checked by the probe endpoint (defaults to every NYCT subway feed)
        #[arg(long = "probe-url", value_name = "URL")]
        probe_urls: Vec<String>,
    },
    /// Print the arrival board for a station from a feed file or URL
    Arrivals {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL", default_value = MTA_FEED_BASE_URL)]
        source: String,

        /// Station config JSON (defaults to Times Sq – 42 St)
        #[arg(long, env = "BUSLEE_STATION")]
        station: Option<String>,

        /// Show only the soonest arrival per route
        #[arg(long, default_value_t = false)]
        compact: bool,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check which feeds are reachable
    Probe {
        /// Feed URLs (defaults to every NYCT subway feed)
        #[arg(value_name = "URL")]
        urls: Vec<String>,

        /// Print JSON instead of log lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/buslee.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("buslee.log"));

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
    let client = feed_client(cli.api_key.as_deref())?;

    match cli.command {
        Commands::Serve {
            bind,
            feed_url,
            station,
            probe_urls,
        } => {
            let station = StationConfig::load_or_default(station.as_deref())?;
            let probe_urls = if probe_urls.is_empty() {
                mta_subway_feed_urls()
            } else {
                probe_urls
            };

            let ctx = AppContext::new(client, feed_url, probe_urls, &station);
            serve(Arc::new(ctx), bind).await;
        }
        Commands::Arrivals {
            source,
            station,
            compact,
            json,
        } => {
            let station = StationConfig::load_or_default(station.as_deref())?;
            let bytes = fetcher(client.as_ref(), &source).await?;
            let feed = parse_feed(&bytes).context("feed could not be decoded")?;
            debug!(entity_count = feed.entity.len(), "Feed parsed successfully");

            let mut arrivals =
                extract_arrivals(&feed, &station.query(), Utc::now().timestamp_millis());
            if compact {
                arrivals = soonest_per_route(&arrivals);
            }

            if json {
                print_json(&arrivals)?;
            } else {
                print_board(&station.name, &arrivals);
            }
        }
        Commands::Probe { urls, json } => {
            let urls = if urls.is_empty() {
                mta_subway_feed_urls()
            } else {
                urls
            };

            let report = probe_feeds(client.as_ref(), &urls).await;
            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

/// Loads feed data from a local file path or fetches it over HTTP.
#[tracing::instrument(skip(client))]
async fn fetcher(client: &dyn HttpClient, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        fetch_bytes(client, source).await?.to_vec()
    } else {
        std::fs::read(source).with_context(|| format!("failed to read feed file '{source}'"))?
    };
    Ok(bytes)
}
