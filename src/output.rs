//! Terminal rendering for arrival boards and probe reports.
//!
//! Supports a human-readable board via tracing and pretty-printed JSON.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::arrivals::{Arrival, Confidence};
use crate::health::HealthReport;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per arrival, e.g. `1 Uptown  3 min  LIVE`.
pub fn board_lines(arrivals: &[Arrival]) -> Vec<String> {
    arrivals
        .iter()
        .map(|a| {
            let kind = match a.kind {
                Confidence::Live => "LIVE",
                Confidence::Scheduled => "SCHEDULED",
            };
            format!("{:<14} {:>3} min  {}", a.route, a.minutes, kind)
        })
        .collect()
}

pub fn print_board(station: &str, arrivals: &[Arrival]) {
    if arrivals.is_empty() {
        info!(station, "No upcoming arrivals");
        return;
    }

    info!(station, count = arrivals.len(), "Upcoming arrivals");
    for line in board_lines(arrivals) {
        info!("{line}");
    }
}

pub fn print_report(report: &HealthReport) {
    for feed in &report.feeds {
        if feed.ok {
            info!(url = %feed.url, status = ?feed.status, bytes = feed.bytes, "Feed reachable");
        } else {
            warn!(url = %feed.url, status = ?feed.status, message = ?feed.message, "Feed unreachable");
        }
    }
    info!(ok = report.ok, ok_count = report.ok_count, total = report.feeds.len(), "Probe summary");
}
