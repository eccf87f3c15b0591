//! Reachability probe across a list of realtime feeds.
//!
//! Every feed is fetched concurrently and every fetch is allowed to settle;
//! one failing feed never hides the others.

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{Instrument, info, warn};

use crate::fetch::{HttpClient, fetch_with_status};

/// Base URL for the NYCT subway GTFS-RT feeds.
pub const MTA_FEED_BASE_URL: &str =
    "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds/nyct%2Fgtfs";

/// Feed suffixes, one per group of subway lines.
const MTA_FEED_SUFFIXES: &[&str] = &["", "-ace", "-bdfm", "-g", "-jz", "-nqrw", "-l", "-si"];

/// Every NYCT subway feed URL.
pub fn mta_subway_feed_urls() -> Vec<String> {
    MTA_FEED_SUFFIXES
        .iter()
        .map(|suffix| format!("{MTA_FEED_BASE_URL}{suffix}"))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedProbe {
    pub url: String,
    pub ok: bool,
    /// Absent when the request never produced a response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// True when at least one feed answered successfully.
    pub ok: bool,
    pub ok_count: usize,
    pub feeds: Vec<FeedProbe>,
    /// Epoch milliseconds when the report was assembled.
    pub time: i64,
}

/// Fetches a single feed and reports what came back.
pub async fn probe_feed<C: HttpClient + ?Sized>(client: &C, url: &str) -> FeedProbe {
    match fetch_with_status(client, url).await {
        Ok((status, body)) => FeedProbe {
            url: url.to_string(),
            ok: true,
            status: Some(status),
            bytes: body.len(),
            message: None,
        },
        Err(e) => {
            warn!(url, error = %e, "Feed probe failed");
            FeedProbe {
                url: url.to_string(),
                ok: false,
                status: e.status(),
                bytes: 0,
                message: Some(e.to_string()),
            }
        }
    }
}

/// Probes all `urls` concurrently and aggregates the results in input order.
#[tracing::instrument(skip_all, fields(feeds = urls.len()))]
pub async fn probe_feeds<C: HttpClient + ?Sized>(client: &C, urls: &[String]) -> HealthReport {
    let probes = urls.iter().map(|url| {
        let span = tracing::info_span!("probe_feed", url = %url);
        probe_feed(client, url).instrument(span)
    });
    let feeds = join_all(probes).await;

    let ok_count = feeds.iter().filter(|p| p.ok).count();
    info!(ok_count, total = feeds.len(), "Feed probe complete");

    HealthReport {
        ok: ok_count > 0,
        ok_count,
        feeds,
        time: Utc::now().timestamp_millis(),
    }
}
