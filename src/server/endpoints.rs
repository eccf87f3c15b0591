use chrono::Utc;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info};
use warp::http::StatusCode;

use super::AppContext;
use crate::arrivals::{Arrival, extract_arrivals, soonest_per_route};
use crate::fetch::fetch_feed;
use crate::health::probe_feeds;

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub ok: bool,
    pub station: String,
    pub arrivals: Vec<Arrival>,
    /// Soonest arrival per route label, for compact views.
    pub nearby: Vec<Arrival>,
    pub time: i64,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

pub(super) async fn probe_handler(ctx: Arc<AppContext>) -> Result<impl warp::Reply, Infallible> {
    let report = probe_feeds(ctx.client.as_ref(), &ctx.probe_urls).await;
    Ok(warp::reply::json(&report))
}

#[tracing::instrument(skip_all, fields(station = %ctx.station_name))]
pub(super) async fn arrivals_handler(
    ctx: Arc<AppContext>,
) -> Result<impl warp::Reply, Infallible> {
    let (body, status) = match fetch_feed(ctx.client.as_ref(), &ctx.feed_url).await {
        Ok(feed) => {
            let now = Utc::now().timestamp_millis();
            let arrivals = extract_arrivals(&feed, &ctx.query, now);
            let nearby = soonest_per_route(&arrivals);
            info!(arrivals = arrivals.len(), "Arrival board built");

            let board = BoardResponse {
                ok: true,
                station: ctx.station_name.clone(),
                arrivals,
                nearby,
                time: now,
            };
            (warp::reply::json(&board), StatusCode::OK)
        }
        Err(e) => {
            error!(error = %e, "Arrival board failed");
            let failure = FailureResponse {
                ok: false,
                status: e.status(),
                message: e.to_string(),
            };
            (warp::reply::json(&failure), StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    Ok(warp::reply::with_status(body, status))
}
