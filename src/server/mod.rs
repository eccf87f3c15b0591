//! HTTP surface: `GET /api/subway` (feed probe) and
//! `GET /api/subway/arrivals` (arrival board for the configured station).

mod endpoints;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::Filter;

use crate::arrivals::StationQuery;
use crate::config::StationConfig;
use crate::fetch::HttpClient;

pub use endpoints::{BoardResponse, FailureResponse};

/// Immutable per-process state shared by every request.
pub struct AppContext {
    pub client: Arc<dyn HttpClient>,
    pub feed_url: String,
    pub probe_urls: Vec<String>,
    pub station_name: String,
    pub query: StationQuery,
}

impl AppContext {
    pub fn new(
        client: Arc<dyn HttpClient>,
        feed_url: String,
        probe_urls: Vec<String>,
        station: &StationConfig,
    ) -> Self {
        Self {
            client,
            feed_url,
            probe_urls,
            station_name: station.name.clone(),
            query: station.query(),
        }
    }
}

fn with_context(
    ctx: Arc<AppContext>,
) -> impl Filter<Extract = (Arc<AppContext>,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

pub fn routes(
    ctx: Arc<AppContext>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let cors = warp::cors().allow_any_origin().allow_method("GET");

    let probe = warp::path!("api" / "subway")
        .and(warp::get())
        .and(with_context(ctx.clone()))
        .and_then(endpoints::probe_handler);

    let arrivals = warp::path!("api" / "subway" / "arrivals")
        .or(warp::path!("api" / "subway" / "times-sq"))
        .unify()
        .and(warp::get())
        .and(with_context(ctx))
        .and_then(endpoints::arrivals_handler);

    probe
        .or(arrivals)
        .with(cors)
        .with(warp::trace::request())
}

/// Serves [`routes`] until the process is stopped.
pub async fn serve(ctx: Arc<AppContext>, addr: SocketAddr) {
    info!(%addr, station = %ctx.station_name, feed_url = %ctx.feed_url, "Starting web server");
    warp::serve(routes(ctx)).run(addr).await;
}
