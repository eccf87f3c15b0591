//! Turns a decoded realtime feed into a short arrival board for one station.
//!
//! [`extract_arrivals`] is pure: the caller supplies the feed, the station
//! description and the current time, and gets back at most
//! [`StationQuery::limit`] arrivals ordered soonest first.

mod compact;
mod direction;
mod route_label;

pub use compact::soonest_per_route;
pub use direction::DirectionRule;
pub use route_label::{RouteLabelChain, RouteLabelSource};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::gtfs_rt::FeedMessage;
use crate::gtfs_rt::TripUpdate;
use crate::gtfs_rt::trip_update::StopTimeUpdate;

/// Where an arrival prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Predicted by the realtime feed.
    Live,
    /// Taken from the static timetable.
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrival {
    /// `"<route label> <direction>"`, e.g. `"1 Uptown"`.
    pub route: String,
    pub minutes: u32,
    pub kind: Confidence,
}

/// Which stops to report on and how to label what arrives there.
#[derive(Debug, Clone)]
pub struct StationQuery {
    pub target_stops: HashSet<String>,
    pub direction: DirectionRule,
    pub route_label: RouteLabelChain,
    pub limit: usize,
}

impl StationQuery {
    pub fn new<I, S>(target_stops: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_stops: target_stops.into_iter().map(Into::into).collect(),
            direction: DirectionRule::default(),
            route_label: RouteLabelChain::default(),
            limit,
        }
    }

    pub fn with_direction(mut self, direction: DirectionRule) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_route_label(mut self, route_label: RouteLabelChain) -> Self {
        self.route_label = route_label;
        self
    }
}

/// Trip updates carried by a feed, in entity order.
pub fn trip_updates(feed: &FeedMessage) -> impl Iterator<Item = &TripUpdate> {
    feed.entity.iter().filter_map(|e| e.trip_update.as_ref())
}

/// Whole minutes from `now_millis` until `epoch_seconds`, rounded to the
/// nearest minute and clamped at zero.
pub fn minutes_from_now(epoch_seconds: i64, now_millis: i64) -> u32 {
    let ms = epoch_seconds.saturating_mul(1000).saturating_sub(now_millis);
    let minutes = (ms as f64 / 60_000.0).round();
    if minutes <= 0.0 { 0 } else { minutes as u32 }
}

/// Predicted arrival, falling back to departure. Zero counts as unset.
fn predicted_time(stu: &StopTimeUpdate) -> Option<i64> {
    stu.arrival
        .as_ref()
        .and_then(|e| e.time)
        .or_else(|| stu.departure.as_ref().and_then(|e| e.time))
        .filter(|&t| t != 0)
}

/// Builds the arrival board for `query` from a decoded feed.
pub fn extract_arrivals(feed: &FeedMessage, query: &StationQuery, now_millis: i64) -> Vec<Arrival> {
    arrivals_from_trip_updates(trip_updates(feed), query, now_millis)
}

/// Same as [`extract_arrivals`], over any sequence of trip updates.
pub fn arrivals_from_trip_updates<'a>(
    trip_updates: impl IntoIterator<Item = &'a TripUpdate>,
    query: &StationQuery,
    now_millis: i64,
) -> Vec<Arrival> {
    let mut arrivals = Vec::new();

    for tu in trip_updates {
        if tu.stop_time_update.is_empty() {
            continue;
        }

        for stu in &tu.stop_time_update {
            let Some(stop_id) = stu.stop_id.as_deref().filter(|id| !id.is_empty()) else {
                continue;
            };
            if !query.target_stops.contains(stop_id) {
                continue;
            }

            let Some(t) = predicted_time(stu) else {
                continue;
            };

            let Some(label) = query.route_label.resolve(&tu.trip) else {
                continue;
            };
            let direction = query.direction.label(stop_id);

            arrivals.push(Arrival {
                route: format!("{label} {direction}"),
                minutes: minutes_from_now(t, now_millis),
                kind: Confidence::Live,
            });
        }
    }

    let matched = arrivals.len();
    arrivals.sort_by_key(|a| a.minutes);
    arrivals.truncate(query.limit);
    debug!(matched, returned = arrivals.len(), "Arrivals extracted");

    arrivals
}
