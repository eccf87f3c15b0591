//! Station and upstream configuration.
//!
//! A station is stored as a plain JSON object on disk; every field is
//! optional and falls back to Times Sq – 42 St on the 1/2/3:
//! ```json
//! {
//!   "name": "Times Sq – 42 St",
//!   "stops": ["127N", "127S"],
//!   "limit": 6,
//!   "direction": { "suffix": "N", "matched": "Uptown", "otherwise": "Downtown" },
//!   "route_label": [
//!     { "source": "route_id" },
//!     { "source": "trip_id_prefix", "chars": 1 },
//!     { "source": "placeholder", "label": "Train" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::arrivals::{DirectionRule, RouteLabelChain, StationQuery};
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient};

pub const DEFAULT_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub name: String,
    pub stops: Vec<String>,
    pub limit: usize,
    pub direction: DirectionRule,
    pub route_label: RouteLabelChain,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            name: "Times Sq – 42 St".to_string(),
            stops: vec!["127N".to_string(), "127S".to_string()],
            limit: DEFAULT_LIMIT,
            direction: DirectionRule::nyc_subway(),
            route_label: RouteLabelChain::default(),
        }
    }
}

impl StationConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read station config '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("invalid station config '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: StationConfig = serde_json::from_str(content)?;
        anyhow::ensure!(!config.stops.is_empty(), "station has no stops");
        Ok(config)
    }

    /// Loads `path` when given, otherwise the default station.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                info!(path, station = %config.name, "Loaded station config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn query(&self) -> StationQuery {
        StationQuery::new(self.stops.iter().cloned(), self.limit)
            .with_direction(self.direction.clone())
            .with_route_label(self.route_label.clone())
    }
}

/// Builds the upstream client, attaching `x-api-key` when a key is set.
///
/// An empty key counts as unset.
pub fn feed_client(api_key: Option<&str>) -> Result<Arc<dyn HttpClient>> {
    match api_key.filter(|k| !k.is_empty()) {
        Some(key) => {
            info!("Using MTA API key for feed requests");
            Ok(Arc::new(ApiKey::x_api_key(BasicClient::new(), key)?))
        }
        None => Ok(Arc::new(BasicClient::new())),
    }
}
