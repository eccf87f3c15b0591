//! Route label inference.
//!
//! A label is resolved by trying each [`RouteLabelSource`] in order and
//! taking the first one that yields a non-empty value.

use serde::{Deserialize, Serialize};

use crate::gtfs_rt::TripDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RouteLabelSource {
    /// The trip's explicit `route_id`.
    RouteId,
    /// The leading characters of the trip's `trip_id`.
    TripIdPrefix { chars: usize },
    /// A fixed label. Always resolves.
    Placeholder { label: String },
}

impl RouteLabelSource {
    pub fn resolve(&self, trip: &TripDescriptor) -> Option<String> {
        let label = match self {
            RouteLabelSource::RouteId => trip.route_id.clone()?,
            RouteLabelSource::TripIdPrefix { chars } => {
                trip.trip_id.as_deref()?.chars().take(*chars).collect()
            }
            RouteLabelSource::Placeholder { label } => label.clone(),
        };

        (!label.is_empty()).then_some(label)
    }
}

/// Ordered fallback chain of [`RouteLabelSource`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteLabelChain(Vec<RouteLabelSource>);

impl RouteLabelChain {
    pub fn new(sources: Vec<RouteLabelSource>) -> Self {
        Self(sources)
    }

    /// `None` only when the chain has no placeholder and nothing matched.
    pub fn resolve(&self, trip: &TripDescriptor) -> Option<String> {
        self.0.iter().find_map(|source| source.resolve(trip))
    }

    pub fn sources(&self) -> &[RouteLabelSource] {
        &self.0
    }
}

impl Default for RouteLabelChain {
    /// route id, then first character of the trip id, then `"Train"`.
    fn default() -> Self {
        Self(vec![
            RouteLabelSource::RouteId,
            RouteLabelSource::TripIdPrefix { chars: 1 },
            RouteLabelSource::Placeholder {
                label: "Train".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(trip_id: Option<&str>, route_id: Option<&str>) -> TripDescriptor {
        TripDescriptor {
            trip_id: trip_id.map(str::to_string),
            route_id: route_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_route_id_wins() {
        let chain = RouteLabelChain::default();
        let t = trip(Some("2_0930_S"), Some("1"));
        assert_eq!(chain.resolve(&t).as_deref(), Some("1"));
    }

    #[test]
    fn test_falls_back_to_trip_id_prefix() {
        let chain = RouteLabelChain::default();
        let t = trip(Some("2_0930_S"), None);
        assert_eq!(chain.resolve(&t).as_deref(), Some("2"));
    }

    #[test]
    fn test_empty_route_id_is_treated_as_missing() {
        let chain = RouteLabelChain::default();
        let t = trip(Some("3_1000_N"), Some(""));
        assert_eq!(chain.resolve(&t).as_deref(), Some("3"));
    }

    #[test]
    fn test_placeholder_when_nothing_else() {
        let chain = RouteLabelChain::default();
        assert_eq!(chain.resolve(&trip(None, None)).as_deref(), Some("Train"));
        assert_eq!(chain.resolve(&trip(Some(""), None)).as_deref(), Some("Train"));
    }

    #[test]
    fn test_each_source_in_isolation() {
        let t = trip(Some("GS_1"), Some("GS"));
        assert_eq!(RouteLabelSource::RouteId.resolve(&t).as_deref(), Some("GS"));
        assert_eq!(
            RouteLabelSource::TripIdPrefix { chars: 2 }.resolve(&t).as_deref(),
            Some("GS")
        );
        assert_eq!(
            RouteLabelSource::TripIdPrefix { chars: 0 }.resolve(&t),
            None
        );
    }

    #[test]
    fn test_chain_without_placeholder_can_fail() {
        let chain = RouteLabelChain::new(vec![RouteLabelSource::RouteId]);
        assert_eq!(chain.resolve(&trip(Some("1_x"), None)), None);
    }

    #[test]
    fn test_chain_deserializes_from_tagged_json() {
        let chain: RouteLabelChain = serde_json::from_str(
            r#"[{"source":"route_id"},{"source":"placeholder","label":"Bus"}]"#,
        )
        .unwrap();
        assert_eq!(chain.resolve(&trip(None, None)).as_deref(), Some("Bus"));
    }
}
