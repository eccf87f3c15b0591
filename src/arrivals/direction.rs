use serde::{Deserialize, Serialize};

/// Maps a stop identifier to a rider-facing direction word.
///
/// Some networks encode direction in the stop id itself: NYCT subway
/// platforms are `127N` / `127S`. The convention is network specific, so it
/// is supplied by configuration rather than assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionRule {
    /// Stop-id suffix that selects `matched`.
    pub suffix: String,
    pub matched: String,
    pub otherwise: String,
}

impl DirectionRule {
    pub fn new(suffix: &str, matched: &str, otherwise: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
            matched: matched.to_string(),
            otherwise: otherwise.to_string(),
        }
    }

    /// NYCT subway: northbound platforms end in `N`.
    pub fn nyc_subway() -> Self {
        Self::new("N", "Uptown", "Downtown")
    }

    pub fn label(&self, stop_id: &str) -> &str {
        if stop_id.ends_with(self.suffix.as_str()) {
            &self.matched
        } else {
            &self.otherwise
        }
    }
}

impl Default for DirectionRule {
    fn default() -> Self {
        Self::nyc_subway()
    }
}
