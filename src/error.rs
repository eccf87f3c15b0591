//! Failure taxonomy for fetching and decoding a realtime feed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid feed URL {url:?}")]
    InvalidUrl { url: String },

    #[error("Feed request failed with status {0}")]
    Status(u16),

    #[error("Feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed payload could not be decoded: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl FeedError {
    /// The upstream HTTP status, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status(code) => Some(*code),
            FeedError::Transport(e) => e.status().map(|s| s.as_u16()),
            FeedError::InvalidUrl { .. } | FeedError::Decode(_) => None,
        }
    }
}
