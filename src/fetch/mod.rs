mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use bytes::Bytes;
use tracing::debug;

use crate::error::FeedError;
use crate::gtfs_rt::FeedMessage;
use crate::parser::parse_feed;

/// Fetches `url` and returns the fully buffered body.
///
/// A non-success status is an error carrying that status; the body of a
/// failed response is discarded.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<Bytes, FeedError> {
    let (_, body) = fetch_with_status(client, url).await?;
    Ok(body)
}

/// Like [`fetch_bytes`], also returning the success status the upstream sent.
#[tracing::instrument(skip(client), fields(status = tracing::field::Empty, bytes = tracing::field::Empty))]
pub async fn fetch_with_status<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<(u16, Bytes), FeedError> {
    let parsed = url.parse().map_err(|_| FeedError::InvalidUrl {
        url: url.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?;
    let status = resp.status();
    tracing::Span::current().record("status", status.as_u16());

    if !status.is_success() {
        return Err(FeedError::Status(status.as_u16()));
    }

    let body = resp.bytes().await?;
    tracing::Span::current().record("bytes", body.len());
    debug!("Feed bytes received");
    Ok((status.as_u16(), body))
}

/// Fetches and decodes a GTFS-RT feed in one step.
pub async fn fetch_feed<C: HttpClient + ?Sized>(client: &C, url: &str) -> Result<FeedMessage, FeedError> {
    let bytes = fetch_bytes(client, url).await?;
    parse_feed(&bytes)
}


#[cfg(test)]
mod tests {
    use super::testing::CannedClient;
    use super::*;
    use crate::gtfs_rt::{FeedHeader, FeedMessage};
    use prost::Message;

    const URL: &str = "http://feeds.test/nyct%2Fgtfs";

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let client = CannedClient::default().with(URL, 200, vec![1, 2, 3]);
        let bytes = fetch_bytes(&client, URL).await.unwrap();
        assert_eq!(bytes.as_ref(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_with_status_passes_through_success_code() {
        let client = CannedClient::default().with(URL, 203, vec![9]);
        let (status, body) = fetch_with_status(&client, URL).await.unwrap();
        assert_eq!(status, 203);
        assert_eq!(body.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_bytes_reports_upstream_status() {
        let client = CannedClient::default().with(URL, 503, b"busy".to_vec());
        let err = fetch_bytes(&client, URL).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_fetch_bytes_rejects_bad_url() {
        let client = CannedClient::default();
        let err = fetch_bytes(&client, "not a url").await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_fetch_feed_decodes() {
        let feed = FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "2.0".to_string(),
                ..Default::default()
            },
            entity: vec![],
        };
        let client = CannedClient::default().with(URL, 200, feed.encode_to_vec());

        let parsed = fetch_feed(&client, URL).await.unwrap();
        assert_eq!(parsed.header.gtfs_realtime_version, "2.0");
    }

    #[tokio::test]
    async fn test_fetch_feed_fails_on_garbage() {
        let client = CannedClient::default().with(URL, 200, vec![0xFF, 0xFE, 0x00, 0x01]);
        let err = fetch_feed(&client, URL).await.unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }
}
