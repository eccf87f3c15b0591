//! Protobuf parser for GTFS Realtime feeds.

use prost::Message;

use crate::error::FeedError;
use crate::gtfs_rt::FeedMessage;

/// Decodes a protobuf-encoded GTFS-RT [`FeedMessage`] from raw bytes.
///
/// Decoding is all or nothing: a payload that is malformed anywhere yields
/// an error and no entities.
///
/// # Errors
///
/// Returns [`FeedError::Decode`] if the bytes are not valid protobuf for a `FeedMessage`.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedMessage, FeedError> {
    Ok(FeedMessage::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs_rt::{FeedEntity, FeedHeader, TripDescriptor, TripUpdate};

    #[test]
    fn test_parse_empty_bytes_returns_default_feed() {
        // Every field of a FeedMessage may be absent on the wire, so zero
        // bytes decode to defaults.
        let feed = parse_feed(&[]).unwrap();
        assert_eq!(feed.header.gtfs_realtime_version, "");
        assert!(feed.entity.is_empty());
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let invalid_bytes = vec![0xFF, 0xFE, 0x00, 0x01];
        let result = parse_feed(&invalid_bytes);
        assert!(matches!(result, Err(FeedError::Decode(_))));
    }

    #[test]
    fn test_parse_truncated_feed_is_rejected() {
        let feed = FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "2.0".to_string(),
                timestamp: Some(1234567890),
                ..Default::default()
            },
            entity: vec![FeedEntity {
                id: "000001".to_string(),
                trip_update: Some(TripUpdate {
                    trip: TripDescriptor {
                        trip_id: Some("123450_1..N03R".to_string()),
                        route_id: Some("1".to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
                ..Default::default()
            }],
        };
        let mut encoded = feed.encode_to_vec();
        encoded.truncate(encoded.len() - 3);

        assert!(parse_feed(&encoded).is_err());
    }

    #[test]
    fn test_parse_valid_minimal_feed() {
        let feed = FeedMessage {
            header: FeedHeader {
                gtfs_realtime_version: "2.0".to_string(),
                timestamp: Some(1234567890),
                incrementality: None,
                feed_version: None,
            },
            entity: vec![],
        };
        let encoded = feed.encode_to_vec();
        let parsed = parse_feed(&encoded).unwrap();

        assert_eq!(parsed.header.gtfs_realtime_version, "2.0");
        assert_eq!(parsed.header.timestamp, Some(1234567890));
    }
}
