use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// Header the MTA developer portal expects its key in.
pub const MTA_API_KEY_HEADER: &str = "x-api-key";

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// The header name and value are validated once at construction, so a bad
/// key surfaces as a configuration error rather than a failed request.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    key: HeaderValue,
}

impl<C> ApiKey<C> {
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let header_name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid API key header name {header_name:?}"))?;
        let mut key = HeaderValue::from_str(key).context("API key is not a valid header value")?;
        key.set_sensitive(true);

        Ok(Self {
            inner,
            header_name,
            key,
        })
    }

    /// Sends the key as `x-api-key: <key>`.
    pub fn x_api_key(inner: C, key: &str) -> Result<Self> {
        Self::new(inner, MTA_API_KEY_HEADER, key)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.key.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records the headers of the last request it saw.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Option<reqwest::header::HeaderMap>>,
    }

    #[async_trait]
    impl HttpClient for Recorder {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            *self.seen.lock().unwrap() = Some(req.headers().clone());
            Ok(reqwest::Response::from(http::Response::new(Vec::<u8>::new())))
        }
    }

    fn get(url: &str) -> reqwest::Request {
        reqwest::Request::new(reqwest::Method::GET, url.parse().unwrap())
    }

    #[tokio::test]
    async fn test_x_api_key_header_is_attached() {
        let client = ApiKey::x_api_key(Recorder::default(), "secret").unwrap();
        client.execute(get("http://feeds.test/gtfs")).await.unwrap();

        let seen = client.inner.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.get("x-api-key").unwrap(), "secret");
    }

    #[tokio::test]
    async fn test_unwrapped_client_sends_no_key() {
        let client = Recorder::default();
        client.execute(get("http://feeds.test/gtfs")).await.unwrap();

        let seen = client.seen.lock().unwrap().clone().unwrap();
        assert!(seen.get(MTA_API_KEY_HEADER).is_none());
    }

    #[test]
    fn test_rejects_key_with_newline() {
        assert!(ApiKey::x_api_key(Recorder::default(), "bad\nkey").is_err());
    }

    #[test]
    fn test_rejects_invalid_header_name() {
        assert!(ApiKey::new(Recorder::default(), "bad header", "key").is_err());
    }
}
