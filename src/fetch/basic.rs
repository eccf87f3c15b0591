use super::client::HttpClient;
use async_trait::async_trait;

/// Plain reqwest client with no request decoration.
///
/// Feeds are fetched fresh on every call; no response caching happens here.
#[derive(Clone, Default)]
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(reqwest::Client::new())
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
