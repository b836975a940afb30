use http::HeaderMap;
use serde_json::{Map, Value};

use crate::transport::JsonTransport;

/// [`JsonTransport`] backed by a [`reqwest::Client`].
///
/// Timeouts, connection pooling and load balancing are whatever the given client was built with.
#[derive(Debug, Clone)]
pub struct ReqwestJsonTransport {
    http_client: reqwest::Client,
}

impl ReqwestJsonTransport {
    pub const fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for ReqwestJsonTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl JsonTransport for ReqwestJsonTransport {
    type Error = ReqwestJsonTransportError;

    async fn get_json(
        &self,
        uri: &str,
        headers: HeaderMap,
    ) -> Result<Map<String, Value>, Self::Error> {
        tracing::debug!(%uri, "Sending GET request");

        let body = self
            .http_client
            .get(uri)
            .headers(headers)
            .send()
            .await
            .map_err(ReqwestJsonTransportError::Request)?
            .error_for_status()
            .map_err(ReqwestJsonTransportError::Status)?
            .json::<Map<String, Value>>()
            .await
            .map_err(ReqwestJsonTransportError::Parse)?;

        Ok(body)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReqwestJsonTransportError {
    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Unexpected response status: {0}")]
    Status(#[source] reqwest::Error),
    #[error("Failed to parse response body as a JSON object: {0}")]
    Parse(#[source] reqwest::Error),
}
