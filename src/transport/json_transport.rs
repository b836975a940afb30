use std::future::Future;

use http::HeaderMap;
use serde_json::{Map, Value};

/// Performs a GET and deserializes the response body into a generic JSON object.
#[cfg_attr(test, mockall::automock(type Error=anyhow::Error;))]
pub trait JsonTransport {
    type Error;

    fn get_json(
        &self,
        uri: &str,
        headers: HeaderMap,
    ) -> impl Future<Output = Result<Map<String, Value>, Self::Error>> + Send;
}
