use std::future::Future;

/// Enumerates the backend services known to the service registry.
#[cfg_attr(test, mockall::automock(type Error=anyhow::Error;))]
pub trait DiscoveryClient {
    type Error;

    fn services(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}
