use crate::{discovery::DiscoveryClient, error::InfallibleError};

/// A [`DiscoveryClient`] over a fixed list of service ids, for deployments without a registry.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscoveryClient {
    services: Vec<String>,
}

impl StaticDiscoveryClient {
    pub fn new<T: ToString>(services: &[T]) -> Self {
        Self {
            services: services.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DiscoveryClient for StaticDiscoveryClient {
    type Error = InfallibleError;

    async fn services(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.services.clone())
    }
}
