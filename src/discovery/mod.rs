mod discovery_client;
mod impls;

pub use discovery_client::DiscoveryClient;
pub use impls::static_discovery_client::StaticDiscoveryClient;

#[cfg(test)]
pub use discovery_client::MockDiscoveryClient;
