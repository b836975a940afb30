pub mod static_discovery_client;
