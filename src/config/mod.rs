mod oauth2_properties;
mod public_key_endpoint_provider;

pub use oauth2_properties::{OAuth2Properties, SignatureVerificationProperties};
pub use public_key_endpoint_provider::PublicKeyEndpointProvider;
