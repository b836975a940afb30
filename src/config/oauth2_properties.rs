use serde::Deserialize;

use super::PublicKeyEndpointProvider;

const PUBLIC_KEY_ENDPOINT_URI_ENV: &str = "OAUTH2_SIGNATURE_VERIFICATION_PUBLIC_KEY_ENDPOINT_URI";

/// OAuth2 settings of the resource server.
///
/// Deserializes from the kebab-case layout
///
/// ```yaml
/// signature-verification:
///   public-key-endpoint-uri: http://uaa/oauth/token_key
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OAuth2Properties {
    #[serde(default)]
    pub signature_verification: SignatureVerificationProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SignatureVerificationProperties {
    /// Where the UAA publishes its token signing key, e.g. `http://uaa/oauth/token_key`.
    #[serde(default)]
    pub public_key_endpoint_uri: Option<String>,
}

impl OAuth2Properties {
    pub fn new(public_key_endpoint_uri: Option<String>) -> Self {
        Self {
            signature_verification: SignatureVerificationProperties {
                public_key_endpoint_uri,
            },
        }
    }

    /// Reads `OAUTH2_SIGNATURE_VERIFICATION_PUBLIC_KEY_ENDPOINT_URI`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the properties from any variable source, e.g. a parsed `.env` file or a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let public_key_endpoint_uri = lookup(PUBLIC_KEY_ENDPOINT_URI_ENV);

        tracing::debug!(?public_key_endpoint_uri, "Loaded OAuth2 properties");

        Self::new(public_key_endpoint_uri)
    }
}

impl PublicKeyEndpointProvider for OAuth2Properties {
    fn public_key_endpoint_uri(&self) -> Option<&str> {
        self.signature_verification
            .public_key_endpoint_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }
}
