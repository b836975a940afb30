use std::{fmt::Display, ops::Deref, sync::Arc};

use http::HeaderMap;
use serde_json::Value;

use crate::{
    client::{SignatureVerifierProvider, VerifierResult},
    config::PublicKeyEndpointProvider,
    discovery::DiscoveryClient,
    error::ConfigurationError,
    transport::JsonTransport,
    verifier::RsaVerifier,
};

/// Field of the UAA `token_key` response holding the PEM encoded key.
const KEY_FIELD: &str = "value";

#[derive(Debug)]
pub struct UaaSignatureVerifierClientInner<T, P> {
    transport: T,
    properties: P,
}

impl<T, P> UaaSignatureVerifierClientInner<T, P> {
    const fn new(transport: T, properties: P) -> Self {
        Self {
            transport,
            properties,
        }
    }

    fn public_key_endpoint(&self) -> Result<&str, ConfigurationError>
    where
        P: PublicKeyEndpointProvider,
    {
        self.properties
            .public_key_endpoint_uri()
            .ok_or(ConfigurationError::MissingPublicKeyEndpoint)
    }

    /// Fetches the public key from the UAA and wraps it into an [`RsaVerifier`].
    ///
    /// Every call performs a fresh round-trip. Anything that goes wrong after the endpoint has been
    /// resolved is logged and reported as [`VerifierResult::Unavailable`].
    #[tracing::instrument(skip_all)]
    pub async fn fetch_signature_verifier(&self) -> Result<VerifierResult, ConfigurationError>
    where
        T: JsonTransport,
        T::Error: Display,
        P: PublicKeyEndpointProvider,
    {
        let endpoint = self.public_key_endpoint()?;

        tracing::debug!(%endpoint, "Fetching public key");

        let body = match self.transport.get_json(endpoint, HeaderMap::new()).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%err, %endpoint, "Could not contact UAA to get public key");

                return Ok(VerifierResult::Unavailable);
            }
        };

        let Some(key) = body.get(KEY_FIELD).and_then(Value::as_str) else {
            tracing::warn!(%endpoint, field = KEY_FIELD, "UAA response carries no public key");

            return Ok(VerifierResult::Unavailable);
        };

        match RsaVerifier::new(key) {
            Ok(verifier) => Ok(VerifierResult::Available(verifier)),
            Err(err) => {
                tracing::warn!(%err, %endpoint, "UAA returned an unusable public key");

                Ok(VerifierResult::Unavailable)
            }
        }
    }
}

/// Fetches the public key from a UAA server to create an [`RsaVerifier`].
#[derive(Debug)]
pub struct UaaSignatureVerifierClient<T, P> {
    inner: Arc<UaaSignatureVerifierClientInner<T, P>>,
}

impl<T, P> Clone for UaaSignatureVerifierClient<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, P> Deref for UaaSignatureVerifierClient<T, P> {
    type Target = UaaSignatureVerifierClientInner<T, P>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T, P> UaaSignatureVerifierClient<T, P> {
    /// Loads the available UAA servers from `discovery_client` before handing out the client.
    pub async fn new<D>(discovery_client: &D, transport: T, properties: P) -> Self
    where
        D: DiscoveryClient,
        D::Error: Display,
    {
        Self::warm_up(discovery_client).await;

        Self {
            inner: Arc::new(UaaSignatureVerifierClientInner::new(transport, properties)),
        }
    }

    #[tracing::instrument(skip_all)]
    async fn warm_up<D>(discovery_client: &D)
    where
        D: DiscoveryClient,
        D::Error: Display,
    {
        match discovery_client.services().await {
            Ok(services) => tracing::debug!(?services, "Discovered services"),
            Err(err) => tracing::warn!(%err, "Failed to load available services"),
        }
    }
}

impl<T, P> SignatureVerifierProvider for UaaSignatureVerifierClient<T, P>
where
    T: JsonTransport + Send + Sync,
    T::Error: Display,
    P: PublicKeyEndpointProvider + Send + Sync,
{
    async fn signature_verifier(&self) -> Result<VerifierResult, ConfigurationError> {
        self.fetch_signature_verifier().await
    }
}
