use std::{marker::PhantomData, ops::Deref, sync::Arc};

use http::{HeaderMap, StatusCode};
use jsonwebtoken::errors::Error as JwtError;
use serde::de::DeserializeOwned;

use crate::{
    authorize::{
        bearer::{BearerError, BearerExtractor},
        Authorizer,
    },
    client::{SignatureVerifierProvider, VerifierResult},
    error::ConfigurationError,
    verifier::Validation,
};

#[derive(Debug)]
pub struct UaaJwtAuthorizerInner<P, C> {
    bearer_extractor: BearerExtractor,
    provider: P,
    validation: Validation,
    _claims: PhantomData<C>,
}

impl<P, C> UaaJwtAuthorizerInner<P, C> {
    const fn new(provider: P, validation: Validation) -> Self {
        Self {
            bearer_extractor: BearerExtractor::new(),
            provider,
            validation,
            _claims: PhantomData,
        }
    }
}

/// Validates bearer tokens with a verifier freshly obtained from `P` on every request.
#[derive(Debug)]
pub struct UaaJwtAuthorizer<P, C> {
    inner: Arc<UaaJwtAuthorizerInner<P, C>>,
}

impl<P, C> Clone for UaaJwtAuthorizer<P, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P, C> Deref for UaaJwtAuthorizer<P, C> {
    type Target = UaaJwtAuthorizerInner<P, C>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<P, C> UaaJwtAuthorizer<P, C> {
    pub fn new(provider: P, validation: Validation) -> Self {
        Self {
            inner: Arc::new(UaaJwtAuthorizerInner::new(provider, validation)),
        }
    }
}

impl<P, C> Authorizer for UaaJwtAuthorizer<P, C>
where
    P: SignatureVerifierProvider + Send + Sync,
    C: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Authorized = C;

    type Error = UaaJwtAuthorizeError;

    #[tracing::instrument(skip_all)]
    async fn authorize(&self, headers: &HeaderMap) -> Result<Self::Authorized, Self::Error> {
        let token = self
            .bearer_extractor
            .extract_bearer(headers)
            .map_err(UaaJwtAuthorizeError::Bearer)?;

        let verifier = match self.provider.signature_verifier().await? {
            VerifierResult::Available(verifier) => verifier,
            VerifierResult::Unavailable => return Err(UaaJwtAuthorizeError::VerifierUnavailable),
        };

        let token_data = verifier
            .decode::<C>(token, &self.validation)
            .map_err(UaaJwtAuthorizeError::Jwt)?;

        Ok(token_data.claims)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UaaJwtAuthorizeError {
    #[error("Bearer extraction error: {0}")]
    Bearer(#[source] BearerError),
    #[error("Signature verification misconfigured: {0}")]
    Configuration(
        #[source]
        #[from]
        ConfigurationError,
    ),
    #[error("No signature verifier available")]
    VerifierUnavailable,
    #[error("JWT validation error: {0}")]
    Jwt(#[source] JwtError),
}

impl UaaJwtAuthorizeError {
    /// `401` for bad tokens, `503` while no verifier can be obtained, `500` for misconfiguration.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Bearer(_) | Self::Jwt(_) => StatusCode::UNAUTHORIZED,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::VerifierUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[cfg(feature = "axum")]
mod axum {
    use axum::response::{IntoResponse, Response};
    use http::{header, StatusCode};

    use super::UaaJwtAuthorizeError;

    impl IntoResponse for UaaJwtAuthorizeError {
        fn into_response(self) -> Response {
            match &self {
                UaaJwtAuthorizeError::Bearer(_) | UaaJwtAuthorizeError::Jwt(_) => {
                    tracing::warn!(err = %self, "Unauthorized");
                }
                UaaJwtAuthorizeError::Configuration(_) => {
                    tracing::error!(err = %self, "Signature verification misconfigured");
                }
                UaaJwtAuthorizeError::VerifierUnavailable => {
                    tracing::warn!("Signature verifier unavailable");
                }
            }

            let status = self.status_code();

            if status == StatusCode::UNAUTHORIZED {
                return (status, [(header::WWW_AUTHENTICATE, "Bearer")]).into_response();
            }

            status.into_response()
        }
    }

    impl From<UaaJwtAuthorizeError> for Response {
        fn from(value: UaaJwtAuthorizeError) -> Self {
            value.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use http::{header::AUTHORIZATION, HeaderValue};
    use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use crate::{
        client::{MockSignatureVerifierProvider, UaaSignatureVerifierClient},
        config::OAuth2Properties,
        discovery::StaticDiscoveryClient,
        test::{init_tracing, FOREIGN_PRIVATE_KEY, UAA_PRIVATE_KEY, UAA_PUBLIC_KEY},
        transport::MockJsonTransport,
        verifier::RsaVerifier,
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Claims {
        user_name: String,
        aud: Vec<String>,
        exp: u64,
    }

    fn claims() -> Claims {
        Claims {
            user_name: String::from("admin"),
            aud: vec![String::from("accounting")],
            exp: get_current_timestamp() + 3600,
        }
    }

    fn bearer_headers(claims: &Claims, private_key: &str) -> HeaderMap {
        let key = EncodingKey::from_rsa_pem(private_key.as_bytes()).expect("Invalid private key");
        let jwt = encode(&Header::new(Algorithm::RS256), claims, &key).expect("Failed to encode");

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {jwt}")).expect("Invalid header value"),
        );
        headers
    }

    fn available_provider(times: usize) -> MockSignatureVerifierProvider {
        let mut provider = MockSignatureVerifierProvider::default();

        provider.expect_signature_verifier().times(times).returning(|| {
            Box::pin(async {
                let verifier = RsaVerifier::new(UAA_PUBLIC_KEY).expect("Invalid public key");

                Ok(VerifierResult::Available(verifier))
            })
        });

        provider
    }

    fn authorizer<P>(provider: P) -> UaaJwtAuthorizer<P, Claims> {
        UaaJwtAuthorizer::new(provider, Validation::new().aud(&["accounting"]))
    }

    #[tokio::test]
    async fn authorizes_token_signed_by_uaa() {
        init_tracing();

        let claims = claims();
        let headers = bearer_headers(&claims, UAA_PRIVATE_KEY);

        let authorized = authorizer(available_provider(1))
            .authorize(&headers)
            .await
            .expect("Token should be authorized");

        assert_eq!(authorized, claims);
    }

    #[tokio::test]
    async fn fetches_a_verifier_for_every_request() {
        init_tracing();

        let headers = bearer_headers(&claims(), UAA_PRIVATE_KEY);
        let authorizer = authorizer(available_provider(2));

        authorizer.authorize(&headers).await.expect("First request");
        authorizer.authorize(&headers).await.expect("Second request");
    }

    #[tokio::test]
    async fn rejects_token_signed_by_foreign_key() {
        init_tracing();

        let headers = bearer_headers(&claims(), FOREIGN_PRIVATE_KEY);

        let result = authorizer(available_provider(1)).authorize(&headers).await;

        assert!(matches!(result, Err(UaaJwtAuthorizeError::Jwt(_))));
    }

    #[tokio::test]
    async fn missing_bearer_skips_verifier_lookup() {
        init_tracing();

        let mut provider = MockSignatureVerifierProvider::default();

        provider.expect_signature_verifier().never();

        let result = authorizer(provider).authorize(&HeaderMap::new()).await;

        assert!(matches!(result, Err(UaaJwtAuthorizeError::Bearer(_))));
    }

    #[tokio::test]
    async fn unavailable_verifier_denies_token() {
        init_tracing();

        let mut provider = MockSignatureVerifierProvider::default();

        provider
            .expect_signature_verifier()
            .times(1)
            .returning(|| Box::pin(async { Ok(VerifierResult::Unavailable) }));

        let headers = bearer_headers(&claims(), UAA_PRIVATE_KEY);

        let result = authorizer(provider).authorize(&headers).await;

        assert!(matches!(
            result,
            Err(UaaJwtAuthorizeError::VerifierUnavailable)
        ));
    }

    #[tokio::test]
    async fn configuration_error_is_propagated() {
        init_tracing();

        let mut provider = MockSignatureVerifierProvider::default();

        provider
            .expect_signature_verifier()
            .times(1)
            .returning(|| Box::pin(async { Err(ConfigurationError::MissingPublicKeyEndpoint) }));

        let headers = bearer_headers(&claims(), UAA_PRIVATE_KEY);

        let result = authorizer(provider).authorize(&headers).await;

        assert!(matches!(
            result,
            Err(UaaJwtAuthorizeError::Configuration(
                ConfigurationError::MissingPublicKeyEndpoint
            ))
        ));
    }

    #[tokio::test]
    async fn authorizes_with_key_fetched_from_uaa() {
        init_tracing();

        let mut transport = MockJsonTransport::default();

        transport.expect_get_json().times(1).returning(|_, _| {
            Box::pin(async {
                json!({"alg": "SHA256withRSA", "value": UAA_PUBLIC_KEY})
                    .as_object()
                    .cloned()
                    .ok_or_else(|| anyhow!("Body is not an object"))
            })
        });

        let client = UaaSignatureVerifierClient::new(
            &StaticDiscoveryClient::new(&["uaa"]),
            transport,
            OAuth2Properties::new(Some(String::from("http://uaa/oauth/token_key"))),
        )
        .await;

        let claims = claims();
        let headers = bearer_headers(&claims, UAA_PRIVATE_KEY);

        let authorized = authorizer(client)
            .authorize(&headers)
            .await
            .expect("Token should be authorized");

        assert_eq!(authorized, claims);
    }

    #[test]
    fn status_codes_separate_token_faults_from_server_faults() {
        assert_eq!(
            UaaJwtAuthorizeError::Bearer(BearerError::Missing).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UaaJwtAuthorizeError::Jwt(jsonwebtoken::errors::ErrorKind::InvalidToken.into())
                .status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            UaaJwtAuthorizeError::VerifierUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            UaaJwtAuthorizeError::from(ConfigurationError::MissingPublicKeyEndpoint).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[cfg(feature = "axum")]
    #[test]
    fn only_unauthorized_responses_challenge_for_bearer() {
        use axum::response::IntoResponse;
        use http::header::WWW_AUTHENTICATE;

        let unauthorized = UaaJwtAuthorizeError::Bearer(BearerError::Format).into_response();

        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            unauthorized.headers().get(WWW_AUTHENTICATE),
            Some(&HeaderValue::from_static("Bearer"))
        );

        let unavailable = UaaJwtAuthorizeError::VerifierUnavailable.into_response();

        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(unavailable.headers().get(WWW_AUTHENTICATE).is_none());
    }
}
