#[derive(Debug, Clone, thiserror::Error)]
#[error("Infallible")]
pub struct InfallibleError;

/// Raised when the deployment lacks settings the client cannot work without.
///
/// This is never retried. It points at a configuration mistake, not at a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("No public key endpoint configured in application properties")]
    MissingPublicKeyEndpoint,
}

#[cfg(feature = "axum")]
mod axum {
    use axum::response::{IntoResponse, Response};
    use http::StatusCode;

    use super::ConfigurationError;

    impl IntoResponse for ConfigurationError {
        fn into_response(self) -> Response {
            tracing::error!(err = %self, "Misconfigured signature verification");

            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }

    impl From<ConfigurationError> for Response {
        fn from(value: ConfigurationError) -> Self {
            value.into_response()
        }
    }
}
