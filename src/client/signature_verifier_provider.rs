use std::future::Future;

use crate::error::ConfigurationError;

use super::VerifierResult;

/// Hands out a verifier for checking JWT signatures.
///
/// Only configuration mistakes are errors. A key that cannot be obtained right now is reported as
/// [`VerifierResult::Unavailable`].
#[cfg_attr(test, mockall::automock)]
pub trait SignatureVerifierProvider {
    fn signature_verifier(
        &self,
    ) -> impl Future<Output = Result<VerifierResult, ConfigurationError>> + Send;
}
