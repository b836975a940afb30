use std::collections::HashSet;

use jsonwebtoken::Validation as JsonWebTokenValidation;

use crate::verifier::RsaVerifier;

const DEFAULT_LEEWAY_SECONDS: u64 = 60;

/// Claim checks applied to UAA issued access tokens.
///
/// The signature is always checked with [`RsaVerifier::ALGORITHM`]. `exp` is required and a
/// present `nbf` is honored, both within the leeway. A token carrying `aud` is only accepted when
/// it names one of the configured audiences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    audiences: Option<HashSet<String>>,
    issuers: Option<HashSet<String>>,
    leeway: u64,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            audiences: None,
            issuers: None,
            leeway: DEFAULT_LEEWAY_SECONDS,
        }
    }
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource ids this server answers to, e.g. the UAA client's `resource_ids`.
    pub fn aud<T: ToString>(mut self, audiences: &[T]) -> Self {
        self.audiences = Some(audiences.iter().map(ToString::to_string).collect());
        self
    }

    /// Accepted `iss` values, e.g. `http://uaa/oauth/token`.
    pub fn iss<T: ToString>(mut self, issuers: &[T]) -> Self {
        self.issuers = Some(issuers.iter().map(ToString::to_string).collect());
        self
    }

    /// Clock skew tolerated on `exp` and `nbf`, in seconds.
    pub fn leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    pub(crate) fn to_jsonwebtoken_validation(&self) -> JsonWebTokenValidation {
        let mut validation = JsonWebTokenValidation::new(RsaVerifier::ALGORITHM);

        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        validation.aud = self.audiences.clone();
        validation.iss = self.issuers.clone();

        validation
    }
}
