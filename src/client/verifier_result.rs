use crate::verifier::RsaVerifier;

/// Outcome of fetching the signing key.
///
/// [`VerifierResult::Unavailable`] means signatures cannot currently be verified. Callers decide
/// how to degrade, e.g. by denying the token or asking again on a later request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierResult {
    Available(RsaVerifier),
    Unavailable,
}

impl VerifierResult {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn as_verifier(&self) -> Option<&RsaVerifier> {
        match self {
            Self::Available(verifier) => Some(verifier),
            Self::Unavailable => None,
        }
    }

    pub fn into_verifier(self) -> Option<RsaVerifier> {
        match self {
            Self::Available(verifier) => Some(verifier),
            Self::Unavailable => None,
        }
    }
}

