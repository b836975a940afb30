mod impls;
mod signature_verifier;
mod validation;

pub use impls::rsa_verifier::{RsaVerifier, RsaVerifierError};
pub use signature_verifier::{SignatureVerificationError, SignatureVerifier};
pub use validation::Validation;
