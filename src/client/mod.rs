mod impls;
mod signature_verifier_provider;
mod verifier_result;

pub use impls::uaa_signature_verifier_client::UaaSignatureVerifierClient;
pub use signature_verifier_provider::SignatureVerifierProvider;
pub use verifier_result::VerifierResult;

#[cfg(test)]
pub use signature_verifier_provider::MockSignatureVerifierProvider;
