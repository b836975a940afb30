use jsonwebtoken::{errors::Error as JwtError, Algorithm};

/// Checks that `signature` was produced over `content` by the holder of the matching private key.
pub trait SignatureVerifier {
    fn algorithm(&self) -> Algorithm;

    fn verify(&self, content: &[u8], signature: &[u8]) -> Result<(), SignatureVerificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureVerificationError {
    #[error("Signature does not match the content")]
    Mismatch,
    #[error("Signature verification failed: {0}")]
    Verify(#[source] JwtError),
}
