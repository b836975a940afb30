use std::fmt;

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use jsonwebtoken::{crypto, decode, errors::Error as JwtError, Algorithm, DecodingKey, TokenData};
use serde::de::DeserializeOwned;

use crate::verifier::{SignatureVerificationError, SignatureVerifier, Validation};

const SSH_RSA: &str = "ssh-rsa";

/// Verifies `SHA256withRSA` signatures against an RSA public key.
#[derive(Clone)]
pub struct RsaVerifier {
    key: String,
    decoding_key: DecodingKey,
}

impl RsaVerifier {
    pub const ALGORITHM: Algorithm = Algorithm::RS256;

    /// Accepts `PUBLIC KEY` and `RSA PUBLIC KEY` PEM blocks as well as OpenSSH `ssh-rsa` lines.
    ///
    /// Surrounding whitespace is ignored. The material is kept as given.
    pub fn new(key: impl Into<String>) -> Result<Self, RsaVerifierError> {
        let key = key.into();
        let trimmed = key.trim();

        let mut fields = trimmed.split_whitespace();

        let decoding_key = if fields.next() == Some(SSH_RSA) {
            let blob = fields.next().ok_or(RsaVerifierError::MalformedSshKey)?;

            ssh_rsa_decoding_key(blob)?
        } else {
            DecodingKey::from_rsa_pem(trimmed.as_bytes()).map_err(RsaVerifierError::InvalidKey)?
        };

        Ok(Self { key, decoding_key })
    }

    /// The key material this verifier was built from.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Verifies the signature of `jwt` and checks its claims against `validation`.
    pub fn decode<C>(&self, jwt: &str, validation: &Validation) -> Result<TokenData<C>, JwtError>
    where
        C: DeserializeOwned,
    {
        decode::<C>(
            jwt,
            &self.decoding_key,
            &validation.to_jsonwebtoken_validation(),
        )
    }
}

/// Reads the `ssh-rsa` wire format: the key type, `e` and `n`, each prefixed with a `u32` length.
fn ssh_rsa_decoding_key(blob: &str) -> Result<DecodingKey, RsaVerifierError> {
    let blob = STANDARD
        .decode(blob)
        .map_err(RsaVerifierError::InvalidSshEncoding)?;

    let mut rest = blob.as_slice();

    if ssh_field(&mut rest)? != SSH_RSA.as_bytes() {
        return Err(RsaVerifierError::MalformedSshKey);
    }

    let exponent = without_leading_zeros(ssh_field(&mut rest)?);
    let modulus = without_leading_zeros(ssh_field(&mut rest)?);

    if exponent.is_empty() || modulus.is_empty() || !rest.is_empty() {
        return Err(RsaVerifierError::MalformedSshKey);
    }

    Ok(DecodingKey::from_rsa_raw_components(modulus, exponent))
}

fn ssh_field<'a>(rest: &mut &'a [u8]) -> Result<&'a [u8], RsaVerifierError> {
    let bytes: &'a [u8] = *rest;

    let (len, tail) = bytes
        .split_first_chunk::<4>()
        .ok_or(RsaVerifierError::MalformedSshKey)?;
    let len = u32::from_be_bytes(*len) as usize;

    let field = tail.get(..len).ok_or(RsaVerifierError::MalformedSshKey)?;
    *rest = &tail[len..];

    Ok(field)
}

// mpints carry a leading zero byte when the high bit is set.
fn without_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(bytes.len());

    &bytes[start..]
}

impl SignatureVerifier for RsaVerifier {
    fn algorithm(&self) -> Algorithm {
        Self::ALGORITHM
    }

    fn verify(&self, content: &[u8], signature: &[u8]) -> Result<(), SignatureVerificationError> {
        let signature = URL_SAFE_NO_PAD.encode(signature);

        let valid = crypto::verify(&signature, content, &self.decoding_key, Self::ALGORITHM)
            .map_err(SignatureVerificationError::Verify)?;

        if !valid {
            return Err(SignatureVerificationError::Mismatch);
        }

        Ok(())
    }
}

impl fmt::Debug for RsaVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaVerifier")
            .field("algorithm", &Self::ALGORITHM)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PartialEq for RsaVerifier {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RsaVerifier {}

#[derive(Debug, thiserror::Error)]
pub enum RsaVerifierError {
    #[error("Key material is not a PEM encoded RSA public key: {0}")]
    InvalidKey(#[source] JwtError),
    #[error("ssh-rsa key is not valid base64: {0}")]
    InvalidSshEncoding(#[source] base64::DecodeError),
    #[error("ssh-rsa key is malformed")]
    MalformedSshKey,
}
