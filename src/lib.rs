#![deny(unsafe_code, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Fetches the token signing key from a UAA server and wraps it into an RSA verifier for JWTs.
//!
//! [`UaaSignatureVerifierClient`](client::UaaSignatureVerifierClient) is the entry point. It can be
//! plugged into a [tower](https://docs.rs/tower/latest/tower/) stack through
//! [`UaaJwtAuthorizer`](authorize::UaaJwtAuthorizer).

pub mod authorize;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod transport;
pub mod verifier;
