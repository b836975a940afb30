pub mod rsa_verifier;
