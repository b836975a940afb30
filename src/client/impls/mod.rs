pub mod uaa_signature_verifier_client;
