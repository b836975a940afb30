use std::sync::Arc;

/// Supplies the URI the signing key is fetched from.
pub trait PublicKeyEndpointProvider {
    /// Returns `None` if no endpoint is configured.
    fn public_key_endpoint_uri(&self) -> Option<&str>;
}

impl<T> PublicKeyEndpointProvider for Arc<T>
where
    T: PublicKeyEndpointProvider + ?Sized,
{
    fn public_key_endpoint_uri(&self) -> Option<&str> {
        self.as_ref().public_key_endpoint_uri()
    }
}
