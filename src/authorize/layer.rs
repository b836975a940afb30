use tower::Layer;

use super::{service::AuthorizationService, Authorizer};

/// Puts an [`Authorizer`] in front of every service it wraps.
///
/// All wrapped services share clones of the same authorizer.
#[derive(Debug, Clone)]
pub struct AuthorizationLayer<A> {
    authorizer: A,
}

impl<A: Authorizer> AuthorizationLayer<A> {
    pub fn new(authorizer: A) -> Self {
        Self { authorizer }
    }
}

impl<S, A> Layer<S> for AuthorizationLayer<A>
where
    A: Authorizer + Clone,
{
    type Service = AuthorizationService<S, A>;

    fn layer(&self, service: S) -> Self::Service {
        AuthorizationService::new(service, self.authorizer.clone())
    }
}

/// `authorizer.into_layer()` instead of `AuthorizationLayer::new(authorizer)`.
pub trait AuthorizationLayerExt: Authorizer + Clone + Sized {
    fn into_layer(self) -> AuthorizationLayer<Self> {
        AuthorizationLayer::new(self)
    }
}

impl<A> AuthorizationLayerExt for A where A: Authorizer + Clone {}
