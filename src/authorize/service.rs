use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use http::Request;
use tower::Service;

use super::Authorizer;

/// Inserts the authorized value into the request extensions.
///
/// Requests that fail authorization are answered with a response built from the error.
#[derive(Debug, Clone)]
pub struct AuthorizationService<S, A> {
    service: S,
    authorizer: A,
}

impl<S, A> AuthorizationService<S, A> {
    pub fn new(service: S, authorizer: A) -> Self {
        Self {
            service,
            authorizer,
        }
    }
}

impl<S, A, B> Service<Request<B>> for AuthorizationService<S, A>
where
    A: Authorizer + Clone + Send + 'static,
    S: Service<Request<B>> + Clone + Send + 'static,
    S::Future: Send,
    S::Response: From<A::Error>,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        // The clone may not be ready, so take the one that was polled.
        let clone = self.service.clone();
        let mut service = std::mem::replace(&mut self.service, clone);
        let authorizer = self.authorizer.clone();

        Box::pin(async move {
            let authorized = match authorizer.authorize(request.headers()).await {
                Ok(authorized) => authorized,
                Err(err) => return Ok(From::from(err)),
            };

            request.extensions_mut().insert(authorized);

            service.call(request).await
        })
    }
}
