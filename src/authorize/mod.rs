mod authorizer;
mod bearer;
mod layer;
mod service;
mod uaa_jwt_authorizer;

pub use authorizer::Authorizer;
pub use bearer::{BearerError, BearerExtractor};
pub use layer::{AuthorizationLayer, AuthorizationLayerExt};
pub use service::AuthorizationService;
pub use uaa_jwt_authorizer::{UaaJwtAuthorizeError, UaaJwtAuthorizer};
