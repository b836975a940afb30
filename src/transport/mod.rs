mod impls;
mod json_transport;

pub use impls::reqwest_json_transport::{ReqwestJsonTransport, ReqwestJsonTransportError};
pub use json_transport::JsonTransport;

#[cfg(test)]
pub use json_transport::MockJsonTransport;
