mod default_client;
mod error;
mod request;
mod transport;

pub use crate::default_client::ConciergeHttpClient;
pub use crate::default_client::ConciergeRequestBuilder;
pub use crate::default_client::build_reqwest_client;
pub use crate::error::TransportError;
pub use crate::request::Request;
pub use crate::request::Response;
pub use crate::transport::HttpTransport;
pub use crate::transport::ReqwestTransport;
