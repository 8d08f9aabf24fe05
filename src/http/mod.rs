//! HTTP layer — transport seam, response envelope, signed dispatch.

pub mod dispatch;
pub mod envelope;
pub mod transport;

pub use dispatch::{ApiPath, Dispatcher};
pub use envelope::ResponseEnvelope;
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
