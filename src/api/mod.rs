pub mod client;
pub mod endpoints;
pub mod schema;
pub mod transport;

pub use client::ApiClient;
pub use endpoints::Endpoints;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};
