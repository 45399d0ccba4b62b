//! ChatMind client core: session persistence, backend REST calls, live room
//! sockets, routing, and the chat view's state, independent of the browser.

pub mod api;
pub mod config;
pub mod errors;
pub mod live;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use errors::ClientError;
