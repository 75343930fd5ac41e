//! HTTP API surface.

mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
