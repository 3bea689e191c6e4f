//! HTTP boundary: request validation, response mapping and server shutdown.

pub mod routes;
pub mod shutdown;

pub use routes::{AppState, email_routes};
pub use shutdown::shutdown_on;
