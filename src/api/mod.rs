//! HTTP API module: request/response schemas, handlers, and routes.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
