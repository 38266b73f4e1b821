//! HTTP adapter. axum router, handlers and the response composer.

pub mod handlers;
pub mod response;
pub mod router;

pub use response::ResponseComposer;
pub use router::{AppState, MAX_BODY_BYTES, build_router, cors_layer};
