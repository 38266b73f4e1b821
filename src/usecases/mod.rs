//! Application use cases. Orchestrate domain logic via ports.

pub mod contact_service;
pub mod store_gateway;
pub mod validator;

pub use contact_service::{ContactService, DEFAULT_LIST_CAP};
pub use store_gateway::{DEFAULT_STORE_BOUND, StoreGateway};
pub use validator::validate_submission;
