//! Admin authentication adapters. Implement AdminAuthorizer.

pub mod static_token;

pub use static_token::StaticTokenAuthorizer;
