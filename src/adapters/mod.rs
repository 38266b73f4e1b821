//! Infrastructure adapters. Implement ports.
//!
//! HTTP surface, submission stores, admin auth. Map errors to domain errors.

pub mod auth;
pub mod http;
pub mod persistence;
