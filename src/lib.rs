//! portfolio-contact: contact-form intake for a portfolio site, with Hexagonal Architecture.
//!
//! Validation -> bounded persistence -> fixed JSON response contract.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
