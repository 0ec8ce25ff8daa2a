//! Error handling for the Courtside scoring engine.

pub mod domain;

pub use domain::{DomainError, ValidationKind};
