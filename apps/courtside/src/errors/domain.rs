//! Domain-level error type used across the engine and its adapters.
//!
//! This error type is storage- and transport-agnostic. Construction-time
//! rejections surface as `Validation`; snapshots that cannot be replayed
//! surface as `Restore`.

use thiserror::Error;

/// Validation kinds for construction-time rejections
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A match needs at least one set
    ZeroSets,
    /// Best-of formats must have an odd set count
    EvenSetCount,
    /// Slot 1 and slot 2 must both be singles players or both be teams
    MismatchedParticipants,
    DuplicateParticipantId,
    /// Doubles serving order must name every player once, alternating sides
    InvalidRotation,
    /// A rotation order was supplied for a singles match
    RotationForSingles,
    InvalidSlot,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Input validation or rules violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Persisted snapshot could not be turned back into a match
    #[error("restore error: {0}")]
    Restore(String),
    /// Environment configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn restore(detail: impl Into<String>) -> Self {
        Self::Restore(detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// The validation kind, when this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }
}
