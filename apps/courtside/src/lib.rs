#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod persistence;
pub mod telemetry;


// Re-exports for public API
pub use config::{MatchConfig, MatchFormat};
pub use domain::{
    summarize, DisplayScore, Match, MatchSnapshot, MatchSummary, Member, Outcome, Participant,
    Player, PointCall, Seat, Slot,
};
pub use errors::{DomainError, ValidationKind};
pub use persistence::{JsonFileStore, MatchStore, MemoryStore, StoreError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
