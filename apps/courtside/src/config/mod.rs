//! Match configuration: format and participants, plus environment defaults.

pub mod env;
pub mod format;

pub use format::{MatchConfig, MatchFormat};
