//! Test support for courtside integration tests
//!
//! Shared logging initialization, unique identifiers for isolated stores,
//! ready-made match configurations and scripted play on the public API.

pub mod fixtures;
pub mod logging;
pub mod play;
pub mod unique_helpers;
