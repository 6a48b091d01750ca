//! Shared test utilities
//!
//! - Fixed instants and sample entries
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
