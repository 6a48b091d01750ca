//! Integration tests: storage, rendering and the command line working together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod persistence_flow;
pub mod render_flow;
