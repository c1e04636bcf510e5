//! Shared building blocks for the workspace crates: wire types that every
//! HTTP response is shaped into, and logging initialisation.

pub mod types;
pub mod utils;
