//! Storage implementations that need no database.

pub mod memory;
