//! SeaORM-backed persistence functions.

pub mod item_store;
