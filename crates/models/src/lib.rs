//! Persisted record definitions and the mapping from untyped request
//! payloads into drafts and patches for the `sepatu` table.

pub mod errors;
pub mod db;
pub mod item;
pub mod payload;
