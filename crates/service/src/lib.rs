//! Service layer for shoe-cleaning service orders.
//! - `item::repository` is the store gateway: five single-record operations
//!   behind one trait, with SeaORM and in-memory implementations.
//! - `item::service` sequences payload mapping and the gateway, and turns
//!   "zero rows" into `ServiceError::NotFound`.

pub mod errors;
pub mod db;
pub mod storage;
pub mod item;
