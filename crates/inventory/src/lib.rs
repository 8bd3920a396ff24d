//! Bin/warehouse allocation model.
//!
//! This crate contains the storage rules, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no clock reads): per-bin capacity accounting,
//! lot placement and the multi-bin dispatch algorithm.

pub mod bin;
pub mod lot;
pub mod warehouse;

pub use bin::{Bin, BinSnapshot};
pub use lot::Lot;
pub use warehouse::{StockStatus, Warehouse, WarehouseMetrics};
