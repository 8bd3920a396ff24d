//! Domain error model.

use thiserror::Error;

use crate::id::{BinId, ItemId};

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// capacity, stock shortfalls, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. zero quantity, empty identifier).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Storing would push a bin past its maximum capacity. Nothing was stored.
    #[error("not enough space in bin {bin_id} (requested volume: {requested}, free: {free})")]
    InsufficientCapacity {
        bin_id: BinId,
        requested: u64,
        free: u64,
    },

    /// A dispatch could not be fully satisfied.
    ///
    /// `available` units were already removed from their bins when this is returned.
    #[error("not enough stock to dispatch {item_id}. Requested: {requested}, Available: {available}")]
    InsufficientStock {
        item_id: ItemId,
        requested: u64,
        available: u64,
    },

    /// A requested resource was not found (domain-level).
    #[error("not found: {0}")]
    NotFound(String),

    /// A conflict occurred (e.g. duplicate bin registration).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
