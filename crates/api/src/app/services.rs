//! Serialized access to the single in-memory warehouse.
//!
//! Every operation takes the warehouse lock once and runs to completion under
//! it, so multi-step operations (provision + add, dispatch + stock read) are
//! never interleaved with other requests.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;

use warehouse_core::{BinId, DomainError, ItemId};
use warehouse_inventory::{Bin, BinSnapshot, StockStatus, Warehouse, WarehouseMetrics};

/// Store `quantity` units of `item_id` in `bin_id`, creating the bin with
/// `bin_capacity` if it does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStock {
    pub bin_id: BinId,
    pub bin_capacity: u64,
    pub item_id: ItemId,
    pub quantity: u64,
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchStock {
    pub item_id: ItemId,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub dispatched: u64,
    /// Stock levels right after the dispatch.
    pub stock: StockStatus,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("warehouse state lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Default)]
pub struct WarehouseService {
    warehouse: Mutex<Warehouse>,
}

impl WarehouseService {
    pub fn new(warehouse: Warehouse) -> Self {
        Self {
            warehouse: Mutex::new(warehouse),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Warehouse>, ServiceError> {
        self.warehouse.lock().map_err(|_| ServiceError::LockPoisoned)
    }

    /// Add stock, auto-provisioning the bin on first use.
    ///
    /// A freshly provisioned bin stays registered even when the add itself is
    /// then rejected for lack of space.
    pub fn add_stock(&self, cmd: AddStock, at: DateTime<Utc>) -> Result<Vec<BinSnapshot>, ServiceError> {
        let mut warehouse = self.lock()?;

        if !warehouse.contains_bin(&cmd.bin_id) {
            warehouse.register_bin(Bin::new(cmd.bin_id.clone(), cmd.bin_capacity)?)?;
        }

        if let Err(e) = warehouse.add_item(&cmd.bin_id, cmd.item_id.clone(), cmd.quantity, cmd.height, at) {
            tracing::warn!(bin_id = %cmd.bin_id, item_id = %cmd.item_id, error = %e, "add stock rejected");
            return Err(e.into());
        }

        Ok(warehouse.bin_status())
    }

    pub fn dispatch_stock(&self, cmd: DispatchStock) -> Result<DispatchOutcome, ServiceError> {
        let mut warehouse = self.lock()?;
        let dispatched = warehouse.dispatch_item(&cmd.item_id, cmd.quantity)?;

        Ok(DispatchOutcome {
            dispatched,
            stock: warehouse.stock_status(),
        })
    }

    pub fn stock_status(&self) -> Result<StockStatus, ServiceError> {
        Ok(self.lock()?.stock_status())
    }

    pub fn bin_status(&self) -> Result<Vec<BinSnapshot>, ServiceError> {
        Ok(self.lock()?.bin_status())
    }

    pub fn metrics(&self) -> Result<WarehouseMetrics, ServiceError> {
        Ok(self.lock()?.metrics())
    }
}
