use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use warehouse_core::{BinId, DomainError, DomainResult, Entity, ItemId};

use crate::bin::{Bin, BinSnapshot};

/// Root of the allocation model: a set of bins, kept in registration order.
///
/// Invariant: the summed `max_capacity` of all bins fits in a `u64`. Every
/// warehouse-wide total (occupied space, per-item quantity) is bounded by it,
/// so the aggregates below cannot overflow.
///
/// The warehouse itself does no locking. Callers that share one across
/// threads must serialize access to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warehouse {
    bins: Vec<Bin>,
}

/// Total remaining quantity per item across every bin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockStatus(BTreeMap<ItemId, u64>);

impl StockStatus {
    /// Remaining quantity for `item_id` (zero when nothing is stocked).
    pub fn quantity_of(&self, item_id: &ItemId) -> u64 {
        self.0.get(item_id).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u64)> {
        self.0.iter().map(|(id, qty)| (id, *qty))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Warehouse-wide space figures (dashboard view).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseMetrics {
    pub total_capacity: u64,
    pub occupied_space: u64,
    /// Percentage of total capacity in use, `0.0..=100.0`.
    pub space_utilization: f64,
    pub total_bins: usize,
    /// Bins currently holding anything.
    pub active_bins: usize,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bin. Duplicate ids are rejected, never merged.
    ///
    /// A bin whose capacity would push the warehouse total past `u64::MAX`
    /// is rejected as well.
    pub fn register_bin(&mut self, bin: Bin) -> DomainResult<()> {
        if self.contains_bin(bin.id()) {
            return Err(DomainError::conflict(format!(
                "bin {} is already registered",
                bin.id()
            )));
        }
        if self.total_capacity().checked_add(bin.max_capacity()).is_none() {
            return Err(DomainError::validation(format!(
                "capacity of bin {} exceeds what the warehouse can account for",
                bin.id()
            )));
        }
        tracing::info!(bin_id = %bin.id(), max_capacity = bin.max_capacity(), "bin registered");
        self.bins.push(bin);
        Ok(())
    }

    pub fn contains_bin(&self, bin_id: &BinId) -> bool {
        self.bin(bin_id).is_some()
    }

    pub fn bin(&self, bin_id: &BinId) -> Option<&Bin> {
        self.bins.iter().find(|b| b.id() == bin_id)
    }

    fn bin_mut(&mut self, bin_id: &BinId) -> Option<&mut Bin> {
        self.bins.iter_mut().find(|b| b.id() == bin_id)
    }

    /// Summed `max_capacity` of every bin.
    pub fn total_capacity(&self) -> u64 {
        self.bins.iter().map(Bin::max_capacity).sum()
    }

    /// Bins in registration order.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Store a new lot in an already registered bin.
    pub fn add_item(
        &mut self,
        bin_id: &BinId,
        item_id: ItemId,
        quantity: u64,
        unit_height: u64,
        at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let bin = self
            .bin_mut(bin_id)
            .ok_or_else(|| DomainError::not_found(format!("bin {bin_id}")))?;
        bin.add_item(item_id, quantity, unit_height, at)
    }

    /// Bins holding `item_id`, least recently stocked first.
    ///
    /// Bins that were never stocked sort last; ties keep registration order.
    pub fn find_bins_for_item(&self, item_id: &ItemId) -> Vec<&Bin> {
        self.dispatch_order(item_id)
            .into_iter()
            .map(|idx| &self.bins[idx])
            .collect()
    }

    fn dispatch_order(&self, item_id: &ItemId) -> Vec<usize> {
        let mut order: Vec<usize> = self
            .bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.holds(item_id))
            .map(|(idx, _)| idx)
            .collect();

        // Stable: equal keys stay in registration order.
        order.sort_by_key(|&idx| {
            let stored = self.bins[idx].last_stored_at();
            (stored.is_none(), stored)
        });
        order
    }

    /// Remove `quantity` units of `item_id`, draining the oldest bins first.
    ///
    /// Not transactional: when stock runs short, every unit found has already
    /// been removed by the time `InsufficientStock` is returned, and
    /// `available` reports exactly that amount.
    pub fn dispatch_item(&mut self, item_id: &ItemId, quantity: u64) -> DomainResult<u64> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let mut dispatched = 0;
        for idx in self.dispatch_order(item_id) {
            let bin = &mut self.bins[idx];
            let removed = bin.remove_item(item_id, quantity - dispatched);
            tracing::debug!(bin_id = %bin.id(), item_id = %item_id, removed, "bin drained");

            dispatched += removed;
            if dispatched >= quantity {
                break;
            }
        }

        if dispatched < quantity {
            tracing::warn!(item_id = %item_id, requested = quantity, available = dispatched, "dispatch short");
            return Err(DomainError::InsufficientStock {
                item_id: item_id.clone(),
                requested: quantity,
                available: dispatched,
            });
        }

        tracing::info!(item_id = %item_id, dispatched, "dispatch completed");
        Ok(dispatched)
    }

    pub fn stock_status(&self) -> StockStatus {
        let mut totals: BTreeMap<ItemId, u64> = BTreeMap::new();
        for lot in self.bins.iter().flat_map(|bin| bin.lots()) {
            *totals.entry(lot.item_id().clone()).or_insert(0) += lot.quantity();
        }
        StockStatus(totals)
    }

    pub fn bin_status(&self) -> Vec<BinSnapshot> {
        self.bins.iter().map(Bin::snapshot).collect()
    }

    pub fn metrics(&self) -> WarehouseMetrics {
        let total_capacity = self.total_capacity();
        let occupied_space: u64 = self.bins.iter().map(Bin::occupied).sum();
        let space_utilization = if total_capacity == 0 {
            0.0
        } else {
            occupied_space as f64 / total_capacity as f64 * 100.0
        };

        WarehouseMetrics {
            total_capacity,
            occupied_space,
            space_utilization,
            total_bins: self.bins.len(),
            active_bins: self.bins.iter().filter(|b| b.occupied() > 0).count(),
        }
    }
}
