use chrono::{DateTime, Utc};

use warehouse_core::{BinId, DomainError, DomainResult, Entity, ItemId};

use crate::lot::Lot;

/// Entity: a capacity-bounded storage bin.
///
/// Invariants:
/// - `occupied` always equals the summed volume of the lots held.
/// - `occupied <= max_capacity`; an add that would break this is rejected
///   before anything is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    id: BinId,
    max_capacity: u64,
    occupied: u64,
    lots: Vec<Lot>,
    last_stored_at: Option<DateTime<Utc>>,
}

/// Read-only view of a bin, as handed to callers outside the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinSnapshot {
    pub id: BinId,
    pub occupied: u64,
    pub max_capacity: u64,
    pub lots: Vec<Lot>,
}

impl Bin {
    /// Create an empty bin.
    pub fn new(id: BinId, max_capacity: u64) -> DomainResult<Self> {
        if max_capacity == 0 {
            return Err(DomainError::validation("bin capacity must be positive"));
        }
        Ok(Self {
            id,
            max_capacity,
            occupied: 0,
            lots: Vec::new(),
            last_stored_at: None,
        })
    }

    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    pub fn occupied(&self) -> u64 {
        self.occupied
    }

    pub fn free_space(&self) -> u64 {
        self.max_capacity - self.occupied
    }

    /// Lots in arrival order (oldest first).
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// When the bin last accepted stock, if ever.
    pub fn last_stored_at(&self) -> Option<DateTime<Utc>> {
        self.last_stored_at
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    pub fn has_space(&self, extra_volume: u64) -> bool {
        self.occupied
            .checked_add(extra_volume)
            .is_some_and(|total| total <= self.max_capacity)
    }

    pub fn holds(&self, item_id: &ItemId) -> bool {
        self.lots.iter().any(|lot| lot.item_id() == item_id)
    }

    /// Remaining quantity of `item_id` across all lots in this bin.
    pub fn quantity_of(&self, item_id: &ItemId) -> u64 {
        self.lots
            .iter()
            .filter(|lot| lot.item_id() == item_id)
            .map(Lot::quantity)
            .sum()
    }

    /// Store `quantity` units of `item_id` as a new lot stamped `at`.
    ///
    /// All-or-nothing: on error the bin is left exactly as it was.
    pub fn add_item(
        &mut self,
        item_id: ItemId,
        quantity: u64,
        unit_height: u64,
        at: DateTime<Utc>,
    ) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if unit_height == 0 {
            return Err(DomainError::validation("height must be positive"));
        }

        let volume = quantity
            .checked_mul(unit_height)
            .ok_or_else(|| DomainError::validation("quantity * height overflows"))?;

        if !self.has_space(volume) {
            return Err(DomainError::InsufficientCapacity {
                bin_id: self.id.clone(),
                requested: volume,
                free: self.free_space(),
            });
        }

        tracing::debug!(bin_id = %self.id, item_id = %item_id, quantity, unit_height, "lot appended");

        self.lots.push(Lot::new(item_id, quantity, unit_height, at));
        self.occupied += volume;
        self.last_stored_at = Some(at);
        Ok(())
    }

    /// Remove up to `quantity` units of `item_id`, oldest lots first.
    ///
    /// Never fails; returns how many units were actually removed, which may be
    /// fewer than requested (including zero). Emptied lots are pruned.
    pub fn remove_item(&mut self, item_id: &ItemId, quantity: u64) -> u64 {
        let mut removed = 0;

        for lot in self.lots.iter_mut().filter(|lot| lot.item_id() == item_id) {
            if removed >= quantity {
                break;
            }
            let taken = lot.take(quantity - removed);
            self.occupied -= taken * lot.unit_height();
            removed += taken;
        }

        self.lots.retain(|lot| !lot.is_depleted());
        removed
    }

    pub fn snapshot(&self) -> BinSnapshot {
        BinSnapshot {
            id: self.id.clone(),
            occupied: self.occupied,
            max_capacity: self.max_capacity,
            lots: self.lots.clone(),
        }
    }
}

impl Entity for Bin {
    type Id = BinId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
