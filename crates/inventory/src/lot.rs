use chrono::{DateTime, Utc};

use warehouse_core::ItemId;

/// One stocking event's worth of an item inside a bin.
///
/// Lots are never merged: storing the same item twice produces two lots, and
/// dispatch drains them in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lot {
    item_id: ItemId,
    quantity: u64,
    unit_height: u64,
    stored_at: DateTime<Utc>,
}

impl Lot {
    pub(crate) fn new(item_id: ItemId, quantity: u64, unit_height: u64, stored_at: DateTime<Utc>) -> Self {
        Self {
            item_id,
            quantity,
            unit_height,
            stored_at,
        }
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit_height(&self) -> u64 {
        self.unit_height
    }

    pub fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }

    /// Space currently taken by this lot (`quantity * unit_height`).
    pub fn volume(&self) -> u64 {
        // Cannot overflow: the initial volume was checked and quantity only shrinks.
        self.quantity * self.unit_height
    }

    pub fn is_depleted(&self) -> bool {
        self.quantity == 0
    }

    /// Take up to `wanted` units out of the lot, returning how many were taken.
    pub(crate) fn take(&mut self, wanted: u64) -> u64 {
        let taken = self.quantity.min(wanted);
        self.quantity -= taken;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(quantity: u64) -> Lot {
        Lot::new(ItemId::new("X").unwrap(), quantity, 10, Utc::now())
    }

    #[test]
    fn take_is_capped_by_remaining_quantity() {
        let mut l = lot(5);
        assert_eq!(l.take(3), 3);
        assert_eq!(l.quantity(), 2);
        assert_eq!(l.volume(), 20);

        assert_eq!(l.take(10), 2);
        assert!(l.is_depleted());
        assert_eq!(l.volume(), 0);
    }
}
