use serde::Deserialize;
use serde_json::{Map, Value};

use warehouse_core::{BinId, DomainError, DomainResult, ItemId};
use warehouse_inventory::{BinSnapshot, Lot, StockStatus};

use crate::app::services::{AddStock, DispatchStock};
use crate::config::ApiConfig;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddStockRequest {
    pub bin_id: Option<String>,
    pub bin_capacity: Option<i64>,
    pub item_id: String,
    pub quantity: i64,
    pub height: i64,
}

#[derive(Debug, Deserialize)]
pub struct DispatchStockRequest {
    pub item_id: String,
    pub quantity: i64,
}

fn positive(field: &str, value: i64) -> DomainResult<u64> {
    if value <= 0 {
        return Err(DomainError::validation(format!("{field} must be positive")));
    }
    Ok(value as u64)
}

impl AddStockRequest {
    /// Validate the request, filling in configured defaults for the bin.
    ///
    /// `bin_capacity` is only checked if the bin gets provisioned; a
    /// non-positive value is carried as 0 and rejected there.
    pub fn into_command(self, config: &ApiConfig) -> DomainResult<AddStock> {
        let bin_id = match self.bin_id {
            Some(id) => BinId::new(id)?,
            None => config.default_bin_id.clone(),
        };
        let bin_capacity = match self.bin_capacity {
            Some(capacity) => u64::try_from(capacity).unwrap_or(0),
            None => config.default_bin_capacity,
        };

        Ok(AddStock {
            bin_id,
            bin_capacity,
            item_id: ItemId::new(self.item_id)?,
            quantity: positive("quantity", self.quantity)?,
            height: positive("height", self.height)?,
        })
    }
}

impl DispatchStockRequest {
    pub fn into_command(self) -> DomainResult<DispatchStock> {
        Ok(DispatchStock {
            item_id: ItemId::new(self.item_id)?,
            quantity: positive("quantity", self.quantity)?,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn lot_to_json(lot: &Lot) -> Value {
    serde_json::json!({
        "item_id": lot.item_id().as_str(),
        "qty": lot.quantity(),
        "height": lot.unit_height(),
        "day": lot.stored_at().to_rfc3339(),
    })
}

pub fn bin_to_json(bin: &BinSnapshot) -> Value {
    serde_json::json!({
        "bin_id": bin.id.as_str(),
        "occupied": bin.occupied,
        "max_capacity": bin.max_capacity,
        "items": bin.lots.iter().map(lot_to_json).collect::<Vec<_>>(),
    })
}

pub fn bins_to_json(bins: &[BinSnapshot]) -> Value {
    Value::Array(bins.iter().map(bin_to_json).collect())
}

pub fn stock_to_json(stock: &StockStatus) -> Value {
    let map: Map<String, Value> = stock
        .iter()
        .map(|(item_id, qty)| (item_id.to_string(), Value::from(qty)))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use warehouse_inventory::{Bin, Warehouse};

    fn add_request(quantity: i64, height: i64) -> AddStockRequest {
        AddStockRequest {
            bin_id: None,
            bin_capacity: None,
            item_id: "X".to_string(),
            quantity,
            height,
        }
    }

    #[test]
    fn add_request_falls_back_to_configured_bin() {
        let cmd = add_request(2, 3).into_command(&ApiConfig::default()).unwrap();
        assert_eq!(cmd.bin_id.as_str(), "B1");
        assert_eq!(cmd.bin_capacity, 100);
        assert_eq!(cmd.quantity, 2);
        assert_eq!(cmd.height, 3);
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        let config = ApiConfig::default();
        assert!(add_request(0, 1).into_command(&config).is_err());
        assert!(add_request(1, -4).into_command(&config).is_err());

        let dispatch = DispatchStockRequest {
            item_id: "X".to_string(),
            quantity: -1,
        };
        assert!(dispatch.into_command().is_err());
    }

    #[test]
    fn bin_capacity_is_left_for_provisioning_to_check() {
        let config = ApiConfig::default();
        for (raw, expected) in [(0, 0), (-7, 0), (40, 40)] {
            let mut req = add_request(1, 1);
            req.bin_capacity = Some(raw);
            assert_eq!(req.into_command(&config).unwrap().bin_capacity, expected);
        }
    }

    #[test]
    fn identifiers_with_padding_are_rejected() {
        let mut req = add_request(1, 1);
        req.bin_id = Some(" B1".to_string());
        assert_eq!(
            req.into_command(&ApiConfig::default()).unwrap_err(),
            DomainError::validation("bin_id must not have surrounding whitespace")
        );
    }

    #[test]
    fn stock_json_is_a_plain_item_to_quantity_map() {
        let mut w = Warehouse::new();
        w.register_bin(Bin::new(BinId::new("B1").unwrap(), 100).unwrap())
            .unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let b1 = BinId::new("B1").unwrap();
        w.add_item(&b1, ItemId::new("X").unwrap(), 2, 1, at).unwrap();
        w.add_item(&b1, ItemId::new("Y").unwrap(), 3, 1, at).unwrap();
        w.add_item(&b1, ItemId::new("X").unwrap(), 4, 1, at).unwrap();

        assert_eq!(
            stock_to_json(&w.stock_status()),
            serde_json::json!({ "X": 6, "Y": 3 })
        );
        assert_eq!(stock_to_json(&StockStatus::default()), serde_json::json!({}));
    }

    #[test]
    fn bin_json_uses_the_wire_field_names() {
        let mut bin = Bin::new(BinId::new("B1").unwrap(), 100).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        bin.add_item(ItemId::new("X").unwrap(), 5, 10, at).unwrap();

        let json = bin_to_json(&bin.snapshot());
        assert_eq!(
            json,
            serde_json::json!({
                "bin_id": "B1",
                "occupied": 50,
                "max_capacity": 100,
                "items": [
                    { "item_id": "X", "qty": 5, "height": 10, "day": "2024-01-02T03:04:05+00:00" }
                ],
            })
        );
    }
}
