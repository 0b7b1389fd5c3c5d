use std::fmt;

use serde::{Deserialize, Serialize};

/// Shipping-distance tier identifier resolved by the external rate
/// table. Opaque: nothing beyond equality and display is assumed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone(String);

impl Zone {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One order line inside a single calculation request. Lives only for
/// the duration of that request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    /// Pounds per unit.
    pub weight_per_unit: f64,
    /// Vendor's unit cost in dollars.
    pub unit_cost: f64,
    pub vendor: String,
}

/// Per-item output of a UPS allocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemAllocation {
    pub name: String,
    pub quantity: u32,
    pub weight_per_unit: f64,
    pub unit_cost: f64,
    /// This item's slice of the marked-up shipping cost, per unit.
    pub offset_shipping_per_unit: f64,
    pub retail_50: f64,
    pub retail_55: f64,
    pub retail_60: f64,
    pub vendor: String,
}

/// One item in a freight-split request. Weight is optional; the split
/// falls back to quantity share when no item in the batch has one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FreightItem {
    pub name: String,
    pub quantity: u32,
    pub weight_per_unit: Option<f64>,
}

/// Per-item output of a freight split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FreightLine {
    pub name: String,
    pub quantity: u32,
    /// The item's original weight, even when the split substituted a
    /// default for the computation.
    pub weight_per_unit: Option<f64>,
    /// Fraction of the invoiced total carried by this item.
    pub share: f64,
    pub item_freight: f64,
    pub per_unit_freight: f64,
}

/// Whether a history row came from the UPS zone-table path or a
/// manually invoiced freight split. Stored as "Yes"/"No".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsFlag {
    Yes,
    #[default]
    No,
}

impl UpsFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsFlag::Yes => "Yes",
            UpsFlag::No => "No",
        }
    }

    /// Case-insensitive parse; unrecognized values are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("yes") {
            Some(UpsFlag::Yes)
        } else if trimmed.eq_ignore_ascii_case("no") {
            Some(UpsFlag::No)
        } else {
            None
        }
    }
}

impl fmt::Display for UpsFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only per-unit shipping cost fact, one per line item per
/// calculation. Never updated in place; deletable by (item, vendor).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub item_name: String,
    pub per_unit_cost: f64,
    pub per_unit_cost_offset: f64,
    /// `YYYY-MM-DD HH:MM:SS`; recency is decided by string comparison.
    pub timestamp: String,
    /// Averaging weight. Floating so partially parsed rows still count.
    pub quantity: f64,
    pub vendor: String,
    pub is_ups: UpsFlag,
    pub weight_used: Option<f64>,
    #[serde(default)]
    pub po_number: Option<String>,
}

/// Quantity-weighted average of per-unit offset shipping cost for one
/// (item, vendor) key. Derived on every query, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AverageEntry {
    pub item_name: String,
    pub vendor: String,
    pub avg_per_unit_shipping_offset: f64,
    /// Flag of the last record folded into the group. Mixed groups are
    /// possible; do not treat this as authoritative for every row.
    pub ups: UpsFlag,
}

/// An item in the weight catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    /// Pounds per unit.
    pub weight: f64,
}

/// A vendor origin with its shipping ZIP.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: String,
    pub zip: String,
}
