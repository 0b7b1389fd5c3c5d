//! Zone-table shipping cost allocation.
//!
//! Resolves a zone from the vendor/receiving ZIP pair, prices the total
//! shipment weight, marks the cost up by a fixed offset, and splits it
//! across line items by weight share.

use super::entities::{ItemAllocation, LineItem, Zone};

/// Fixed markup applied to the zone-table base cost.
pub const OFFSET_PERCENT: f64 = 0.14;

/// Retail margin divisors, keyed by the label shown to buyers. The
/// 55% and 60% labels intentionally divide by 0.45 and 0.40; this
/// mapping is load-bearing and must not be "corrected".
pub const MARGIN_DIVISOR_50: f64 = 0.50;
pub const MARGIN_DIVISOR_55: f64 = 0.45;
pub const MARGIN_DIVISOR_60: f64 = 0.40;

/// External zone/rate lookup.
///
/// The rate table's `zone_for` treats the *vendor* ZIP as its
/// destination argument and the receiving ZIP as its origin; the
/// table was built from the carrier's side of the shipment. Callers
/// pass `(vendor_zip, receiving_zip)` and implementations must keep
/// that orientation.
pub trait RateTable {
    fn zone_for(&self, vendor_zip: &str, receiving_zip: &str) -> Option<Zone>;

    /// Base shipping cost for a zone and total shipment weight.
    /// Absent table entries are a miss, not an error.
    fn cost_for(&self, zone: &Zone, total_weight: f64) -> Option<f64>;
}

/// Result of allocating one batch of line items.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationSummary {
    pub total_weight: f64,
    /// `None` when the ZIP pair resolved to no zone; the batch then
    /// prices at 0.0 rather than failing.
    pub zone: Option<Zone>,
    /// Base cost with the offset markup applied.
    pub offset_shipping_cost: f64,
    pub items: Vec<ItemAllocation>,
}

/// Left-pad a 4-digit ZIP to 5 digits. Leading zeros get lost upstream
/// when ZIPs travel through numeric cells.
pub fn pad_zip(zip: &str) -> String {
    let trimmed = zip.trim();
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    }
}

/// Allocate shipping cost for a batch of line items.
///
/// Every item's share is its fraction of the batch's total weight. A
/// batch with zero total weight allocates 0.0 to every item; there is
/// no fallback to an even split.
pub fn allocate(
    rates: &impl RateTable,
    vendor_zip: &str,
    receiving_zip: &str,
    items: &[LineItem],
    offset_percent: f64,
) -> AllocationSummary {
    let vendor_zip = pad_zip(vendor_zip);

    let total_weight: f64 = items
        .iter()
        .map(|item| item.weight_per_unit * f64::from(item.quantity))
        .sum();

    let zone = rates.zone_for(&vendor_zip, receiving_zip);
    let base_cost = zone
        .as_ref()
        .and_then(|zone| rates.cost_for(zone, total_weight))
        .unwrap_or(0.0);
    let offset_shipping_cost = base_cost * (1.0 + offset_percent);

    let items = items
        .iter()
        .map(|item| allocate_item(item, total_weight, offset_shipping_cost))
        .collect();

    AllocationSummary {
        total_weight,
        zone,
        offset_shipping_cost,
        items,
    }
}

fn allocate_item(item: &LineItem, total_weight: f64, offset_total: f64) -> ItemAllocation {
    let quantity = f64::from(item.quantity);
    let weight_share = if total_weight > 0.0 {
        item.weight_per_unit * quantity / total_weight
    } else {
        0.0
    };
    let offset_item_cost = weight_share * offset_total;
    let offset_shipping_per_unit = if item.quantity > 0 {
        offset_item_cost / quantity
    } else {
        0.0
    };

    ItemAllocation {
        name: item.name.clone(),
        quantity: item.quantity,
        weight_per_unit: item.weight_per_unit,
        unit_cost: item.unit_cost,
        offset_shipping_per_unit,
        retail_50: retail_price(item, offset_shipping_per_unit, MARGIN_DIVISOR_50),
        retail_55: retail_price(item, offset_shipping_per_unit, MARGIN_DIVISOR_55),
        retail_60: retail_price(item, offset_shipping_per_unit, MARGIN_DIVISOR_60),
        vendor: item.vendor.clone(),
    }
}

fn retail_price(item: &LineItem, offset_per_unit: f64, divisor: f64) -> f64 {
    if item.quantity > 0 {
        (item.unit_cost + offset_per_unit) / divisor
    } else {
        0.0
    }
}
