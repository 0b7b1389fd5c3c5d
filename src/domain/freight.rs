//! Splitting a known freight invoice across items by weight share.
//!
//! Used for non-UPS shipments where the carrier already invoiced a
//! total: no zone lookup, no markup, just a proportional split.

use super::entities::{FreightItem, FreightLine};

/// Result of splitting one freight invoice.
#[derive(Clone, Debug, PartialEq)]
pub struct FreightSplit {
    pub total_freight: f64,
    /// Sum of effective weights; plain unit count when the batch fell
    /// back to quantity shares.
    pub total_effective_weight: f64,
    /// True when at least one item carried a known positive weight.
    pub split_by_weight: bool,
    pub lines: Vec<FreightLine>,
}

/// Split `total_freight` across `items`.
///
/// The weight-or-quantity decision is made once for the whole batch:
/// if any item has a known positive weight, weightless items take a
/// stand-in weight of 1 lb per unit; if none does, shares are pure
/// quantity shares. The stand-in never leaks into the output lines.
pub fn split_freight(items: &[FreightItem], total_freight: f64) -> FreightSplit {
    let split_by_weight = items.iter().any(|item| has_weight(item));

    let effective = |item: &FreightItem| -> f64 {
        let quantity = f64::from(item.quantity);
        if split_by_weight {
            let weight = item
                .weight_per_unit
                .filter(|w| w.is_finite() && *w > 0.0)
                .unwrap_or(1.0);
            weight * quantity
        } else {
            quantity
        }
    };

    let total_effective_weight: f64 = items.iter().map(effective).sum();

    let lines = items
        .iter()
        .map(|item| {
            let share = if total_effective_weight > 0.0 {
                effective(item) / total_effective_weight
            } else {
                0.0
            };
            let item_freight = share * total_freight;
            let per_unit_freight = if item.quantity > 0 {
                item_freight / f64::from(item.quantity)
            } else {
                0.0
            };
            FreightLine {
                name: item.name.clone(),
                quantity: item.quantity,
                weight_per_unit: item.weight_per_unit,
                share,
                item_freight,
                per_unit_freight,
            }
        })
        .collect();

    FreightSplit {
        total_freight,
        total_effective_weight,
        split_by_weight,
        lines,
    }
}

fn has_weight(item: &FreightItem) -> bool {
    item.weight_per_unit
        .map(|w| w.is_finite() && w > 0.0)
        .unwrap_or(false)
}
