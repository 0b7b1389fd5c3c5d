//! Aggregation over the shipping history store.
//!
//! All functions here are pure folds over a snapshot of records; the
//! store is queried fresh on every call, so results reflect the store
//! at query time and nothing is cached in-process.

use std::collections::HashMap;

use super::entities::{AverageEntry, HistoryRecord, UpsFlag};

/// Quantity-weighted average offset cost for every distinct
/// (item, vendor) key, in first-seen record order.
///
/// Keys match exactly: an empty vendor is its own key. A group whose
/// quantities sum to zero averages to 0.0. The reported UPS flag is
/// simply the last record folded into the group.
pub fn averages_by_item_vendor(records: &[HistoryRecord]) -> Vec<AverageEntry> {
    struct Group {
        cost_sum: f64,
        quantity_sum: f64,
        ups: UpsFlag,
    }

    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Group> = HashMap::new();

    for record in records {
        let key = (record.item_name.clone(), record.vendor.clone());
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Group {
                cost_sum: 0.0,
                quantity_sum: 0.0,
                ups: record.is_ups,
            }
        });
        group.cost_sum += record.per_unit_cost_offset * record.quantity;
        group.quantity_sum += record.quantity;
        group.ups = record.is_ups;
    }

    order
        .into_iter()
        .map(|key| {
            let group = &groups[&key];
            let average = if group.quantity_sum > 0.0 {
                group.cost_sum / group.quantity_sum
            } else {
                0.0
            };
            AverageEntry {
                item_name: key.0,
                vendor: key.1,
                avg_per_unit_shipping_offset: average,
                ups: group.ups,
            }
        })
        .collect()
}

/// Most recent usable weight recorded for an item, optionally narrowed
/// to one vendor.
///
/// Matching is case-insensitive on trimmed names. Recency is decided
/// by comparing timestamp strings, which is sound because every
/// timestamp is written as `YYYY-MM-DD HH:MM:SS`. Records without a
/// usable non-negative weight are skipped.
pub fn last_weight_used(
    records: &[HistoryRecord],
    item_name: &str,
    vendor: Option<&str>,
) -> Option<f64> {
    let vendor = vendor.map(str::trim).filter(|v| !v.is_empty());

    let mut matches: Vec<&HistoryRecord> = records
        .iter()
        .filter(|record| eq_fold(&record.item_name, item_name))
        .filter(|record| vendor.map_or(true, |v| eq_fold(&record.vendor, v)))
        .collect();
    matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    matches
        .into_iter()
        .filter_map(|record| record.weight_used)
        .find(|weight| weight.is_finite() && *weight >= 0.0)
}

/// Distinct item names seen in history for one vendor, sorted.
/// Vendor comparison is exact on trimmed strings.
pub fn item_names_for_vendor(records: &[HistoryRecord], vendor: &str) -> Vec<String> {
    let vendor = vendor.trim();
    let mut names: Vec<String> = records
        .iter()
        .filter(|record| record.vendor.trim() == vendor)
        .map(|record| record.item_name.clone())
        .filter(|name| !name.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Deletion predicate: item matches case-insensitively; when a vendor
/// is given it must also match case-insensitively.
pub fn matches_item_vendor(record: &HistoryRecord, item_name: &str, vendor: Option<&str>) -> bool {
    eq_fold(&record.item_name, item_name)
        && vendor.map_or(true, |v| eq_fold(&record.vendor, v))
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
