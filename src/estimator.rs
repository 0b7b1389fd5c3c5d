//! Orchestrates calculations against the rate table and the record
//! stores.
//!
//! Requests arrive with loosely typed fields, the way spreadsheet and
//! form frontends produce them. Validation runs to completion before
//! any write; once persistence starts, each record is saved on its own
//! and failures are collected per item rather than rolling anything
//! back.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::allocation::{allocate, AllocationSummary, RateTable, OFFSET_PERCENT};
use crate::domain::entities::{
    AverageEntry, CatalogItem, FreightItem, HistoryRecord, LineItem, UpsFlag, Vendor,
};
use crate::domain::freight::{self, FreightSplit};
use crate::domain::history::{averages_by_item_vendor, item_names_for_vendor, last_weight_used};
use crate::infra::store::{CatalogStore, HistoryStore, StoreError};
use crate::util::numeric::{coerce_f64, coerce_opt_f64, coerce_quantity, InputError};
use crate::util::timestamp_now;

#[derive(Debug, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One loosely typed order line, as submitted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LineItemDraft {
    pub name: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub weight_per_unit: Value,
    #[serde(default)]
    pub unit_cost: Value,
    #[serde(default)]
    pub vendor: Option<String>,
}

impl LineItemDraft {
    fn resolve(&self, fallback_vendor: &str) -> Result<LineItem, InputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(InputError::invalid("line item name must not be empty"));
        }
        let vendor = self
            .vendor
            .as_deref()
            .map(str::trim)
            .filter(|vendor| !vendor.is_empty())
            .unwrap_or(fallback_vendor);
        Ok(LineItem {
            name: name.to_string(),
            quantity: coerce_quantity("quantity", &self.quantity)?,
            weight_per_unit: coerce_f64("weight_per_unit", &self.weight_per_unit)?,
            unit_cost: coerce_f64("unit_cost", &self.unit_cost)?,
            vendor: vendor.to_string(),
        })
    }
}

/// A zone-table calculation request for one shipment.
#[derive(Clone, Debug, Deserialize)]
pub struct CalculateRequest {
    pub vendor_zip: String,
    pub receiving_zip: String,
    /// Vendor applied to items that don't carry their own.
    #[serde(default)]
    pub vendor_label: Option<String>,
    #[serde(default)]
    pub po_number: Option<String>,
    pub items: Vec<LineItemDraft>,
}

/// One loosely typed item in a freight-split request.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FreightItemDraft {
    pub name: String,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub weight_per_unit: Value,
}

/// A request to split an already-invoiced freight total.
#[derive(Clone, Debug, Deserialize)]
pub struct FreightRequest {
    pub vendor: String,
    pub total_freight: Value,
    #[serde(default)]
    pub po_number: Option<String>,
    pub items: Vec<FreightItemDraft>,
}

/// One record that could not be saved. The computation it belongs to
/// already succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistFailure {
    pub item_name: String,
    pub error: String,
}

/// Outcome of the sequential persistence pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistReport {
    pub attempted: usize,
    pub failures: Vec<PersistFailure>,
}

impl PersistReport {
    pub fn all_saved(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CalculateOutcome {
    pub summary: AllocationSummary,
    pub persist: PersistReport,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FreightOutcome {
    pub split: FreightSplit,
    pub persist: PersistReport,
}

/// The estimator service: a record store plus a rate table.
pub struct Estimator<S, R> {
    store: S,
    rates: R,
    offset_percent: f64,
}

impl<S, R> Estimator<S, R>
where
    S: HistoryStore + CatalogStore,
    R: RateTable,
{
    pub fn new(store: S, rates: R) -> Self {
        Self {
            store,
            rates,
            offset_percent: OFFSET_PERCENT,
        }
    }

    pub fn with_offset_percent(mut self, offset_percent: f64) -> Self {
        self.offset_percent = offset_percent;
        self
    }

    /// Run a zone-table allocation and record one history row per line
    /// item. Validation failures abort before any row is written.
    pub async fn calculate(
        &self,
        request: CalculateRequest,
    ) -> Result<CalculateOutcome, EstimateError> {
        let fallback_vendor = request
            .vendor_label
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        let mut items = Vec::with_capacity(request.items.len());
        for draft in &request.items {
            items.push(draft.resolve(fallback_vendor)?);
        }

        let summary = allocate(
            &self.rates,
            &request.vendor_zip,
            &request.receiving_zip,
            &items,
            self.offset_percent,
        );

        let timestamp = timestamp_now();
        let po_number = clean_po(request.po_number.as_deref());
        let mut persist = PersistReport {
            attempted: summary.items.len(),
            failures: Vec::new(),
        };

        for allocation in &summary.items {
            let record = HistoryRecord {
                item_name: allocation.name.clone(),
                per_unit_cost: allocation.offset_shipping_per_unit,
                per_unit_cost_offset: allocation.offset_shipping_per_unit,
                timestamp: timestamp.clone(),
                quantity: f64::from(allocation.quantity),
                vendor: allocation.vendor.clone(),
                is_ups: UpsFlag::Yes,
                weight_used: Some(allocation.weight_per_unit),
                po_number: po_number.clone(),
            };
            if let Err(error) = self.store.append(record).await {
                warn!(item = %allocation.name, %error, "failed to save history record");
                persist.failures.push(PersistFailure {
                    item_name: allocation.name.clone(),
                    error: error.to_string(),
                });
            }
        }

        info!(
            items = summary.items.len(),
            failures = persist.failures.len(),
            zone = summary.zone.as_ref().map(|z| z.as_str()).unwrap_or("-"),
            "zone allocation calculated"
        );
        Ok(CalculateOutcome { summary, persist })
    }

    /// Split an invoiced freight total across items and record one
    /// history row per line.
    pub async fn split_freight(
        &self,
        request: FreightRequest,
    ) -> Result<FreightOutcome, EstimateError> {
        let vendor = request.vendor.trim();
        if vendor.is_empty() {
            return Err(InputError::invalid("vendor must not be empty").into());
        }
        let total_freight = coerce_f64("total_freight", &request.total_freight)?;
        if !(total_freight > 0.0) {
            return Err(InputError::invalid("total freight must be positive").into());
        }

        let mut items = Vec::with_capacity(request.items.len());
        for draft in &request.items {
            let name = draft.name.trim();
            if name.is_empty() {
                return Err(InputError::invalid("freight item name must not be empty").into());
            }
            let quantity = coerce_quantity("quantity", &draft.quantity)?;
            if quantity == 0 {
                return Err(InputError::invalid(format!(
                    "item '{name}' must have a positive quantity"
                ))
                .into());
            }
            items.push(FreightItem {
                name: name.to_string(),
                quantity,
                weight_per_unit: coerce_opt_f64("weight_per_unit", &draft.weight_per_unit)?,
            });
        }

        let split = freight::split_freight(&items, total_freight);

        let timestamp = timestamp_now();
        let vendor = vendor.to_string();
        let po_number = clean_po(request.po_number.as_deref());
        let mut persist = PersistReport {
            attempted: split.lines.len(),
            failures: Vec::new(),
        };

        for line in &split.lines {
            let record = HistoryRecord {
                item_name: line.name.clone(),
                per_unit_cost: line.per_unit_freight,
                per_unit_cost_offset: line.per_unit_freight,
                timestamp: timestamp.clone(),
                quantity: f64::from(line.quantity),
                vendor: vendor.clone(),
                is_ups: UpsFlag::No,
                // The weight as submitted, not the stand-in the split
                // may have computed with.
                weight_used: line.weight_per_unit,
                po_number: po_number.clone(),
            };
            if let Err(error) = self.store.append(record).await {
                warn!(item = %line.name, %error, "failed to save history record");
                persist.failures.push(PersistFailure {
                    item_name: line.name.clone(),
                    error: error.to_string(),
                });
            }
        }

        info!(
            items = split.lines.len(),
            failures = persist.failures.len(),
            by_weight = split.split_by_weight,
            "freight split calculated"
        );
        Ok(FreightOutcome { split, persist })
    }

    /// Quantity-weighted average shipping offset per (item, vendor).
    pub async fn shipping_averages(&self) -> Result<Vec<AverageEntry>, EstimateError> {
        let records = self.store.query_all().await?;
        Ok(averages_by_item_vendor(&records))
    }

    /// Most recent usable weight recorded for an item.
    pub async fn last_weight_used(
        &self,
        item_name: &str,
        vendor: Option<&str>,
    ) -> Result<Option<f64>, EstimateError> {
        let records = self.store.query_all().await?;
        Ok(last_weight_used(&records, item_name, vendor))
    }

    /// Delete an item's history, optionally scoped to one vendor.
    pub async fn delete_history(
        &self,
        item_name: &str,
        vendor: Option<&str>,
    ) -> Result<usize, EstimateError> {
        let name = item_name.trim();
        if name.is_empty() {
            return Err(InputError::invalid("item name must not be empty").into());
        }
        let removed = self.store.delete_history(name, vendor).await?;
        info!(item = name, removed, "deleted history records");
        Ok(removed)
    }

    /// Distinct item names seen in history for one vendor.
    pub async fn item_names_by_vendor(&self, vendor: &str) -> Result<Vec<String>, EstimateError> {
        let records = self.store.query_all().await?;
        Ok(item_names_for_vendor(&records, vendor))
    }

    pub async fn items_with_weights(&self) -> Result<Vec<CatalogItem>, EstimateError> {
        Ok(self.store.list_items().await?)
    }

    /// Catalog item names, sorted.
    pub async fn item_names(&self) -> Result<Vec<String>, EstimateError> {
        let mut names: Vec<String> = self
            .store
            .list_items()
            .await?
            .into_iter()
            .map(|item| item.name)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Catalog weight for an item, matched case-insensitively.
    pub async fn item_weight(&self, name: &str) -> Result<Option<f64>, EstimateError> {
        let needle = name.trim();
        Ok(self
            .store
            .list_items()
            .await?
            .into_iter()
            .find(|item| item.name.trim().eq_ignore_ascii_case(needle))
            .map(|item| item.weight))
    }

    /// Add a catalog item. Duplicate names are rejected
    /// case-insensitively.
    pub async fn add_item(&self, name: &str, weight: &Value) -> Result<(), EstimateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::invalid("item name must not be empty").into());
        }
        let weight = coerce_f64("weight", weight)?;
        if self.item_weight(name).await?.is_some() {
            return Err(InputError::invalid(format!("item '{name}' already exists")).into());
        }
        self.store
            .add_item(CatalogItem {
                name: name.to_string(),
                weight,
            })
            .await?;
        Ok(())
    }

    pub async fn remove_item(&self, name: &str) -> Result<bool, EstimateError> {
        Ok(self.store.remove_item(name).await?)
    }

    pub async fn vendors(&self) -> Result<Vec<Vendor>, EstimateError> {
        Ok(self.store.list_vendors().await?)
    }

    /// Add a vendor with its origin ZIP. The ZIP must be exactly five
    /// digits; four-digit ZIPs that lost a leading zero are repaired at
    /// calculation time, not here.
    pub async fn add_vendor(&self, name: &str, zip: &str) -> Result<(), EstimateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::invalid("vendor name must not be empty").into());
        }
        let zip = zip.trim();
        if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InputError::invalid(format!("invalid ZIP code: {zip:?}")).into());
        }
        self.store
            .add_vendor(Vendor {
                name: name.to_string(),
                zip: zip.to_string(),
            })
            .await?;
        Ok(())
    }
}

fn clean_po(po_number: Option<&str>) -> Option<String> {
    po_number
        .map(str::trim)
        .filter(|po| !po.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Zone;
    use crate::infra::store::InMemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct FixedRates {
        cost: f64,
    }

    impl RateTable for FixedRates {
        fn zone_for(&self, _vendor_zip: &str, _receiving_zip: &str) -> Option<Zone> {
            Some(Zone::new("4"))
        }

        fn cost_for(&self, _zone: &Zone, _total_weight: f64) -> Option<f64> {
            Some(self.cost)
        }
    }

    /// Store wrapper that refuses to append records for certain items.
    #[derive(Clone)]
    struct FlakyStore {
        inner: InMemoryStore,
        reject: Vec<String>,
    }

    impl HistoryStore for FlakyStore {
        async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
            if self.reject.iter().any(|name| name == &record.item_name) {
                return Err(StoreError::Api("append refused".to_string()));
            }
            self.inner.append(record).await
        }

        async fn query_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
            self.inner.query_all().await
        }

        async fn delete_history(
            &self,
            item_name: &str,
            vendor: Option<&str>,
        ) -> Result<usize, StoreError> {
            self.inner.delete_history(item_name, vendor).await
        }
    }

    impl CatalogStore for FlakyStore {
        async fn list_items(&self) -> Result<Vec<CatalogItem>, StoreError> {
            self.inner.list_items().await
        }

        async fn add_item(&self, item: CatalogItem) -> Result<(), StoreError> {
            self.inner.add_item(item).await
        }

        async fn remove_item(&self, name: &str) -> Result<bool, StoreError> {
            self.inner.remove_item(name).await
        }

        async fn list_vendors(&self) -> Result<Vec<Vendor>, StoreError> {
            self.inner.list_vendors().await
        }

        async fn add_vendor(&self, vendor: Vendor) -> Result<(), StoreError> {
            self.inner.add_vendor(vendor).await
        }
    }

    fn estimator(store: InMemoryStore) -> Estimator<InMemoryStore, FixedRates> {
        Estimator::new(store, FixedRates { cost: 100.0 })
    }

    fn draft(name: &str, quantity: u32, weight: f64, cost: f64) -> LineItemDraft {
        LineItemDraft {
            name: name.to_string(),
            quantity: json!(quantity),
            weight_per_unit: json!(weight),
            unit_cost: json!(cost),
            vendor: None,
        }
    }

    #[tokio::test]
    async fn calculate_records_one_ups_row_per_item() {
        let store = InMemoryStore::new();
        let service = estimator(store.clone());

        let outcome = service
            .calculate(CalculateRequest {
                vendor_zip: "61801".to_string(),
                receiving_zip: "47401".to_string(),
                vendor_label: Some(" Acme ".to_string()),
                po_number: Some(" PO-9 ".to_string()),
                items: vec![draft("Banner", 3, 2.0, 10.0), draft("Flag", 5, 0.5, 4.0)],
            })
            .await
            .unwrap();

        assert!(outcome.persist.all_saved());
        assert_eq!(outcome.persist.attempted, 2);

        let records = store.query_all().await.unwrap();
        assert_eq!(records.len(), 2);
        let banner = &records[0];
        assert_eq!(banner.item_name, "Banner");
        assert_eq!(banner.is_ups, UpsFlag::Yes);
        assert_eq!(banner.per_unit_cost, banner.per_unit_cost_offset);
        assert_eq!(banner.vendor, "Acme");
        assert_eq!(banner.weight_used, Some(2.0));
        assert_eq!(banner.po_number.as_deref(), Some("PO-9"));
        assert_eq!(banner.timestamp.len(), "2025-03-01 10:00:00".len());
    }

    #[tokio::test]
    async fn malformed_input_aborts_before_any_write() {
        let store = InMemoryStore::new();
        let service = estimator(store.clone());

        let mut bad = draft("Flag", 1, 1.0, 2.0);
        bad.quantity = json!("a few");

        let result = service
            .calculate(CalculateRequest {
                vendor_zip: "61801".to_string(),
                receiving_zip: "47401".to_string(),
                vendor_label: None,
                po_number: None,
                items: vec![draft("Banner", 3, 2.0, 10.0), bad],
            })
            .await;

        assert!(matches!(result, Err(EstimateError::Input(_))));
        assert_eq!(store.query_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn persistence_failures_leave_sibling_records_saved() {
        let inner = InMemoryStore::new();
        let store = FlakyStore {
            inner: inner.clone(),
            reject: vec!["Banner".to_string()],
        };
        let service = Estimator::new(store, FixedRates { cost: 100.0 });

        let outcome = service
            .calculate(CalculateRequest {
                vendor_zip: "61801".to_string(),
                receiving_zip: "47401".to_string(),
                vendor_label: Some("Acme".to_string()),
                po_number: None,
                items: vec![draft("Banner", 3, 2.0, 10.0), draft("Flag", 5, 0.5, 4.0)],
            })
            .await
            .unwrap();

        assert_eq!(outcome.persist.attempted, 2);
        assert_eq!(outcome.persist.failures.len(), 1);
        assert_eq!(outcome.persist.failures[0].item_name, "Banner");

        let records = inner.query_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_name, "Flag");
    }

    #[tokio::test]
    async fn freight_split_records_non_ups_rows_with_original_weights() {
        let store = InMemoryStore::new();
        let service = estimator(store.clone());

        let outcome = service
            .split_freight(FreightRequest {
                vendor: "Acme".to_string(),
                total_freight: json!("100"),
                po_number: None,
                items: vec![
                    FreightItemDraft {
                        name: "Tent".to_string(),
                        quantity: json!(3),
                        weight_per_unit: json!(2.0),
                    },
                    FreightItemDraft {
                        name: "Pennant".to_string(),
                        quantity: json!(1),
                        weight_per_unit: json!(""),
                    },
                ],
            })
            .await
            .unwrap();

        assert!(outcome.split.split_by_weight);
        assert!(outcome.persist.all_saved());

        let records = store.query_all().await.unwrap();
        assert_eq!(records.len(), 2);
        let pennant = &records[1];
        assert_eq!(pennant.is_ups, UpsFlag::No);
        assert_eq!(pennant.weight_used, None);
        assert_eq!(pennant.per_unit_cost, pennant.per_unit_cost_offset);
        assert!((pennant.per_unit_cost - 100.0 / 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn freight_rejects_nonpositive_totals_and_quantities() {
        let service = estimator(InMemoryStore::new());

        let zero_total = service
            .split_freight(FreightRequest {
                vendor: "Acme".to_string(),
                total_freight: json!(0),
                po_number: None,
                items: vec![FreightItemDraft {
                    name: "Tent".to_string(),
                    quantity: json!(1),
                    weight_per_unit: Value::Null,
                }],
            })
            .await;
        assert!(matches!(zero_total, Err(EstimateError::Input(_))));

        let zero_quantity = service
            .split_freight(FreightRequest {
                vendor: "Acme".to_string(),
                total_freight: json!(50),
                po_number: None,
                items: vec![FreightItemDraft {
                    name: "Tent".to_string(),
                    quantity: json!(0),
                    weight_per_unit: Value::Null,
                }],
            })
            .await;
        assert!(matches!(zero_quantity, Err(EstimateError::Input(_))));
    }

    #[tokio::test]
    async fn freight_persistence_failures_leave_sibling_records_saved() {
        let inner = InMemoryStore::new();
        let store = FlakyStore {
            inner: inner.clone(),
            reject: vec!["Tent".to_string()],
        };
        let service = Estimator::new(store, FixedRates { cost: 100.0 });

        let outcome = service
            .split_freight(FreightRequest {
                vendor: "Acme".to_string(),
                total_freight: json!(100),
                po_number: None,
                items: vec![
                    FreightItemDraft {
                        name: "Tent".to_string(),
                        quantity: json!(3),
                        weight_per_unit: json!(2.0),
                    },
                    FreightItemDraft {
                        name: "Pennant".to_string(),
                        quantity: json!(1),
                        weight_per_unit: Value::Null,
                    },
                ],
            })
            .await
            .unwrap();

        assert_eq!(outcome.persist.attempted, 2);
        assert_eq!(outcome.persist.failures.len(), 1);
        assert_eq!(outcome.persist.failures[0].item_name, "Tent");

        let records = inner.query_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_name, "Pennant");
        assert_eq!(records[0].is_ups, UpsFlag::No);
    }

    #[tokio::test]
    async fn freight_rejects_a_blank_vendor() {
        let store = InMemoryStore::new();
        let service = estimator(store.clone());

        let result = service
            .split_freight(FreightRequest {
                vendor: "   ".to_string(),
                total_freight: json!(50),
                po_number: None,
                items: vec![FreightItemDraft {
                    name: "Tent".to_string(),
                    quantity: json!(1),
                    weight_per_unit: Value::Null,
                }],
            })
            .await;

        assert!(matches!(result, Err(EstimateError::Input(_))));
        assert_eq!(store.query_all().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn history_queries_flow_through_the_store() {
        let store = InMemoryStore::new();
        let service = estimator(store.clone());

        service
            .calculate(CalculateRequest {
                vendor_zip: "61801".to_string(),
                receiving_zip: "47401".to_string(),
                vendor_label: Some("Acme".to_string()),
                po_number: None,
                items: vec![draft("Banner", 2, 3.0, 10.0)],
            })
            .await
            .unwrap();

        let averages = service.shipping_averages().await.unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].item_name, "Banner");
        assert_eq!(averages[0].ups, UpsFlag::Yes);

        let weight = service.last_weight_used("banner", Some("ACME")).await.unwrap();
        assert_eq!(weight, Some(3.0));

        let names = service.item_names_by_vendor("Acme").await.unwrap();
        assert_eq!(names, vec!["Banner".to_string()]);

        let removed = service.delete_history("BANNER", Some("acme")).await.unwrap();
        assert_eq!(removed, 1);
        assert!(service.shipping_averages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_with_a_blank_name_is_rejected() {
        let service = estimator(InMemoryStore::new());
        let result = service.delete_history("   ", None).await;
        assert!(matches!(result, Err(EstimateError::Input(_))));
    }

    #[tokio::test]
    async fn catalog_rejects_duplicates_case_insensitively() {
        let service = estimator(InMemoryStore::new());

        service.add_item("Banner", &json!(2.5)).await.unwrap();
        let duplicate = service.add_item(" BANNER ", &json!(3.0)).await;
        assert!(matches!(duplicate, Err(EstimateError::Input(_))));

        assert_eq!(service.item_weight("banner").await.unwrap(), Some(2.5));
        assert_eq!(service.item_names().await.unwrap(), vec!["Banner".to_string()]);

        assert!(service.remove_item("banner").await.unwrap());
        assert_eq!(service.item_weight("Banner").await.unwrap(), None);
    }

    #[tokio::test]
    async fn catalog_rejects_junk_weights() {
        let service = estimator(InMemoryStore::new());
        let result = service.add_item("Banner", &json!("heavy")).await;
        assert!(matches!(result, Err(EstimateError::Input(_))));
    }

    #[tokio::test]
    async fn vendor_zips_must_be_five_digits() {
        let service = estimator(InMemoryStore::new());

        service.add_vendor("Acme", " 61801 ").await.unwrap();
        assert_eq!(service.vendors().await.unwrap().len(), 1);

        assert!(matches!(
            service.add_vendor("Short", "2138").await,
            Err(EstimateError::Input(_))
        ));
        assert!(matches!(
            service.add_vendor("Letters", "6180a").await,
            Err(EstimateError::Input(_))
        ));
    }
}
