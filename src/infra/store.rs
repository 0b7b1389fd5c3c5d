//! Record-store traits and the in-memory implementation.
//!
//! The persistent stores are external, possibly remote, row
//! collections with no schema enforcement and no transactions beyond
//! per-call append atomicity. Implementations must tolerate being one
//! of many concurrent writers; last write wins.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::entities::{CatalogItem, HistoryRecord, Vendor};
use crate::domain::history::matches_item_vendor;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store api error: {0}")]
    Api(String),
}

/// Append-only shipping history.
pub trait HistoryStore {
    /// Append one record. One call, one row; no batching.
    fn append(
        &self,
        record: HistoryRecord,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Snapshot of every stored record. Malformed rows are skipped,
    /// not surfaced as errors.
    fn query_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryRecord>, StoreError>> + Send;

    /// Delete every record matching the item (case-insensitively) and,
    /// when given, the vendor. Returns the number removed.
    fn delete_history(
        &self,
        item_name: &str,
        vendor: Option<&str>,
    ) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;
}

/// Item weight catalog and vendor directory.
pub trait CatalogStore {
    fn list_items(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CatalogItem>, StoreError>> + Send;

    fn add_item(
        &self,
        item: CatalogItem,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove the first item matching the name case-insensitively.
    /// False when nothing matched.
    fn remove_item(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<bool, StoreError>> + Send;

    fn list_vendors(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Vendor>, StoreError>> + Send;

    fn add_vendor(
        &self,
        vendor: Vendor,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Default)]
struct StoreState {
    history: Vec<HistoryRecord>,
    items: Vec<CatalogItem>,
    vendors: Vec<Vendor>,
}

/// In-process store, mainly for tests and offline use. Shares state
/// across clones the way the remote stores share a spreadsheet.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed history records, preserving order.
    pub async fn seed_history(&self, records: impl IntoIterator<Item = HistoryRecord>) {
        self.state.lock().await.history.extend(records);
    }

    /// Seed catalog items.
    pub async fn seed_items(&self, items: impl IntoIterator<Item = CatalogItem>) {
        self.state.lock().await.items.extend(items);
    }
}

impl HistoryStore for InMemoryStore {
    async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        self.state.lock().await.history.push(record);
        Ok(())
    }

    async fn query_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(self.state.lock().await.history.clone())
    }

    async fn delete_history(
        &self,
        item_name: &str,
        vendor: Option<&str>,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.lock().await;
        let before = state.history.len();
        state
            .history
            .retain(|record| !matches_item_vendor(record, item_name, vendor));
        Ok(before - state.history.len())
    }
}

impl CatalogStore for InMemoryStore {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, StoreError> {
        Ok(self.state.lock().await.items.clone())
    }

    async fn add_item(&self, item: CatalogItem) -> Result<(), StoreError> {
        self.state.lock().await.items.push(item);
        Ok(())
    }

    // First match only, mirroring the row store's positional delete.
    async fn remove_item(&self, name: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let needle = name.trim();
        let position = state
            .items
            .iter()
            .position(|item| item.name.trim().eq_ignore_ascii_case(needle));
        match position {
            Some(position) => {
                state.items.remove(position);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>, StoreError> {
        Ok(self.state.lock().await.vendors.clone())
    }

    async fn add_vendor(&self, vendor: Vendor) -> Result<(), StoreError> {
        self.state.lock().await.vendors.push(vendor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UpsFlag;
    use pretty_assertions::assert_eq;

    fn record(item: &str, vendor: &str) -> HistoryRecord {
        HistoryRecord {
            item_name: item.to_string(),
            per_unit_cost: 1.0,
            per_unit_cost_offset: 1.0,
            timestamp: "2025-03-01 10:00:00".to_string(),
            quantity: 1.0,
            vendor: vendor.to_string(),
            is_ups: UpsFlag::Yes,
            weight_used: None,
            po_number: None,
        }
    }

    #[tokio::test]
    async fn delete_scopes_to_vendor_when_given() {
        let store = InMemoryStore::new();
        store
            .seed_history([
                record("Banner", "Acme"),
                record("Banner", "Other"),
                record("Flag", "Acme"),
            ])
            .await;

        let removed = store.delete_history("BANNER", Some("acme")).await.unwrap();
        assert_eq!(removed, 1);

        let left = store.query_all().await.unwrap();
        assert_eq!(left.len(), 2);
        assert!(left.iter().any(|r| r.item_name == "Banner" && r.vendor == "Other"));
    }

    #[tokio::test]
    async fn delete_without_vendor_spans_all_vendors() {
        let store = InMemoryStore::new();
        store
            .seed_history([
                record("Banner", "Acme"),
                record("Banner", "Other"),
                record("Flag", "Acme"),
            ])
            .await;

        let removed = store.delete_history("Banner", None).await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.query_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn item_removal_is_case_insensitive() {
        let store = InMemoryStore::new();
        store
            .seed_items([CatalogItem {
                name: "Banner".to_string(),
                weight: 2.0,
            }])
            .await;

        assert!(store.remove_item(" banner ").await.unwrap());
        assert!(!store.remove_item("banner").await.unwrap());
    }

    #[tokio::test]
    async fn item_removal_takes_only_the_first_match() {
        let store = InMemoryStore::new();
        store
            .seed_items([
                CatalogItem {
                    name: "Banner".to_string(),
                    weight: 2.0,
                },
                CatalogItem {
                    name: "BANNER".to_string(),
                    weight: 3.0,
                },
            ])
            .await;

        assert!(store.remove_item("banner").await.unwrap());

        let left = store.list_items().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "BANNER");

        assert!(store.remove_item("banner").await.unwrap());
        assert!(!store.remove_item("banner").await.unwrap());
    }
}
