//! Access to the external record stores.

pub mod sheets;
pub mod store;

pub use sheets::RowStoreClient;
pub use store::{CatalogStore, HistoryStore, InMemoryStore, StoreError};
