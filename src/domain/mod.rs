//! Domain logic for shipping cost estimation lives here.

pub mod allocation;
pub mod entities;
pub mod freight;
pub mod history;

pub use allocation::{allocate, pad_zip, AllocationSummary, RateTable, OFFSET_PERCENT};
pub use entities::{
    AverageEntry, CatalogItem, FreightItem, FreightLine, HistoryRecord, ItemAllocation, LineItem,
    UpsFlag, Vendor, Zone,
};
pub use freight::{split_freight, FreightSplit};
pub use history::{
    averages_by_item_vendor, item_names_for_vendor, last_weight_used, matches_item_vendor,
};
