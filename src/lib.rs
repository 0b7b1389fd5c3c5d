//! Shipping cost estimation for gameday merchandise orders.
//!
//! Two calculation paths share one append-only history:
//! - zone-table allocation for UPS shipments, with a fixed markup
//!   split across items by weight share, and
//! - proportional splitting of an already-invoiced freight total.
//!
//! [`estimator::Estimator`] ties the pure domain calculations to a
//! record store; [`infra::RowStoreClient`] talks to the spreadsheet
//! row API and [`infra::InMemoryStore`] backs tests and offline use.

pub mod domain;
pub mod estimator;
pub mod infra;
pub mod settings;
pub mod util;

pub use domain::{allocate, split_freight, AllocationSummary, FreightSplit, RateTable};
pub use estimator::{
    CalculateOutcome, CalculateRequest, EstimateError, Estimator, FreightOutcome, FreightRequest,
    PersistReport,
};
pub use infra::{InMemoryStore, RowStoreClient, StoreError};
pub use settings::{Settings, StoreSettings};
