//! Thin asynchronous client for the spreadsheet row-store API.
//!
//! - One sheet per record family: history, items, vendors.
//! - Rows arrive schemaless; parsing is defensive and a malformed row
//!   is dropped rather than failing the query.
//! - Row deletes are positional and 1-indexed, so matched rows are
//!   deleted bottom-up to keep earlier indexes valid.

use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::entities::{CatalogItem, HistoryRecord, UpsFlag, Vendor};
use crate::settings::StoreSettings;
use crate::util::numeric::{lenient_f64, lenient_opt_f64};

use super::store::{CatalogStore, HistoryStore, StoreError};

const USER_AGENT: &str = "shipping-cost-estimator/1.0.0";

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for a remote spreadsheet exposed as a row API.
#[derive(Clone)]
pub struct RowStoreClient {
    http: Client,
    base_url: Url,
    api_token: Option<String>,
    history_sheet: String,
    items_sheet: String,
    vendors_sheet: String,
}

impl RowStoreClient {
    pub fn new(settings: &StoreSettings) -> Result<Self, StoreError> {
        let base_url = Url::parse(&settings.base_url)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            api_token: settings.api_token.clone(),
            history_sheet: settings.history_sheet.clone(),
            items_sheet: settings.items_sheet.clone(),
            vendors_sheet: settings.vendors_sheet.clone(),
        })
    }

    async fn fetch_rows(&self, sheet: &str) -> Result<Vec<Value>, StoreError> {
        let url = self.rows_url(sheet)?;
        let rows: Vec<Value> = self.fetch_data(self.authorized(self.http.get(url))).await?;
        Ok(rows)
    }

    async fn append_row(&self, sheet: &str, row: Value) -> Result<(), StoreError> {
        let url = self.rows_url(sheet)?;
        self.fetch_data::<Value>(self.authorized(self.http.post(url)).json(&row))
            .await?;
        Ok(())
    }

    async fn delete_row(&self, sheet: &str, row_index: usize) -> Result<(), StoreError> {
        let url = self
            .base_url
            .join(&format!("sheets/{sheet}/rows/{row_index}"))?;
        self.fetch_data::<Value>(self.authorized(self.http.delete(url)))
            .await?;
        Ok(())
    }

    async fn fetch_data<T>(&self, builder: reqwest::RequestBuilder) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?.error_for_status()?;
        let envelope: ApiEnvelope<T> = response.json().await?;
        if envelope.status.eq_ignore_ascii_case("ok") {
            envelope
                .data
                .ok_or_else(|| StoreError::Api("response missing data".into()))
        } else {
            Err(StoreError::Api(
                envelope.message.unwrap_or(envelope.status),
            ))
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn rows_url(&self, sheet: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(&format!("sheets/{sheet}/rows"))
    }
}

impl HistoryStore for RowStoreClient {
    async fn append(&self, record: HistoryRecord) -> Result<(), StoreError> {
        self.append_row(&self.history_sheet, history_row(&record))
            .await
    }

    async fn query_all(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        let rows = self.fetch_rows(&self.history_sheet).await?;
        let total = rows.len();
        let records = parse_history_rows(rows);
        debug!(total, kept = records.len(), "loaded shipping history");
        Ok(records)
    }

    async fn delete_history(
        &self,
        item_name: &str,
        vendor: Option<&str>,
    ) -> Result<usize, StoreError> {
        let sheet = self.history_sheet.clone();
        let rows = self.fetch_rows(&sheet).await?;

        let matched = matched_row_indexes(&rows, item_name, vendor);
        for row_index in &matched {
            self.delete_row(&sheet, *row_index).await?;
        }
        Ok(matched.len())
    }
}

impl CatalogStore for RowStoreClient {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, StoreError> {
        let rows = self.fetch_rows(&self.items_sheet).await?;
        Ok(parse_item_rows(rows))
    }

    async fn add_item(&self, item: CatalogItem) -> Result<(), StoreError> {
        self.append_row(
            &self.items_sheet,
            json!({ "name": item.name, "weight": item.weight }),
        )
        .await
    }

    async fn remove_item(&self, name: &str) -> Result<bool, StoreError> {
        let sheet = self.items_sheet.clone();
        let rows = self.fetch_rows(&sheet).await?;
        let needle = name.trim();

        let position = rows.iter().position(|row| {
            serde_json::from_value::<ItemRowDto>(row.clone())
                .ok()
                .and_then(ItemRowDto::into_item)
                .map(|item| item.name.trim().eq_ignore_ascii_case(needle))
                .unwrap_or(false)
        });

        match position {
            Some(position) => {
                self.delete_row(&sheet, position + 1).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_vendors(&self) -> Result<Vec<Vendor>, StoreError> {
        let rows = self.fetch_rows(&self.vendors_sheet).await?;
        Ok(parse_vendor_rows(rows))
    }

    async fn add_vendor(&self, vendor: Vendor) -> Result<(), StoreError> {
        self.append_row(
            &self.vendors_sheet,
            json!({ "name": vendor.name, "zip": vendor.zip }),
        )
        .await
    }
}

#[derive(Debug, Default, Deserialize)]
struct HistoryRowDto {
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default)]
    per_unit_cost: Value,
    #[serde(default)]
    per_unit_cost_offset: Value,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    quantity: Value,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    ups: Option<String>,
    #[serde(default)]
    weight_used: Value,
    #[serde(default)]
    po_number: Option<String>,
}

impl HistoryRowDto {
    /// Rows without an item name are silently excluded.
    fn into_record(self) -> Option<HistoryRecord> {
        let item_name = self.item_name?.trim().to_string();
        if item_name.is_empty() {
            return None;
        }
        Some(HistoryRecord {
            item_name,
            per_unit_cost: lenient_f64(&self.per_unit_cost, 0.0),
            per_unit_cost_offset: lenient_f64(&self.per_unit_cost_offset, 0.0),
            timestamp: self.timestamp.unwrap_or_default(),
            // Rows with a mangled quantity still count once.
            quantity: lenient_f64(&self.quantity, 1.0),
            vendor: self.vendor.unwrap_or_default(),
            is_ups: self
                .ups
                .as_deref()
                .and_then(UpsFlag::parse)
                .unwrap_or_default(),
            weight_used: lenient_opt_f64(&self.weight_used),
            po_number: self.po_number.filter(|po| !po.trim().is_empty()),
        })
    }
}

fn history_row(record: &HistoryRecord) -> Value {
    json!({
        "item_name": record.item_name,
        "per_unit_cost": record.per_unit_cost,
        "per_unit_cost_offset": record.per_unit_cost_offset,
        "timestamp": record.timestamp,
        "quantity": record.quantity,
        "vendor": record.vendor,
        "ups": record.is_ups.as_str(),
        // Sheets store absent weights as empty cells.
        "weight_used": record.weight_used.map(Value::from).unwrap_or(Value::String(String::new())),
        "po_number": record.po_number.clone().unwrap_or_default(),
    })
}

/// 1-based indexes of history rows matching the item and optional
/// vendor, in descending order. Deleting bottom-up keeps the whole
/// index set valid while earlier deletions land.
fn matched_row_indexes(rows: &[Value], item_name: &str, vendor: Option<&str>) -> Vec<usize> {
    let mut matched: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter_map(|(position, row)| {
            let dto: HistoryRowDto = serde_json::from_value(row.clone()).ok()?;
            let record = dto.into_record()?;
            crate::domain::history::matches_item_vendor(&record, item_name, vendor)
                .then_some(position + 1)
        })
        .collect();
    matched.reverse();
    matched
}

fn parse_history_rows(rows: Vec<Value>) -> Vec<HistoryRecord> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<HistoryRowDto>(row) {
            Ok(dto) => dto.into_record(),
            Err(error) => {
                warn!(%error, "skipping malformed history row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ItemRowDto {
    #[serde(default, alias = "item", alias = "item_name")]
    name: Option<String>,
    #[serde(default, alias = "weight_lbs")]
    weight: Value,
}

impl ItemRowDto {
    fn into_item(self) -> Option<CatalogItem> {
        let name = self.name?.trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(CatalogItem {
            name,
            weight: lenient_f64(&self.weight, 0.0),
        })
    }
}

fn parse_item_rows(rows: Vec<Value>) -> Vec<CatalogItem> {
    rows.into_iter()
        .filter_map(|row| serde_json::from_value::<ItemRowDto>(row).ok())
        .filter_map(ItemRowDto::into_item)
        .collect()
}

#[derive(Debug, Deserialize)]
struct VendorRowDto {
    #[serde(default, alias = "vendor")]
    name: Option<String>,
    #[serde(default, alias = "zip_code")]
    zip: Option<String>,
}

fn parse_vendor_rows(rows: Vec<Value>) -> Vec<Vendor> {
    rows.into_iter()
        .filter_map(|row| serde_json::from_value::<VendorRowDto>(row).ok())
        .filter_map(|dto| {
            let name = dto.name?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(Vendor {
                name,
                zip: dto.zip.unwrap_or_default().trim().to_string(),
            })
        })
        .collect()
}
