use anyhow::Result;
use serde_json::Value;
use tracing::{info, warn};

use crate::database_ops::catalog::{self, ProductRow};
use crate::database_ops::db::Db;
use crate::ingest::client::CatalogClient;
use crate::normalization::field::normalize_field;
use crate::normalization::items::extract_items;

/// Outcome of resolving one raw catalog entry. Data-quality problems are
/// outcomes here, not errors: the sync loop logs the warnings and keeps going.
#[derive(Debug, PartialEq)]
pub enum Resolution {
    /// Entry maps to a row; warnings (if any) describe defaulted fields.
    Keep(ProductRow, Vec<String>),
    /// Entry is dropped entirely, with the reason.
    Skip(String),
}

/// One full fetch-extract-normalize-replace pass against the store.
///
/// The featured subset is fetched first so its entries land first. The
/// delete-all is committed before repopulation; on any later failure the
/// pending inserts roll back and the store stays empty until the next cycle.
pub async fn sync(db: &Db, client: &CatalogClient) -> Result<()> {
    let featured = client.fetch_products(true).await?;
    let rest = client.fetch_products(false).await?;

    let mut entries = extract_items(&featured);
    entries.extend(extract_items(&rest));

    catalog::clear_catalog(db).await?;

    let mut rows: Vec<ProductRow> = Vec::new();
    for entry in &entries {
        match resolve_entry(entry) {
            Resolution::Keep(row, warnings) => {
                for message in warnings {
                    warn!(%message, "entry kept with defaulted field");
                }
                rows.push(row);
            }
            Resolution::Skip(reason) => warn!(%reason, "skipping entry"),
        }
    }

    catalog::insert_products(db, &rows).await?;
    info!("fetched and updated {} products", entries.len());
    Ok(())
}

/// Resolves one entry into a row, or decides to drop it.
///
/// Policy asymmetry is deliberate and preserved from the source system: a
/// missing category drops the entry, a bad price keeps it at 0.0.
pub fn resolve_entry(entry: &Value) -> Resolution {
    if !entry.is_object() {
        return Resolution::Skip(format!("non-object entry: {entry}"));
    }

    let category = resolve_category(entry);
    if category.is_empty() {
        return Resolution::Skip(format!("entry without category: {entry}"));
    }

    let mut warnings = Vec::new();
    let price = resolve_price(entry, &mut warnings);
    let image_url = resolve_image(entry);

    let row = ProductRow {
        id: resolve_id(entry.get("Product_ID")),
        name: entry
            .get("Product_Name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string(),
        price,
        image_url,
        on_main: truthy(entry.get("OnMain")),
        category,
    };
    Resolution::Keep(row, warnings)
}

fn resolve_category(entry: &Value) -> String {
    normalize_field(entry.get("categories"), Some("Category_Name"))
        .first()
        .and_then(|record| record.get("Category_Name"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

/// A missing `price` key defaults silently; an empty normalized list, a
/// non-record first element, or an uncoercible value defaults with a warning.
fn resolve_price(entry: &Value, warnings: &mut Vec<String>) -> f64 {
    let params = normalize_field(entry.get("parameters"), Some("price"));
    let first = match params.first().and_then(Value::as_object) {
        Some(record) => record,
        None => {
            warnings.push(format!("invalid price {params:?} for entry {entry}"));
            return 0.0;
        }
    };
    match first.get("price") {
        None => 0.0,
        Some(value) => coerce_price(value).unwrap_or_else(|| {
            warnings.push(format!("invalid price {value} for entry {entry}"));
            0.0
        }),
    }
}

fn resolve_image(entry: &Value) -> String {
    normalize_field(entry.get("images"), Some("Image_URL"))
        .first()
        .and_then(|record| record.get("Image_URL"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

fn coerce_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn resolve_id(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Source-system truthiness: empty strings/collections and zero are false,
/// everything else present is true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
