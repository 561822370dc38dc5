//! Flattening of the nested purchase document into the row table.
//!
//! Emits one [`FlatRow`] per (purchase, item) pair, copying the parent
//! identifiers onto each item's row. Prices are parsed from their string
//! representation into decimals here, once, at the ingestion boundary.

use serde_json::Value;
use stats_core::error::{Result, StatsError};
use stats_core::models::{FlatRow, Purchase};
use stats_core::money;
use tracing::debug;

/// Flatten the parsed document into one row per (purchase, item) pair.
///
/// Column order on [`FlatRow`] is fixed: brand, customer_id, purchase_id,
/// then the `item_`-prefixed columns.
///
/// Fails with [`StatsError::MalformedData`] when the document is not an
/// array of well-formed purchases (missing keys, wrong types), with
/// [`StatsError::ValueCoercion`] when a price does not parse to a
/// non-negative number, and with [`StatsError::EmptyData`] when the array
/// is empty or the purchases collectively contain no line items.
pub fn flatten_purchases(document: Value) -> Result<Vec<FlatRow>> {
    let purchases: Vec<Purchase> =
        serde_json::from_value(document).map_err(|e| StatsError::MalformedData(e.to_string()))?;

    if purchases.is_empty() {
        return Err(StatsError::EmptyData("no purchases in input document"));
    }

    let mut rows = Vec::new();
    for purchase in &purchases {
        for item in &purchase.items {
            rows.push(FlatRow {
                brand: purchase.brand.clone(),
                customer_id: purchase.customer_id.clone(),
                purchase_id: purchase.purchase_id.clone(),
                item_department: item.department.clone(),
                item_product_category: item.product_category.clone(),
                item_product_name: item.product_name.clone(),
                item_price: money::parse_price(&item.price)?,
                item_quantity: item.quantity,
            });
        }
    }

    if rows.is_empty() {
        return Err(StatsError::EmptyData("purchases contain no line items"));
    }

    debug!(
        "Flattened {} purchases into {} rows",
        purchases.len(),
        rows.len()
    );
    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
