use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One product entry within a purchase, as it appears on the wire.
///
/// Every field is required; a document missing any of them is rejected at
/// flatten time rather than silently defaulted. The price stays a string
/// here so that coercion failures surface as a dedicated error instead of
/// a generic deserialize error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Item {
    /// Department the product is sold under.
    pub department: String,
    /// Product category label.
    pub product_category: String,
    /// Display name of the product.
    pub product_name: String,
    /// Unit price as a decimal string, e.g. `"249.00"`.
    pub price: String,
    /// Number of units purchased.
    pub quantity: u32,
}

/// One checkout event by a customer at a brand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Purchase {
    /// Brand the purchase was made at.
    pub brand: String,
    /// Identifier of the purchasing customer.
    pub customer_id: String,
    /// Identifier of this checkout event.
    pub purchase_id: String,
    /// Line items in checkout order.
    pub items: Vec<Item>,
}

/// One row of the flattened purchase table: a (purchase, item) pair with
/// the parent identifiers copied onto the item's columns.
///
/// Rows are plain values with no identity beyond their column tuple, so
/// exact-duplicate detection is value equality over all columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlatRow {
    /// Brand carried over from the parent purchase.
    pub brand: String,
    /// Customer identifier carried over from the parent purchase.
    pub customer_id: String,
    /// Purchase identifier carried over from the parent purchase.
    pub purchase_id: String,
    /// Department the item is sold under.
    pub item_department: String,
    /// Product category of the item.
    pub item_product_category: String,
    /// Product name of the item.
    pub item_product_name: String,
    /// Unit price, parsed once at ingestion.
    pub item_price: Decimal,
    /// Number of units purchased.
    pub item_quantity: u32,
}

/// A flat row extended with the derived monetary value column.
///
/// Built as a new table by the transformer; the flat table it derives from
/// is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuedRow {
    /// The underlying flat row, unchanged.
    pub row: FlatRow,
    /// `item_price × item_quantity` for this row.
    pub item_product_value: Decimal,
}

/// The summed value of one purchase group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseTotal {
    /// Brand component of the group key.
    pub brand: String,
    /// Customer component of the group key.
    pub customer_id: String,
    /// Purchase component of the group key.
    pub purchase_id: String,
    /// Sum of item values across the group's rows.
    pub total: Decimal,
}

/// The five summary statistics reported for one pipeline run.
///
/// Immutable once produced; serialized once with the declared key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Sum of all purchase totals, formatted as `$<amount>`.
    pub total_volume_of_spend: String,
    /// Arithmetic mean of purchase totals, formatted as `$<amount>`.
    pub average_purchase_value: String,
    /// Largest purchase total, formatted as `$<amount>`.
    pub maximum_purchase_value: String,
    /// Median purchase total, formatted as `$<amount>`.
    pub median_purchase_value: String,
    /// Count of distinct product names across the deduplicated table.
    pub unique_products_purchased: usize,
}

impl StatsReport {
    /// Serialize the report as JSON with 4-space indentation.
    ///
    /// Key order follows the field declaration order above.
    pub fn to_json_pretty(&self) -> Result<String> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(Vec::new(), formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8.
        Ok(String::from_utf8(ser.into_inner()).expect("JSON output is UTF-8"))
    }
}
