//! Purchase grouping and summary statistics.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use stats_core::error::{Result, StatsError};
use stats_core::models::{PurchaseTotal, StatsReport, ValuedRow};
use stats_core::{money, statistics};
use tracing::debug;

// ── PurchaseAggregator ────────────────────────────────────────────────────────

/// Stateless helper that aggregates valued rows into purchase totals and
/// the summary report.
pub struct PurchaseAggregator;

impl PurchaseAggregator {
    /// Group rows by (brand, customer_id, purchase_id) and sum the item
    /// values per group.
    ///
    /// Totals come back sorted ascending lexicographically on brand, then
    /// customer_id, then purchase_id. The ordering fixes iteration order
    /// for determinism; the statistics downstream do not depend on it.
    pub fn purchase_totals(rows: &[ValuedRow]) -> Vec<PurchaseTotal> {
        // BTreeMap keys iterate in ascending order of the composite tuple.
        let mut groups: BTreeMap<(String, String, String), Decimal> = BTreeMap::new();

        for valued in rows {
            let key = (
                valued.row.brand.clone(),
                valued.row.customer_id.clone(),
                valued.row.purchase_id.clone(),
            );
            *groups.entry(key).or_insert(Decimal::ZERO) += valued.item_product_value;
        }

        groups
            .into_iter()
            .map(|((brand, customer_id, purchase_id), total)| PurchaseTotal {
                brand,
                customer_id,
                purchase_id,
                total,
            })
            .collect()
    }

    /// Compute the five summary statistics over the transformed table.
    ///
    /// The four monetary figures are computed over the per-group purchase
    /// totals; the unique-product count is a global distinct count of
    /// `item_product_name` across the whole (deduplicated) table.
    ///
    /// Fails with [`StatsError::EmptyData`] when the table is empty.
    pub fn calculate_statistics(rows: &[ValuedRow]) -> Result<StatsReport> {
        if rows.is_empty() {
            return Err(StatsError::EmptyData("no rows to aggregate"));
        }

        let totals = Self::purchase_totals(rows);
        let amounts: Vec<Decimal> = totals.iter().map(|t| t.total).collect();

        // A non-empty table yields at least one group, so the statistics
        // below are all defined.
        let average = statistics::mean(&amounts).unwrap_or(Decimal::ZERO);
        let maximum = statistics::max(&amounts).unwrap_or(Decimal::ZERO);
        let median = statistics::median(&amounts).unwrap_or(Decimal::ZERO);

        let unique_products: HashSet<&str> = rows
            .iter()
            .map(|v| v.row.item_product_name.as_str())
            .collect();

        debug!(
            "Aggregated {} rows into {} purchase groups",
            rows.len(),
            totals.len()
        );

        Ok(StatsReport {
            total_volume_of_spend: money::format_currency(statistics::sum(&amounts)),
            average_purchase_value: money::format_currency(average),
            maximum_purchase_value: money::format_currency(maximum),
            median_purchase_value: money::format_currency(median),
            unique_products_purchased: unique_products.len(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
