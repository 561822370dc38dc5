//! Row deduplication and derived-value computation.

use std::collections::HashSet;

use rust_decimal::Decimal;
use stats_core::error::{Result, StatsError};
use stats_core::models::{FlatRow, ValuedRow};
use tracing::debug;

/// Remove exact-duplicate rows, then attach the derived value column.
///
/// Duplicates are collapsed *before* the value computation: a row equal to
/// an earlier one on all columns is dropped, the first occurrence survives,
/// and the relative order of survivors is preserved (a seen-set consulted
/// in input order, the same mechanism the deduplicating reader uses).
///
/// The result is a new table of [`ValuedRow`] with
/// `item_product_value = item_price × item_quantity`; the input table is
/// consumed, never mutated behind a shared reference.
///
/// Fails with [`StatsError::EmptyData`] when the input table is empty.
pub fn transform_rows(rows: Vec<FlatRow>) -> Result<Vec<ValuedRow>> {
    if rows.is_empty() {
        return Err(StatsError::EmptyData("no rows to transform"));
    }

    let total = rows.len();
    let mut seen: HashSet<FlatRow> = HashSet::with_capacity(total);
    let mut valued: Vec<ValuedRow> = Vec::with_capacity(total);

    for row in rows {
        if seen.contains(&row) {
            continue;
        }
        seen.insert(row.clone());

        let item_product_value = row.item_price * Decimal::from(row.item_quantity);
        valued.push(ValuedRow {
            row,
            item_product_value,
        });
    }

    debug!("Deduplicated {} rows down to {}", total, valued.len());
    Ok(valued)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
