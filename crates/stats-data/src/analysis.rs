//! Top-level pipeline for the purchase statistics CLI.
//!
//! Chains loading, flattening, transformation and aggregation, emitting a
//! log line at every stage boundary and returning a [`PipelineResult`]
//! ready for the binary to print.

use std::path::Path;
use std::time::Instant;

use stats_core::error::Result;
use stats_core::models::StatsReport;
use tracing::info;

use crate::aggregator::PurchaseAggregator;
use crate::flatten::flatten_purchases;
use crate::loader::load_document;
use crate::transform::transform_rows;

// ── Public types ──────────────────────────────────────────────────────────────

/// Operational metadata produced alongside the statistics report.
///
/// Logged for diagnostics only; never part of the printed JSON result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineMetadata {
    /// Number of rows produced by the flattener.
    pub rows_flattened: usize,
    /// Number of rows remaining after duplicate removal.
    pub rows_after_dedup: usize,
    /// Wall-clock seconds spent loading and parsing the input file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent flattening, transforming and aggregating.
    pub transform_time_seconds: f64,
}

/// The complete output of [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The five summary statistics.
    pub report: StatsReport,
    /// Metadata about this run.
    pub metadata: PipelineMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over the purchases file at `path`.
///
/// 1. Load the file and parse it as JSON.
/// 2. Flatten purchases into one row per line item.
/// 3. Deduplicate rows and compute per-item values.
/// 4. Aggregate purchase totals and calculate the summary statistics.
///
/// Each stage fully consumes the previous stage's output before the next
/// starts; the pipeline is terminal on the first stage that fails and
/// never produces a partial result.
pub fn run_pipeline(path: &Path) -> Result<PipelineResult> {
    let load_start = Instant::now();
    let document = load_document(path)?;
    let load_time_seconds = load_start.elapsed().as_secs_f64();
    info!("Loaded input document from {}", path.display());

    let transform_start = Instant::now();
    let rows = flatten_purchases(document)?;
    let rows_flattened = rows.len();
    info!("Flattened input into {} rows", rows_flattened);

    let valued = transform_rows(rows)?;
    let rows_after_dedup = valued.len();
    info!(
        "Transformed table holds {} rows after deduplication",
        rows_after_dedup
    );

    let report = PurchaseAggregator::calculate_statistics(&valued)?;
    let transform_time_seconds = transform_start.elapsed().as_secs_f64();
    info!("Calculated statistics over the purchase totals");

    Ok(PipelineResult {
        report,
        metadata: PipelineMetadata {
            rows_flattened,
            rows_after_dedup,
            load_time_seconds,
            transform_time_seconds,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use stats_core::error::StatsError;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_input(dir: &Path, document: &Value) -> PathBuf {
        let path = dir.join("purchases.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", document).unwrap();
        path
    }

    fn item(department: &str, category: &str, name: &str, price: &str, quantity: u32) -> Value {
        json!({
            "department": department,
            "product_category": category,
            "product_name": name,
            "price": price,
            "quantity": quantity
        })
    }

    fn sample_purchase() -> Value {
        json!({
            "brand": "newventure.co",
            "customer_id": "a45f2398-3f57-4d83-84bf-87afc31b483a",
            "purchase_id": "3655582c-4b0c-4db4-9b53-b2e0d06bba8d",
            "items": [
                item("Tools", "Sausages", "Intelligent Fresh Pizza", "249.00", 1),
                item("Health", "Mouse", "Refined Wooden Hat", "366.00", 2)
            ]
        })
    }

    /// Six purchases with two items each: totals 500, 980, 1111, 1230,
    /// 1661 and 2413 across twelve distinct products.
    fn six_purchase_document() -> Value {
        json!([
            {
                "brand": "newventure.co", "customer_id": "c1", "purchase_id": "p1",
                "items": [
                    item("Garden", "Chairs", "Ergonomic Steel Chair", "200.00", 1),
                    item("Garden", "Tables", "Rustic Granite Table", "300.00", 1)
                ]
            },
            {
                "brand": "newventure.co", "customer_id": "c2", "purchase_id": "p2",
                "items": [
                    item("Tools", "Drills", "Handcrafted Iron Drill", "480.00", 1),
                    item("Tools", "Saws", "Incredible Steel Saw", "250.00", 2)
                ]
            },
            {
                "brand": "shopsmart.io", "customer_id": "c3", "purchase_id": "p3",
                "items": [
                    item("Electronics", "Screens", "Sleek Plastic Monitor", "1000.00", 1),
                    item("Electronics", "Cables", "Generic Copper Cable", "111.00", 1)
                ]
            },
            {
                "brand": "shopsmart.io", "customer_id": "c4", "purchase_id": "p4",
                "items": [
                    item("Home", "Lamps", "Luminous Brass Lamp", "400.00", 3),
                    item("Home", "Bulbs", "Awesome Frozen Bulb", "30.00", 1)
                ]
            },
            {
                "brand": "tradehouse.net", "customer_id": "c5", "purchase_id": "p5",
                "items": [
                    item("Sports", "Bikes", "Fantastic Carbon Bike", "1500.00", 1),
                    item("Sports", "Helmets", "Small Cotton Helmet", "161.00", 1)
                ]
            },
            {
                "brand": "tradehouse.net", "customer_id": "c6", "purchase_id": "p6",
                "items": [
                    item("Music", "Guitars", "Gorgeous Wooden Guitar", "2000.00", 1),
                    item("Music", "Strings", "Practical Nylon Strings", "413.00", 1)
                ]
            }
        ])
    }

    // ── Happy path ────────────────────────────────────────────────────────────

    #[test]
    fn test_pipeline_single_purchase_scenario() {
        let dir = TempDir::new().unwrap();
        let path = write_input(dir.path(), &json!([sample_purchase()]));

        let result = run_pipeline(&path).unwrap();
        let report = result.report;

        // 249.00×1 + 366.00×2 = 981.00, one group.
        assert_eq!(report.total_volume_of_spend, "$981.00");
        assert_eq!(report.average_purchase_value, "$981.00");
        assert_eq!(report.maximum_purchase_value, "$981.00");
        assert_eq!(report.median_purchase_value, "$981.00");
        assert_eq!(report.unique_products_purchased, 2);
    }

    #[test]
    fn test_pipeline_six_purchase_fixture() {
        let dir = TempDir::new().unwrap();
        let path = write_input(dir.path(), &six_purchase_document());

        let report = run_pipeline(&path).unwrap().report;

        assert_eq!(report.total_volume_of_spend, "$7895.00");
        assert_eq!(report.average_purchase_value, "$1315.83");
        assert_eq!(report.maximum_purchase_value, "$2413.00");
        assert_eq!(report.median_purchase_value, "$1170.50");
        assert_eq!(report.unique_products_purchased, 12);
    }

    #[test]
    fn test_pipeline_metadata_counts() {
        let dir = TempDir::new().unwrap();
        let path = write_input(dir.path(), &six_purchase_document());

        let result = run_pipeline(&path).unwrap();
        assert_eq!(result.metadata.rows_flattened, 12);
        assert_eq!(result.metadata.rows_after_dedup, 12);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_input(dir.path(), &six_purchase_document());

        let first = run_pipeline(&path).unwrap().report.to_json_pretty().unwrap();
        let second = run_pipeline(&path).unwrap().report.to_json_pretty().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pipeline_duplicate_row_does_not_change_total() {
        let dir = TempDir::new().unwrap();
        let baseline_path = write_input(dir.path(), &json!([sample_purchase()]));
        let baseline = run_pipeline(&baseline_path).unwrap().report;

        // Append an exact duplicate of the first line item.
        let mut with_duplicate = sample_purchase();
        let items = with_duplicate["items"].as_array_mut().unwrap();
        let duplicate = items[0].clone();
        items.push(duplicate);

        let dup_dir = TempDir::new().unwrap();
        let dup_path = write_input(dup_dir.path(), &json!([with_duplicate]));
        let report = run_pipeline(&dup_path).unwrap().report;

        assert_eq!(report.total_volume_of_spend, baseline.total_volume_of_spend);
        assert_eq!(report.unique_products_purchased, baseline.unique_products_purchased);
    }

    // ── Failure paths ─────────────────────────────────────────────────────────

    #[test]
    fn test_pipeline_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, StatsError::FileRead { .. }));
    }

    #[test]
    fn test_pipeline_empty_array_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_input(dir.path(), &json!([]));

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, StatsError::EmptyData(_)));
    }

    #[test]
    fn test_pipeline_only_purchase_with_no_items_fails() {
        let dir = TempDir::new().unwrap();
        let document = json!([
            {
                "brand": "newventure.co",
                "customer_id": "c1",
                "purchase_id": "p1",
                "items": []
            }
        ]);
        let path = write_input(dir.path(), &document);

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, StatsError::EmptyData(_)));
    }

    #[test]
    fn test_pipeline_malformed_item_fails() {
        let dir = TempDir::new().unwrap();
        let mut purchase = sample_purchase();
        purchase["items"][0].as_object_mut().unwrap().remove("price");
        let path = write_input(dir.path(), &json!([purchase]));

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, StatsError::MalformedData(_)));
    }

    #[test]
    fn test_pipeline_non_numeric_price_fails() {
        let dir = TempDir::new().unwrap();
        let mut purchase = sample_purchase();
        purchase["items"][0]["price"] = json!("two hundred");
        let path = write_input(dir.path(), &json!([purchase]));

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, StatsError::ValueCoercion { .. }));
    }

    #[test]
    fn test_pipeline_invalid_json_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("purchases.json");
        std::fs::write(&path, "{broken").unwrap();

        let err = run_pipeline(&path).unwrap_err();
        assert!(matches!(err, StatsError::JsonParse(_)));
    }
}
