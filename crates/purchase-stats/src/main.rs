mod bootstrap;

use stats_core::settings::Settings;
use stats_data::analysis::run_pipeline;

fn main() {
    // A usage error surfaces before logging exists, so it goes straight
    // to stderr.
    let settings = match Settings::from_args() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("Failed to initialise logging: {err}");
        std::process::exit(1);
    }

    tracing::info!("purchase-stats v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match run_pipeline(&settings.input) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Run metadata: {} rows flattened, {} after deduplication, load {:.3}s, transform {:.3}s",
        result.metadata.rows_flattened,
        result.metadata.rows_after_dedup,
        result.metadata.load_time_seconds,
        result.metadata.transform_time_seconds,
    );

    match result.report.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => {
            tracing::error!("Failed to serialize statistics: {err}");
            std::process::exit(1);
        }
    }
}
