use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the purchase statistics pipeline.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The command line did not supply exactly one input path.
    ///
    /// Carries the rendered usage message from the argument parser.
    #[error("{0}")]
    Usage(String),

    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input document could not be parsed as JSON.
    ///
    /// An empty file falls under this variant too, since an empty document
    /// is not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The parsed JSON does not match the expected purchase/item shape
    /// (missing keys, wrong types).
    #[error("Malformed purchase data: {0}")]
    MalformedData(String),

    /// A stage received zero rows or elements where at least one is
    /// required. The payload names the stage that came up empty.
    #[error("No data to process: {0}")]
    EmptyData(&'static str),

    /// A price field could not be converted to a non-negative number.
    #[error("Cannot coerce {field} value {value:?} to a number")]
    ValueCoercion { field: &'static str, value: String },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the pipeline crates.
pub type Result<T> = std::result::Result<T, StatsError>;
