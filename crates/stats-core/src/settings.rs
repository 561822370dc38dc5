use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::error::{Result, StatsError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Summary statistics over a purchases JSON export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "purchase-stats",
    about = "Summary statistics over a purchases JSON export",
    version
)]
pub struct Settings {
    /// Path to the purchases JSON file
    pub input: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

impl Settings {
    /// Parse the process command line.
    ///
    /// Usage failures (missing input path, extra positionals, unknown
    /// flags) map onto [`StatsError::Usage`] so the binary can exit with
    /// status 1 uniformly. `--help` and `--version` print to stdout and
    /// exit 0, as clap normally does.
    pub fn from_args() -> Result<Self> {
        Self::try_from_iter(std::env::args_os())
    }

    /// [`Self::from_args`] over an explicit argument iterator.
    pub fn try_from_iter<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(settings) => Ok(settings),
            Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                err.exit()
            }
            Err(err) => Err(StatsError::Usage(err.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
