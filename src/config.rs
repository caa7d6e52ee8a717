use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CACHE_FILE: &str = "scan_results_cache.json";
pub const DEFAULT_OUTPUT_FILE: &str = "cache_data.json";

/// Separates network, protocol and market tokens in a cache key.
pub const KEY_DELIMITER: char = '_';
pub const UNKNOWN_LABEL: &str = "unknown";

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
pub const DATE_PREFIX_LEN: usize = 10;

pub const REPORT_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cache_file: PathBuf,
    pub output_file: PathBuf,
    pub csv_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            csv_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let cache_file = env::var("SCAN_CACHE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CACHE_FILE));
        let output_file = env::var("EXPORT_OUTPUT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_FILE));
        let csv_file = env::var("EXPORT_CSV_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            cache_file,
            output_file,
            csv_file,
        }
    }
}
