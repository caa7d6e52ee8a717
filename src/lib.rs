//! # Modules Overview
//!
//! This crate turns the liquidation scanner's result cache into the enriched
//! `cache_data.json` consumed by the visualizer, and prints a summary of it.

/// `config`
///
/// Default file names, key parsing constants and `Config::from_env`, which reads
/// `SCAN_CACHE_FILE`, `EXPORT_OUTPUT_FILE` and `EXPORT_CSV_FILE` (a `.env` file is honored).
pub mod config;

/// `csv`
///
/// Flattens every enriched scan result into a `ResultRow` and writes them to a CSV file.
///
/// Example usage:
/// ```rust,ignore
/// let rows = csv::ResultRow::from_cache(&enriched);
/// csv::export_results_csv(&rows, "results.csv")?;
/// ```
pub mod csv;

pub mod error;

/// `estimator`
///
/// Estimates the calendar date of a block from hardcoded per-network anchors and
/// average block times. Networks without anchors fall back to the injected `Clock`.
///
/// Example usage:
/// ```rust,ignore
/// let date = estimator::DateEstimator::new().estimate("ethereum", 21_527_368)?;
/// ```
pub mod estimator;

/// `exporter`
///
/// Loads the scan cache, derives network/market labels, block ranges, estimated dates
/// and hard liquidation counts, then writes the enriched JSON and prints the summary.
///
/// Example usage:
/// ```rust,ignore
/// let enriched = exporter::export("scan_results_cache.json", "cache_data.json")?;
/// ```
pub mod exporter;

/// `models`
///
/// * `MarketKey` – network and market labels parsed from a cache key.
/// * `MarketEntry` and `ScanResult` – cache records; unknown fields are kept in `extra`.
/// * `CacheValue` and `EnrichedCache` – the ordered, enriched top-level mapping.
pub mod models;

pub mod summary;

pub use error::ExportError;
