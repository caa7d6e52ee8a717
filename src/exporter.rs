use crate::error::ExportError;
use crate::estimator::{isoformat, Clock, DateEstimator};
use crate::models::{BlockRange, CacheValue, EnrichedCache, MarketEntry, MarketKey, ScanResult};
use crate::summary::print_summary;
use indexmap::IndexMap;
use log::{debug, error, info};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads the raw scan cache, failing early when the file is missing.
pub fn load_cache(path: &Path) -> Result<Map<String, Value>, ExportError> {
    if !path.exists() {
        error!("Cache file {} not found", path.display());
        return Err(ExportError::CacheNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
    let cache: Map<String, Value> = serde_json::from_str(&raw)?;
    info!("Loaded {} markets from {}", cache.len(), path.display());

    Ok(cache)
}

/// Smallest and largest block across every scanned interval.
pub fn derive_range(scanned_ranges: &[Vec<u64>]) -> Option<BlockRange> {
    let blocks = scanned_ranges.iter().flatten().copied();
    let from_block = blocks.clone().min()?;
    let to_block = blocks.max()?;

    Some(BlockRange {
        from_block,
        to_block,
    })
}

pub fn enrich_result<C: Clock>(
    result: &mut ScanResult,
    network: &str,
    estimator: &DateEstimator<C>,
) -> Result<(), ExportError> {
    if let Some(raw_block) = &result.block_number {
        if !result.has_timestamp() && result.estimated_date.is_none() {
            let block_number = result
                .block_height()
                .ok_or_else(|| ExportError::InvalidBlockNumber {
                    value: raw_block.to_string(),
                })?;
            let date = estimator.estimate(network, block_number)?;
            result.estimated_date = Some(Value::String(isoformat(&date)));
        }
    }

    if result.hard_liq_count.is_none() {
        result.hard_liq_count = Some(Value::from(result.residual_hard_count()));
    }

    Ok(())
}

pub fn enrich_entry<C: Clock>(
    key: &str,
    mut entry: MarketEntry,
    estimator: &DateEstimator<C>,
) -> Result<MarketEntry, ExportError> {
    let MarketKey { network, market } = MarketKey::parse(key);

    if entry.range.is_none() {
        if let Some(derived) = entry.scanned_ranges.as_deref().and_then(derive_range) {
            entry.range = Some(serde_json::to_value(derived)?);
        }
    }

    if let Some(results) = entry.results.as_mut() {
        for result in results.iter_mut() {
            enrich_result(result, &network, estimator)?;
        }
    }

    entry.network = Some(network);
    entry.market = Some(market);

    Ok(entry)
}

pub fn enrich_cache<C: Clock>(
    raw: Map<String, Value>,
    estimator: &DateEstimator<C>,
) -> Result<EnrichedCache, ExportError> {
    let mut entries = IndexMap::with_capacity(raw.len());

    for (key, value) in raw {
        let enriched = if value.is_object() {
            let entry: MarketEntry = serde_json::from_value(value)?;
            CacheValue::Market(enrich_entry(&key, entry, estimator)?)
        } else {
            debug!("Copying non-market key {} through unchanged", key);
            CacheValue::Passthrough(value)
        };
        entries.insert(key, enriched);
    }

    Ok(EnrichedCache { entries })
}

/// Writes the enriched cache as 2-space indented JSON, replacing any existing file.
pub fn write_output(cache: &EnrichedCache, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, cache)?;
    writer.flush().map_err(|e| ExportError::io(path, e))?;

    info!("Exported data to {}", path.display());
    Ok(())
}

pub fn export_with<C: Clock>(
    cache_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    estimator: &DateEstimator<C>,
) -> Result<EnrichedCache, ExportError> {
    let raw = load_cache(cache_path.as_ref())?;
    let enriched = enrich_cache(raw, estimator)?;
    write_output(&enriched, output_path.as_ref())?;
    print_summary(&enriched);

    Ok(enriched)
}

/// Enriches `cache_path` into `output_path` using the system clock.
pub fn export(
    cache_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<EnrichedCache, ExportError> {
    export_with(cache_path, output_path, &DateEstimator::new())
}
