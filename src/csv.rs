use crate::error::ExportError;
use crate::models::{count, number, EnrichedCache};
use csv::Writer;
use serde::Serialize;
use serde_json::Number;
use std::path::Path;

/// One enriched scan result flattened for spreadsheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub key: String,
    pub network: String,
    pub market: String,
    pub block_number: Option<u64>,
    pub estimated_date: Option<String>,
    pub total_positions: i64,
    pub soft_liq_count: i64,
    pub hard_liq_count: i64,
    pub ignored_positions: i64,
    pub total_collateral_usd: Option<Number>,
}

impl ResultRow {
    pub fn from_cache(cache: &EnrichedCache) -> Vec<ResultRow> {
        let mut rows = Vec::new();
        for (key, entry) in cache.markets() {
            let network = entry.network.clone().unwrap_or_default();
            let market = entry.market.clone().unwrap_or_default();
            for r in entry.results() {
                rows.push(ResultRow {
                    key: key.to_string(),
                    network: network.clone(),
                    market: market.clone(),
                    block_number: r.block_height(),
                    estimated_date: r.date().map(str::to_string),
                    total_positions: count(&r.total_positions),
                    soft_liq_count: r.soft(),
                    hard_liq_count: r.hard(),
                    ignored_positions: count(&r.ignored_positions),
                    total_collateral_usd: number(&r.total_collateral_usd),
                });
            }
        }
        rows
    }
}

pub fn export_results_csv(rows: &[ResultRow], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut wtr = Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}
