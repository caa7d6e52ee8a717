use crate::config::{KEY_DELIMITER, UNKNOWN_LABEL};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Network and market labels parsed out of a cache key such as `ethereum_pool_USDC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketKey {
    pub network: String,
    pub market: String,
}

impl MarketKey {
    pub fn parse(key: &str) -> Self {
        let parts: Vec<&str> = key.split(KEY_DELIMITER).collect();
        let network = parts.first().copied().unwrap_or_default().to_string();
        let market = match parts.last() {
            Some(last) if parts.len() > 2 => last.to_string(),
            _ => UNKNOWN_LABEL.to_string(),
        };

        MarketKey { network, market }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    pub from_block: u64,
    pub to_block: u64,
}

/// Keeps an explicit `null` as `Some(Value::Null)` so a present key stays present.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Integer view of a JSON count; floats are truncated, anything else counts as 0.
pub fn count(field: &Option<Value>) -> i64 {
    match field {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
        _ => 0,
    }
}

pub fn number(field: &Option<Value>) -> Option<Number> {
    match field {
        Some(Value::Number(n)) => Some(n.clone()),
        _ => None,
    }
}

/// One snapshot produced by the liquidation scanner.
///
/// Interpreted fields stay raw JSON so they are written back exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub block_number: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_positions: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub soft_liq_count: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ignored_positions: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hard_liq_count: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_collateral_usd: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub estimated_date: Option<Value>,
    /// Everything the scanner wrote that we do not interpret, `timestamp` included.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScanResult {
    pub fn has_timestamp(&self) -> bool {
        self.extra.contains_key("timestamp")
    }

    /// Block height as an integer; integral floats are accepted.
    pub fn block_height(&self) -> Option<u64> {
        match &self.block_number {
            Some(Value::Number(n)) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            _ => None,
        }
    }

    pub fn soft(&self) -> i64 {
        count(&self.soft_liq_count)
    }

    pub fn hard(&self) -> i64 {
        count(&self.hard_liq_count)
    }

    pub fn volume(&self) -> f64 {
        match &self.total_collateral_usd {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn date(&self) -> Option<&str> {
        self.estimated_date.as_ref().and_then(Value::as_str)
    }

    /// Positions that were neither soft-liquidated nor ignored, never negative.
    pub fn residual_hard_count(&self) -> i64 {
        let total = count(&self.total_positions);
        let soft = count(&self.soft_liq_count);
        let ignored = count(&self.ignored_positions);

        total.saturating_sub(soft).saturating_sub(ignored).max(0)
    }
}

/// Per-market record of the scan cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_ranges: Option<Vec<Vec<u64>>>,
    /// Kept opaque: an existing range is written back untouched.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub range: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ScanResult>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

impl MarketEntry {
    pub fn results(&self) -> &[ScanResult] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// A top-level cache value: either a market entry or something copied through as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CacheValue {
    Market(MarketEntry),
    Passthrough(Value),
}

impl CacheValue {
    pub fn as_market(&self) -> Option<&MarketEntry> {
        match self {
            CacheValue::Market(entry) => Some(entry),
            CacheValue::Passthrough(_) => None,
        }
    }
}

/// The enriched cache, keeping the input's key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnrichedCache {
    pub entries: IndexMap<String, CacheValue>,
}

impl EnrichedCache {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&CacheValue> {
        self.entries.get(key)
    }

    pub fn markets(&self) -> impl Iterator<Item = (&str, &MarketEntry)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_market().map(|entry| (key.as_str(), entry)))
    }
}
