use crate::config::{DATE_PREFIX_LEN, REPORT_WIDTH, UNKNOWN_LABEL};
use crate::models::EnrichedCache;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Earliest and latest `YYYY-MM-DD` seen for a network.
///
/// Compared as strings, which orders correctly for zero-padded ISO dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub min: String,
    pub max: String,
}

impl DateSpan {
    fn include(&mut self, date: &str) {
        if date < self.min.as_str() {
            self.min = date.to_string();
        }
        if date > self.max.as_str() {
            self.max = date.to_string();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkStats {
    pub markets: BTreeSet<String>,
    pub soft: i64,
    pub hard: i64,
    pub volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub networks: BTreeSet<String>,
    pub markets: BTreeSet<String>,
    pub total_soft: i64,
    pub total_hard: i64,
    pub total_volume: f64,
    pub per_network: BTreeMap<String, NetworkStats>,
    pub date_ranges: BTreeMap<String, DateSpan>,
}

impl Summary {
    pub fn from_cache(cache: &EnrichedCache) -> Self {
        let mut summary = Summary::default();

        for (_, entry) in cache.markets() {
            let network = entry.network.as_deref().unwrap_or(UNKNOWN_LABEL);
            let market = entry.market.as_deref().unwrap_or(UNKNOWN_LABEL);

            summary.networks.insert(network.to_string());
            summary.markets.insert(market.to_string());

            let stats = summary.per_network.entry(network.to_string()).or_default();
            stats.markets.insert(market.to_string());

            for result in entry.results() {
                let soft = result.soft();
                let hard = result.hard();
                let volume = result.volume();

                summary.total_soft = summary.total_soft.saturating_add(soft);
                summary.total_hard = summary.total_hard.saturating_add(hard);
                summary.total_volume += volume;
                stats.soft = stats.soft.saturating_add(soft);
                stats.hard = stats.hard.saturating_add(hard);
                stats.volume += volume;

                if let Some(estimated) = result.date() {
                    let date: String = estimated.chars().take(DATE_PREFIX_LEN).collect();
                    summary
                        .date_ranges
                        .entry(network.to_string())
                        .and_modify(|span| span.include(&date))
                        .or_insert_with(|| DateSpan {
                            min: date.clone(),
                            max: date.clone(),
                        });
                }
            }
        }

        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(REPORT_WIDTH);
        let networks: Vec<&str> = self.networks.iter().map(String::as_str).collect();

        writeln!(f, "{rule}")?;
        writeln!(f, "CACHE SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Networks: {} - {}", self.networks.len(), networks.join(", "))?;
        writeln!(f, "Markets: {}", self.markets.len())?;
        writeln!(f, "Soft liquidations: {}", group_int(self.total_soft))?;
        writeln!(f, "Hard liquidations: {}", group_int(self.total_hard))?;
        writeln!(f, "Total volume: {}", usd(self.total_volume))?;

        if !self.per_network.is_empty() {
            writeln!(f)?;
            writeln!(f, "By network:")?;
            for (network, stats) in &self.per_network {
                writeln!(
                    f,
                    "  {network}: {} markets, {} soft, {} hard, {}",
                    stats.markets.len(),
                    group_int(stats.soft),
                    group_int(stats.hard),
                    usd(stats.volume)
                )?;
            }
        }

        if !self.date_ranges.is_empty() {
            writeln!(f)?;
            writeln!(f, "Date ranges by network:")?;
            for (network, span) in &self.date_ranges {
                writeln!(f, "  {network}: {} - {}", span.min, span.max)?;
            }
        }

        write!(f, "{rule}")
    }
}

/// Builds the summary and prints it to stdout.
pub fn print_summary(cache: &EnrichedCache) -> Summary {
    let summary = Summary::from_cache(cache);
    println!("\n{summary}");
    summary
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Integer with thousands separators, e.g. `1,234,567`.
pub fn group_int(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Dollar amount with two decimals and thousands separators, e.g. `$1,234.50`.
pub fn usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_digits(int_part))
}
