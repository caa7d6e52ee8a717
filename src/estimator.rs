use crate::error::ExportError;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};

/// Source of "now" for networks without reference anchors.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A known (block, midnight of date) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub block: u64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Anchor {
    const fn new(block: u64, year: i32, month: u32, day: u32) -> Self {
        Anchor {
            block,
            year,
            month,
            day,
        }
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NetworkProfile {
    pub name: &'static str,
    /// Average block time in milliseconds.
    pub block_time_ms: i64,
    /// Sorted by block number.
    pub anchors: &'static [Anchor],
}

pub const NETWORKS: &[NetworkProfile] = &[
    NetworkProfile {
        name: "ethereum",
        block_time_ms: 12_000,
        anchors: &[
            Anchor::new(21_515_000, 2025, 1, 1),
            Anchor::new(21_527_368, 2025, 1, 2),
            Anchor::new(23_134_000, 2025, 8, 13),
        ],
    },
    NetworkProfile {
        name: "arbitrum",
        block_time_ms: 250,
        anchors: &[
            Anchor::new(290_658_752, 2025, 1, 1),
            Anchor::new(290_864_657, 2025, 1, 2),
            Anchor::new(368_368_256, 2025, 8, 14),
        ],
    },
    NetworkProfile {
        name: "fraxtal",
        block_time_ms: 2_000,
        anchors: &[
            Anchor::new(19_840_000, 2025, 1, 1),
            Anchor::new(19_860_000, 2025, 1, 2),
            Anchor::new(23_000_000, 2025, 8, 14),
        ],
    },
];

pub fn profile(network: &str) -> Option<&'static NetworkProfile> {
    NETWORKS.iter().find(|p| p.name == network)
}

impl NetworkProfile {
    /// Latest anchor at or below `block_number`, or the earliest anchor when
    /// the block predates all of them.
    pub fn anchor_for(&self, block_number: u64) -> Option<&Anchor> {
        self.anchors
            .iter()
            .rev()
            .find(|a| a.block <= block_number)
            .or_else(|| self.anchors.first())
    }
}

/// Estimates block dates by linear extrapolation from per-network anchors.
#[derive(Debug, Clone, Default)]
pub struct DateEstimator<C = SystemClock> {
    clock: C,
}

impl DateEstimator<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> DateEstimator<C> {
    pub fn with_clock(clock: C) -> Self {
        DateEstimator { clock }
    }

    pub fn estimate(&self, network: &str, block_number: u64) -> Result<NaiveDateTime, ExportError> {
        let Some(profile) = profile(network) else {
            return Ok(self.clock.now());
        };

        let invalid_anchor = || ExportError::InvalidAnchor {
            network: network.to_string(),
        };
        let anchor = profile.anchor_for(block_number).ok_or_else(invalid_anchor)?;
        let anchor_date = anchor.date().ok_or_else(invalid_anchor)?;

        let out_of_range = || ExportError::DateOutOfRange {
            network: network.to_string(),
            block_number,
        };
        let block_diff = i128::from(block_number) - i128::from(anchor.block);
        let offset = i64::try_from(block_diff * i128::from(profile.block_time_ms))
            .ok()
            .and_then(Duration::try_milliseconds)
            .ok_or_else(out_of_range)?;

        anchor_date.checked_add_signed(offset).ok_or_else(out_of_range)
    }
}

/// ISO-8601 without offset; microseconds appear only when non-zero.
pub fn isoformat(dt: &NaiveDateTime) -> String {
    let base = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    match dt.nanosecond() / 1_000 {
        0 => base,
        micros => format!("{base}.{micros:06}"),
    }
}
