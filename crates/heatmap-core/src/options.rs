// File: crates/heatmap-core/src/options.rs
// Summary: Host-supplied configuration: field options, panel options, ranges.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::error::Error;

/// Per-field options from the host's field configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldOptions {
    pub calculation: Aggregation,
    /// Bucket width in minutes. The UI offers 15/30/60.
    pub group_by: u32,
    /// Explicit domain bounds. Each bound overrides its auto-computed side
    /// independently.
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self { calculation: Aggregation::Mean, group_by: 60, min: None, max: None }
    }
}

/// Panel-level options. `from`/`to` are hour-of-day selections delivered
/// as strings by the host; a `to` of `"0"` means end of day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelOptions {
    pub from: String,
    pub to: String,
    /// Consumed by the rendering host; carried here so the panel model
    /// deserializes in one piece.
    pub show_legend: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self { from: "0".into(), to: "0".into(), show_legend: true }
    }
}

impl PanelOptions {
    pub fn daily_interval(&self) -> Result<DailyInterval, Error> {
        DailyInterval::parse(&self.from, &self.to)
    }
}

/// Absolute query range, epoch millis. The filter widens both ends to
/// whole local days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}

/// Half-open `[from, to)` hour-of-day window used to hide rows outside a
/// region of interest. `to` runs up to 24.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyInterval {
    pub from: u32,
    pub to: u32,
}

impl DailyInterval {
    pub const FULL_DAY: DailyInterval = DailyInterval { from: 0, to: 24 };

    /// Parse the panel's hour strings. The UI offers hours 0..=23 for both
    /// ends; a `to` of `"0"` selects midnight at the end of the day.
    pub fn parse(from: &str, to: &str) -> Result<Self, Error> {
        let from = parse_hour(from)?;
        let to = match parse_hour(to)? {
            0 => 24,
            h => h,
        };
        Ok(Self { from, to })
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.from <= hour && hour < self.to
    }
}

fn parse_hour(s: &str) -> Result<u32, Error> {
    s.trim()
        .parse::<u32>()
        .ok()
        .filter(|h| *h < 24)
        .ok_or_else(|| Error::InvalidDailyInterval(s.to_string()))
}
