//! # Common Types
//!
//! This module contains the value types passed between the pipeline stages: raw
//! history points going in, pivoted chart rows and tick lists coming out.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One (date, version, count) observation.
///
/// `date` is a UTC instant in milliseconds since the epoch. Several points may share a
/// date (different versions) or a version (different dates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Milliseconds since the Unix epoch
    pub date: i64,
    /// Raw version key, e.g. `"1.4.2"`
    pub version: String,
    /// Downloads on that day, or a fraction after percentage normalization
    pub count: f64,
}

impl HistoryPoint {
    pub fn new(date: i64, version: impl Into<String>, count: f64) -> Self {
        Self {
            date,
            version: version.into(),
            count,
        }
    }
}

/// One plotted row: every version's value on a single date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Milliseconds since the Unix epoch
    pub date: i64,
    /// Value per raw version key
    pub counts: HashMap<String, f64>,
}

impl ChartRow {
    pub fn new(date: i64) -> Self {
        Self {
            date,
            counts: HashMap::new(),
        }
    }

    /// Value for `version`, if the row has one.
    pub fn get(&self, version: &str) -> Option<f64> {
        self.counts.get(version).copied()
    }

    /// Sum of all values in the row.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }
}

/// How counts are presented on the value axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementTransform {
    /// Raw download counts
    #[default]
    TotalDownloads,
    /// Share of the shown versions' downloads on each date, in `0.0..=1.0`
    Percentage,
}

/// Everything a renderer needs to draw the adoption chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedChart {
    /// One row per retained date, ascending
    pub rows: Vec<ChartRow>,
    /// Time-axis tick timestamps, strictly increasing
    pub ticks: Vec<i64>,
    /// Kept raw version keys in first-seen order
    pub versions: Vec<String>,
    /// Transform applied to the row values
    pub transform: MeasurementTransform,
}

impl PreparedChart {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest row total, used to size the value axis.
    pub fn max_row_total(&self) -> f64 {
        self.rows.iter().map(ChartRow::total).fold(0.0, f64::max)
    }
}
