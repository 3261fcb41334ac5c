//! # Configuration
//!
//! Chart options and history input, both read from JSON. Every option has a default
//! so an empty object (or no file at all) is a valid configuration.

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::types::{HistoryPoint, MeasurementTransform};
use crate::utils::VersionLabeler;

/// Options controlling which data is shown and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Trailing window, in days, used for top-N ranking and zero-fill
    pub max_days_shown: u32,
    /// Upper bound on time-axis ticks
    pub max_ticks: usize,
    /// Keep only this many versions; `None` shows every version and every date.
    /// Zero or negative limits give an empty chart.
    #[serde(deserialize_with = "version_limit")]
    pub max_versions_shown: Option<usize>,
    pub measurement_transform: MeasurementTransform,
    /// Presentation-only relabeling of version keys
    pub version_labeler: VersionLabeler,
    pub show_legend: bool,
    /// Include per-row tooltip lines in the exported chart JSON
    pub show_tooltip: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_days_shown: 30,
            max_ticks: 6,
            max_versions_shown: None,
            measurement_transform: MeasurementTransform::TotalDownloads,
            version_labeler: VersionLabeler::Identity,
            show_legend: true,
            show_tooltip: true,
        }
    }
}

/// Clamp a signed version limit so negatives read as zero.
pub fn clamp_version_limit(limit: i64) -> usize {
    usize::try_from(limit.max(0)).unwrap_or(usize::MAX)
}

fn version_limit<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let limit: Option<i64> = Option::deserialize(deserializer)?;
    Ok(limit.map(clamp_version_limit))
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading chart config from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Read a JSON array of history points.
///
/// Points out of date order are stably sorted so the pipeline sees ascending dates.
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<HistoryPoint>> {
    let path = path.as_ref();
    let mut points: Vec<HistoryPoint> = serde_json::from_str(&fs::read_to_string(path)?)?;

    if points.windows(2).any(|pair| pair[0].date > pair[1].date) {
        warn!(
            "history in {} is not sorted by date, sorting {} points",
            path.display(),
            points.len()
        );
        points.sort_by_key(|p| p.date);
    }

    debug!("loaded {} history points from {}", points.len(), path.display());
    Ok(points)
}
