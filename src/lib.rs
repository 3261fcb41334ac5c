//! # Version Adoption Charts
//!
//! `adoptstats` turns per-day, per-version download counts into data ready for a
//! stacked adoption chart. It decides which versions to show, fills gaps so every shown
//! version has a value on every shown date, optionally normalizes counts to shares, and
//! picks a readable set of time-axis ticks for an irregular date range.
//!
//! ## Features
//!
//! - Top-N version selection over a trailing day window
//! - Zero-fill of missing (date, version) pairs
//! - Percentage-of-shown-versions normalization
//! - Pivot into one row per date
//! - Calendar-aligned tick selection
//! - Stacked area rendering to PNG with deterministic per-version colors
//!
//! ## Example
//!
//! ```no_run
//! use adoptstats::{prepare_chart, ChartConfig, HistoryPoint};
//!
//! let points = vec![
//!     HistoryPoint::new(1_704_067_200_000, "1.0.0", 120.0),
//!     HistoryPoint::new(1_704_067_200_000, "1.1.0", 40.0),
//! ];
//! let config = ChartConfig {
//!     max_versions_shown: Some(5),
//!     ..ChartConfig::default()
//! };
//!
//! let chart = prepare_chart(&points, &config);
//! for row in &chart.rows {
//!     println!("{}: {:?}", row.date, row.counts);
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{prepare_chart, prepare_chart_in};
pub use config::{load_history, ChartConfig};
pub use error::{Error, Result};
pub use types::{ChartRow, HistoryPoint, MeasurementTransform, PreparedChart};
pub use utils::VersionLabeler;
