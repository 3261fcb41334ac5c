use chrono::{Local, TimeZone};
use log::debug;

use crate::config::ChartConfig;
use crate::types::{HistoryPoint, MeasurementTransform, PreparedChart};
use crate::utils::calculate_ticks_in;

use super::percentage::to_percentage;
use super::pivot::{distinct_versions, pivot};
use super::window::select_top_versions_in;

/// Run the full data pipeline with local day boundaries.
pub fn prepare_chart(points: &[HistoryPoint], config: &ChartConfig) -> PreparedChart {
    prepare_chart_in(points, config, &Local)
}

/// Run the full data pipeline: optional top-N selection with zero-fill, optional
/// percentage normalization, pivot into rows, and tick selection over the filtered
/// dates.
pub fn prepare_chart_in<Tz: TimeZone>(
    points: &[HistoryPoint],
    config: &ChartConfig,
    tz: &Tz,
) -> PreparedChart {
    let filtered = match config.max_versions_shown {
        Some(n) => select_top_versions_in(points, n, config.max_days_shown, tz),
        None => points.to_vec(),
    };

    let measured = match config.measurement_transform {
        MeasurementTransform::Percentage => to_percentage(&filtered),
        MeasurementTransform::TotalDownloads => filtered,
    };

    let dates: Vec<i64> = measured.iter().map(|p| p.date).collect();
    let chart = PreparedChart {
        rows: pivot(&measured),
        ticks: calculate_ticks_in(&dates, config.max_ticks, tz),
        versions: distinct_versions(&measured),
        transform: config.measurement_transform,
    };

    debug!(
        "prepared chart: {} input points, {} versions, {} rows, {} ticks",
        points.len(),
        chart.versions.len(),
        chart.rows.len(),
        chart.ticks.len()
    );
    chart
}
