use chrono::{Local, TimeZone};

use crate::config::ChartConfig;
use crate::error::Result;
use crate::types::{ChartRow, MeasurementTransform, PreparedChart};
use crate::utils::VersionLabeler;

/// Tooltip lines for one row, using the local calendar date.
pub fn format_tooltip(
    row: &ChartRow,
    versions: &[String],
    transform: MeasurementTransform,
    labeler: &VersionLabeler,
) -> Vec<String> {
    format_tooltip_in(row, versions, transform, labeler, &Local)
}

/// Tooltip lines for one row: the date, then `label: value` for each version in
/// `versions` that has a value in the row.
pub fn format_tooltip_in<Tz: TimeZone>(
    row: &ChartRow,
    versions: &[String],
    transform: MeasurementTransform,
    labeler: &VersionLabeler,
    tz: &Tz,
) -> Vec<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut lines = vec![format_date_in(row.date, tz)];
    lines.extend(versions.iter().filter_map(|version| {
        row.get(version)
            .map(|value| format!("{}: {}", labeler.label(version), format_value(value, transform)))
    }));
    lines
}

/// `%Y-%m-%d` calendar date of `ms` in `tz`.
pub fn format_date_in<Tz: TimeZone>(ms: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_millis_opt(ms)
        .earliest()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Format a row value for display.
pub fn format_value(value: f64, transform: MeasurementTransform) -> String {
    match transform {
        MeasurementTransform::TotalDownloads => format!("{:.0}", value),
        MeasurementTransform::Percentage => format!("{:.1}%", value * 100.0),
    }
}

/// Pretty JSON for `chart`, using local calendar dates in tooltips. See [`export_json_in`].
pub fn export_json(chart: &PreparedChart, config: &ChartConfig) -> Result<String> {
    export_json_in(chart, config, &Local)
}

/// Pretty JSON for `chart`. When `config.show_tooltip` is set, a `tooltips` array holds
/// the tooltip lines of each row, in row order.
pub fn export_json_in<Tz: TimeZone>(
    chart: &PreparedChart,
    config: &ChartConfig,
    tz: &Tz,
) -> Result<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut value = serde_json::to_value(chart)?;
    if config.show_tooltip {
        let tooltips: Vec<Vec<String>> = chart
            .rows
            .iter()
            .map(|row| {
                format_tooltip_in(row, &chart.versions, chart.transform, &config.version_labeler, tz)
            })
            .collect();
        if let Some(object) = value.as_object_mut() {
            object.insert("tooltips".to_string(), serde_json::to_value(tooltips)?);
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
