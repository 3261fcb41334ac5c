use chrono::Local;
use log::debug;
use lru::LruCache;
use once_cell::sync::Lazy;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex as TokioMutex;

use super::palette::Palette;
use super::styles::{ChartStyle, ChartTheme};
use super::tooltip::format_date_in;
use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::types::{MeasurementTransform, PreparedChart};
use crate::utils::{VersionLabeler, DAY_MS};

const CACHE_TTL: Duration = Duration::from_secs(300);

// Global render cache with a 5-minute expiration
static RENDER_CACHE: Lazy<Arc<TokioMutex<LruCache<RenderCacheKey, (Vec<u8>, Instant)>>>> =
    Lazy::new(|| {
        let capacity = NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN);
        Arc::new(TokioMutex::new(LruCache::new(capacity)))
    });

/// Layout and presentation options for a rendered chart.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub show_legend: bool,
    /// Axis and tick labels; disabling them renders without any text
    pub show_labels: bool,
    pub labeler: VersionLabeler,
    pub theme: ChartTheme,
    pub style: ChartStyle,
    pub palette: Palette,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            show_legend: true,
            show_labels: true,
            labeler: VersionLabeler::Identity,
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
            palette: Palette::default(),
        }
    }
}

impl RenderOptions {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            show_legend: config.show_legend,
            labeler: config.version_labeler.clone(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Hash, Eq, PartialEq)]
struct RenderCacheKey {
    data_hash: u64,
}

impl RenderCacheKey {
    fn new(chart: &PreparedChart, options: &RenderOptions) -> Self {
        let mut hasher = DefaultHasher::new();
        chart.versions.hash(&mut hasher);
        chart.ticks.hash(&mut hasher);
        chart.transform.hash(&mut hasher);
        for row in &chart.rows {
            row.date.hash(&mut hasher);
            for version in &chart.versions {
                row.get(version).map(f64::to_bits).hash(&mut hasher);
            }
        }

        (
            options.width,
            options.height,
            options.show_legend,
            options.show_labels,
        )
            .hash(&mut hasher);
        options.labeler.labels(&chart.versions).hash(&mut hasher);
        options.theme.hash_into(&mut hasher);
        options.style.hash(&mut hasher);
        options.palette.hash_into(&mut hasher);

        Self {
            data_hash: hasher.finish(),
        }
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

/// Render `chart` as a PNG in a blocking task, memoizing the bytes for five minutes.
pub async fn render_png_async(chart: PreparedChart, options: RenderOptions) -> Result<Vec<u8>> {
    let cache_key = RenderCacheKey::new(&chart, &options);

    if let Some((png, timestamp)) = RENDER_CACHE.lock().await.get(&cache_key) {
        if timestamp.elapsed() < CACHE_TTL {
            debug!("render cache hit for {:016x}", cache_key.data_hash);
            return Ok(png.clone());
        }
    }

    let scratch_dir = std::env::temp_dir();
    let png = tokio::task::spawn_blocking(move || render_png(&chart, &options, &scratch_dir))
        .await
        .map_err(render_err)??;

    RENDER_CACHE
        .lock()
        .await
        .put(cache_key, (png.clone(), Instant::now()));

    Ok(png)
}

/// Drop every memoized render.
pub async fn clear_render_cache() {
    RENDER_CACHE.lock().await.clear();
}

/// Render `chart` through a scratch PNG in `scratch_dir` and return its bytes.
///
/// The scratch file is removed whether or not rendering succeeds.
pub(crate) fn render_png(
    chart: &PreparedChart,
    options: &RenderOptions,
    scratch_dir: &Path,
) -> Result<Vec<u8>> {
    let scratch = tempfile::Builder::new()
        .prefix("adoptstats-")
        .suffix(".png")
        .tempfile_in(scratch_dir)?;
    render_chart(chart, options, scratch.path())?;
    let bytes = std::fs::read(scratch.path())?;
    scratch.close()?;
    Ok(bytes)
}

/// Render `chart` as a stacked area PNG at `path`.
pub fn render_chart(chart: &PreparedChart, options: &RenderOptions, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    draw_chart(chart, options, &root)?;
    root.present().map_err(render_err)?;
    debug!(
        "rendered {} series over {} rows to {}",
        chart.versions.len(),
        chart.rows.len(),
        path.display()
    );
    Ok(())
}

/// Draw `chart` onto any plotters drawing area.
pub fn draw_chart<DB: DrawingBackend>(
    chart: &PreparedChart,
    options: &RenderOptions,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let theme = &options.theme;
    let style = &options.style;
    root.fill(&theme.background_color).map_err(render_err)?;

    let (x_min, x_max) = x_range(chart);
    let y_max = y_upper_bound(chart);
    let label_area = if options.show_labels {
        style.label_area_size
    } else {
        0
    };

    let mut ctx = ChartBuilder::on(root)
        .margin(style.margin)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)
        .map_err(render_err)?;

    let font_size = style.font_size as f64;
    if options.show_labels {
        let transform = chart.transform;
        ctx.configure_mesh()
            .disable_x_mesh()
            .light_line_style(TRANSPARENT)
            .bold_line_style(theme.grid_color)
            .axis_style(theme.axis_color)
            .label_style(("sans-serif", font_size).into_font().color(&theme.text_color))
            .x_label_formatter(&|_: &f64| String::new())
            .y_label_formatter(&|y: &f64| format_axis_value(*y, transform))
            .draw()
            .map_err(render_err)?;
    }

    // Vertical grid lines at the ticks
    let tick_style = ShapeStyle::from(&theme.grid_color).stroke_width(style.line_width);
    for &tick in &chart.ticks {
        let x = tick as f64;
        ctx.draw_series(std::iter::once(PathElement::new(
            vec![(x, 0.0), (x, y_max)],
            tick_style,
        )))
        .map_err(render_err)?;
    }

    // Tallest stack first so each lower series paints over the one above it
    let labels = options.labeler.labels(&chart.versions);
    let colors = options.palette.assign(&labels);
    for (i, series) in stacked_series(chart).into_iter().enumerate().rev() {
        let color = colors[i];
        let anno = ctx
            .draw_series(
                AreaSeries::new(series, 0.0, color.filled())
                    .border_style(color.stroke_width(style.line_width)),
            )
            .map_err(render_err)?;
        if options.show_legend {
            anno.label(labels[i].clone()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
            });
        }
    }

    if options.show_legend && !chart.versions.is_empty() {
        ctx.configure_series_labels()
            .background_style(theme.background_color)
            .border_style(theme.axis_color)
            .label_font(("sans-serif", font_size).into_font().color(&theme.text_color))
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(render_err)?;
    }

    if options.show_labels {
        let tick_font = ("sans-serif", font_size)
            .into_font()
            .color(&theme.text_color)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for &tick in &chart.ticks {
            let (x, y) = ctx.backend_coord(&(tick as f64, 0.0));
            root.draw(&Text::new(
                format_date_in(tick, &Local),
                (x, y + 6),
                tick_font.clone(),
            ))
            .map_err(render_err)?;
        }
    }

    Ok(())
}

/// Cumulative series for stacking: entry `i` holds, per row, the sum of versions
/// `0..=i`. Missing values count as zero.
pub(crate) fn stacked_series(chart: &PreparedChart) -> Vec<Vec<(f64, f64)>> {
    let mut running = vec![0.0; chart.rows.len()];
    chart
        .versions
        .iter()
        .map(|version| {
            chart
                .rows
                .iter()
                .zip(running.iter_mut())
                .map(|(row, acc)| {
                    *acc += row.get(version).unwrap_or(0.0);
                    (row.date as f64, *acc)
                })
                .collect()
        })
        .collect()
}

fn x_range(chart: &PreparedChart) -> (f64, f64) {
    match (chart.rows.first(), chart.rows.last()) {
        (Some(first), Some(last)) if last.date > first.date => (first.date as f64, last.date as f64),
        (Some(first), _) => (first.date as f64, (first.date + DAY_MS) as f64),
        _ => (0.0, DAY_MS as f64),
    }
}

fn y_upper_bound(chart: &PreparedChart) -> f64 {
    match chart.transform {
        MeasurementTransform::Percentage => 1.0,
        MeasurementTransform::TotalDownloads => (chart.max_row_total() * 1.1).max(1.0),
    }
}

/// Value-axis label, with K/M suffixes for large download counts.
pub fn format_axis_value(y: f64, transform: MeasurementTransform) -> String {
    match transform {
        MeasurementTransform::Percentage => format!("{:.0}%", y * 100.0),
        MeasurementTransform::TotalDownloads => {
            if y.abs() >= 1_000_000.0 {
                format!("{:.1}M", y / 1_000_000.0)
            } else if y.abs() >= 1_000.0 {
                format!("{:.1}K", y / 1_000.0)
            } else {
                format!("{:.0}", y)
            }
        }
    }
}
