//! Version Adoption Chart Tool
//!
//! Reads per-version download history from JSON and writes a stacked adoption chart.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use std::fs;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use adoptstats::config::clamp_version_limit;
use adoptstats::plotting::{export_json, render_png_async, RenderOptions};
use adoptstats::{load_history, prepare_chart, ChartConfig, MeasurementTransform, VersionLabeler};

#[derive(Debug, Parser)]
#[command(name = "adoptstats", version, about = "Render version adoption charts from download history")]
struct Cli {
    /// JSON array of {"date", "version", "count"} points
    #[arg(short, long)]
    input: PathBuf,

    /// JSON chart configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the chart as PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the prepared rows, ticks and versions as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Zero or negative shows nothing
    #[arg(long, allow_negative_numbers = true)]
    max_versions: Option<i64>,

    #[arg(long)]
    max_days: Option<u32>,

    #[arg(long)]
    max_ticks: Option<usize>,

    /// Show each version's share of the shown versions instead of totals
    #[arg(long)]
    percentage: bool,

    #[arg(long, value_enum)]
    labeler: Option<LabelerArg>,

    #[arg(long, default_value_t = 1200)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Render without axis labels or legend
    #[arg(long)]
    no_text: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LabelerArg {
    Identity,
    MajorMinor,
    Major,
}

impl Cli {
    fn chart_config(&self) -> anyhow::Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::load(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => ChartConfig::default(),
        };

        if let Some(n) = self.max_versions {
            config.max_versions_shown = Some(clamp_version_limit(n));
        }
        if let Some(days) = self.max_days {
            config.max_days_shown = days;
        }
        if let Some(ticks) = self.max_ticks {
            config.max_ticks = ticks;
        }
        if self.percentage {
            config.measurement_transform = MeasurementTransform::Percentage;
        }
        if let Some(labeler) = self.labeler {
            config.version_labeler = match labeler {
                LabelerArg::Identity => VersionLabeler::Identity,
                LabelerArg::MajorMinor => VersionLabeler::MajorMinor,
                LabelerArg::Major => VersionLabeler::Major,
            };
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.chart_config()?;
    let points = load_history(&cli.input)
        .with_context(|| format!("reading history {}", cli.input.display()))?;
    let chart = prepare_chart(&points, &config);
    info!(
        "{} points -> {} versions over {} dates",
        points.len(),
        chart.versions.len(),
        chart.rows.len()
    );

    if let Some(path) = &cli.json {
        fs::write(path, export_json(&chart, &config)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote prepared chart to {}", path.display());
    }

    if let Some(path) = &cli.output {
        let mut options = RenderOptions::from_config(&config);
        options.width = cli.width;
        options.height = cli.height;
        if cli.no_text {
            options.show_labels = false;
            options.show_legend = false;
        }

        let rt = Runtime::new()?;
        let png = rt.block_on(render_png_async(chart, options))?;
        fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote chart to {}", path.display());
    }

    Ok(())
}
