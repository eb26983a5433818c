//! Static PNG chart artifacts rendered with `plotters`.
//!
//! Three charts per report run: grouped sentiment counts per bank, average
//! star rating per bank, and the most frequent themes across all banks.
//! Bars are drawn as rectangles on plain numeric axes; bank/theme labels
//! come from the axis formatter.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;

use bankrev_db::ThemeCountRow;

use crate::error::ReportError;
use crate::stats::BankStats;

const CHART_SIZE: (u32, u32) = (900, 600);

const POSITIVE_COLOR: RGBColor = RGBColor(46, 139, 87);
const NEUTRAL_COLOR: RGBColor = RGBColor(148, 148, 148);
const NEGATIVE_COLOR: RGBColor = RGBColor(192, 57, 43);
const RATING_COLOR: RGBColor = RGBColor(41, 98, 160);
const THEME_COLOR: RGBColor = RGBColor(94, 60, 153);

/// Locations of the rendered chart artifacts, referenced from the markdown
/// report.
#[derive(Debug, Clone)]
pub struct ChartPaths {
    pub sentiment: PathBuf,
    pub ratings: PathBuf,
    pub themes: PathBuf,
}

/// Renders all chart artifacts into `out_dir`.
///
/// # Errors
///
/// Returns [`ReportError::Chart`] if any drawing operation fails.
pub fn render_charts(
    stats: &[BankStats],
    overall_themes: &[ThemeCountRow],
    out_dir: &Path,
) -> Result<ChartPaths, ReportError> {
    let paths = ChartPaths {
        sentiment: out_dir.join("sentiment_distribution.png"),
        ratings: out_dir.join("average_rating.png"),
        themes: out_dir.join("top_themes.png"),
    };

    render_sentiment_chart(stats, &paths.sentiment)?;
    render_rating_chart(stats, &paths.ratings)?;
    render_theme_chart(overall_themes, &paths.themes)?;

    Ok(paths)
}

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

#[allow(clippy::cast_precision_loss)]
fn render_sentiment_chart(stats: &[BankStats], path: &Path) -> Result<(), ReportError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let y_max = stats
        .iter()
        .map(|s| s.positive.max(s.neutral).max(s.negative))
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.1;
    let x_max = stats.len().max(1) as f64;
    let labels: Vec<String> = stats.iter().map(|s| s.code.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment Distribution by Bank", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(stats.len().max(1))
        .x_label_formatter(&|x| bar_label(&labels, *x))
        .y_desc("Reviews")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(stats.iter().enumerate().map(|(i, s)| {
            let x0 = i as f64 + 0.10;
            Rectangle::new([(x0, 0.0), (x0 + 0.22, s.positive as f64)], POSITIVE_COLOR.filled())
        }))
        .map_err(chart_err)?
        .label("positive")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], POSITIVE_COLOR.filled()));

    chart
        .draw_series(stats.iter().enumerate().map(|(i, s)| {
            let x0 = i as f64 + 0.39;
            Rectangle::new([(x0, 0.0), (x0 + 0.22, s.neutral as f64)], NEUTRAL_COLOR.filled())
        }))
        .map_err(chart_err)?
        .label("neutral")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], NEUTRAL_COLOR.filled()));

    chart
        .draw_series(stats.iter().enumerate().map(|(i, s)| {
            let x0 = i as f64 + 0.68;
            Rectangle::new([(x0, 0.0), (x0 + 0.22, s.negative as f64)], NEGATIVE_COLOR.filled())
        }))
        .map_err(chart_err)?
        .label("negative")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], NEGATIVE_COLOR.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn render_rating_chart(stats: &[BankStats], path: &Path) -> Result<(), ReportError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let x_max = stats.len().max(1) as f64;
    let labels: Vec<String> = stats.iter().map(|s| s.code.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Rating by Bank", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..5.5f64)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(stats.len().max(1))
        .x_label_formatter(&|x| bar_label(&labels, *x))
        .y_desc("Stars")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(stats.iter().enumerate().map(|(i, s)| {
            let avg = s
                .average_rating
                .and_then(|d| d.to_f64())
                .unwrap_or(0.0);
            let x0 = i as f64 + 0.25;
            Rectangle::new([(x0, 0.0), (x0 + 0.5, avg)], RATING_COLOR.filled())
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn render_theme_chart(themes: &[ThemeCountRow], path: &Path) -> Result<(), ReportError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let y_max = themes.iter().map(|t| t.count).max().unwrap_or(0).max(1) as f64 * 1.1;
    let x_max = themes.len().max(1) as f64;
    let labels: Vec<String> = themes.iter().map(|t| t.theme.clone()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Themes Across All Banks", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(themes.len().max(1))
        .x_label_formatter(&|x| bar_label(&labels, *x))
        .y_desc("Mentions")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(themes.iter().enumerate().map(|(i, t)| {
            let x0 = i as f64 + 0.15;
            Rectangle::new([(x0, 0.0), (x0 + 0.7, t.count as f64)], THEME_COLOR.filled())
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Maps an axis position back to the label of the bar drawn in that unit
/// interval. Positions past the last bar render as empty labels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_label(labels: &[String], x: f64) -> String {
    if x < 0.0 {
        return String::new();
    }
    let idx = x.floor() as usize;
    labels.get(idx).cloned().unwrap_or_default()
}
