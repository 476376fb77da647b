//! Chart generation (plotters)
//!
//! Every chart is rendered into an RGB buffer and returned as PNG bytes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::AnalyzerConfig;
use crate::engine::AnnotatedEntry;
use crate::models::MacroBreakdown;
use crate::session::Session;

use super::{ToolError, ToolResult};

const COLOR_PROTEIN: RGBColor = RGBColor(0, 112, 192);
const COLOR_FAT: RGBColor = RGBColor(255, 165, 0);
const COLOR_CARBS: RGBColor = RGBColor(0, 176, 80);
const COLOR_BALANCE: RGBColor = RGBColor(192, 0, 0);
const COLOR_WEIGHT: RGBColor = RGBColor(112, 48, 160);
const COLOR_REFERENCE: RGBColor = RGBColor(128, 128, 128);

pub const MACRO_CHART_FILE: &str = "macro_breakdown.png";
pub const BALANCE_CHART_FILE: &str = "balance_trend.png";
pub const WEIGHT_CHART_FILE: &str = "weight_trend.png";

/// Labels and colour for a bar chart
#[derive(Debug, Clone)]
pub struct BarChartStyle {
    pub x_label: String,
    pub y_label: String,
    pub color: RGBColor,
}

// ============================================================================
// Series Preparation
// ============================================================================

/// Balance summed per date, in date order
pub fn balance_by_date(entries: &[AnnotatedEntry]) -> Vec<(NaiveDate, f64)> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for e in entries {
        *by_date.entry(e.entry.date).or_default() += e.balance;
    }
    by_date.into_iter().collect()
}

/// Recorded weights in date order; entries without a weight are skipped
pub fn weight_series(entries: &[AnnotatedEntry]) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = entries
        .iter()
        .filter_map(|e| e.entry.weight_kg.map(|w| (e.entry.date, w)))
        .collect();
    points.sort_by_key(|(date, _)| *date);
    points
}

/// Parse `#rrggbb`
pub fn parse_hex_color(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn short_date(date: &NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// Value range covering `values` and zero, padded so flat series still show
fn padded_range(values: impl Iterator<Item = f64>, include_zero: bool, min_pad: f64) -> (f64, f64) {
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let pad = ((hi - lo) * 0.1).max(min_pad);
    (lo - pad, hi + pad)
}

// ============================================================================
// Rendering
// ============================================================================

fn render_png<F>(width: u32, height: u32, draw: F) -> ToolResult<Vec<u8>>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), String>,
{
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| ToolError::Chart(format!("Chart size {}x{} is too large", width, height)))?;
    let mut buffer = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| ToolError::Chart(e.to_string()))?;
        draw(&root).map_err(ToolError::Chart)?;
        root.present().map_err(|e| ToolError::Chart(e.to_string()))?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ToolError::Chart("Failed to create image from buffer".to_string()))?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)?;

    Ok(png_bytes)
}

/// Pie chart of the latest entry's macronutrient calories
pub fn generate_macro_chart(
    macros: &MacroBreakdown,
    width: u32,
    height: u32,
) -> ToolResult<Vec<u8>> {
    if macros.total() <= 0.0 {
        return Err(ToolError::NoData);
    }

    let slices = macros.slices();
    let labels: Vec<&str> = slices.iter().map(|(name, _)| *name).collect();
    let sizes: Vec<f64> = slices.iter().map(|(_, kcal)| *kcal).collect();
    let colors = [COLOR_PROTEIN, COLOR_FAT, COLOR_CARBS];

    render_png(width, height, |root| {
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 18.0).into_font().color(&BLACK));
        pie.percentages(("sans-serif", radius * 0.09).into_font().color(&WHITE));
        root.draw(&pie).map_err(|e| e.to_string())
    })
}

/// Line chart of the daily balance with a zero reference line
pub fn generate_balance_chart(
    entries: &[AnnotatedEntry],
    balance_label: &str,
    width: u32,
    height: u32,
) -> ToolResult<Vec<u8>> {
    let series = balance_by_date(entries);
    if series.is_empty() {
        return Err(ToolError::NoData);
    }

    let (y_min, y_max) = padded_range(series.iter().map(|(_, b)| *b), true, 50.0);
    let n = series.len() as i32;
    let y_desc = format!("Calories ({})", balance_label);

    render_png(width, height, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(format!("{} Trend", balance_label), ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0..n, y_min..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(series.len().min(10))
            .x_label_formatter(&|x| {
                series
                    .get(*x as usize)
                    .filter(|_| *x >= 0)
                    .map(|(date, _)| short_date(date))
                    .unwrap_or_default()
            })
            .y_desc(y_desc.as_str())
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0, 0.0), (n, 0.0)],
                ShapeStyle::from(&COLOR_REFERENCE.mix(0.7)).stroke_width(1),
            )))
            .map_err(|e| e.to_string())?;

        let points: Vec<(i32, f64)> = series
            .iter()
            .enumerate()
            .map(|(i, (_, b))| (i as i32, *b))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), COLOR_BALANCE.stroke_width(2)))
            .map_err(|e| e.to_string())?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, COLOR_BALANCE.filled())),
            )
            .map_err(|e| e.to_string())?;

        Ok(())
    })
}

/// Line chart of recorded weights. `NoData` when no entry has a weight.
pub fn generate_weight_chart(
    entries: &[AnnotatedEntry],
    width: u32,
    height: u32,
) -> ToolResult<Vec<u8>> {
    let series = weight_series(entries);
    if series.is_empty() {
        return Err(ToolError::NoData);
    }

    let (y_min, y_max) = padded_range(series.iter().map(|(_, w)| *w), false, 1.0);
    let n = series.len() as i32;

    render_png(width, height, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption("Weight Trend", ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..n, y_min..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(series.len().min(10))
            .x_label_formatter(&|x| {
                series
                    .get(*x as usize)
                    .filter(|_| *x >= 0)
                    .map(|(date, _)| short_date(date))
                    .unwrap_or_default()
            })
            .y_desc("Weight (kg)")
            .draw()
            .map_err(|e| e.to_string())?;

        let points: Vec<(i32, f64)> = series
            .iter()
            .enumerate()
            .map(|(i, (_, w))| (i as i32, *w))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), COLOR_WEIGHT.stroke_width(2)))
            .map_err(|e| e.to_string())?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|(x, y)| Circle::new((*x, *y), 3, COLOR_WEIGHT.filled())),
            )
            .map_err(|e| e.to_string())?;

        Ok(())
    })
}

/// Vertical bar chart, one bar per labelled value in the given order
pub fn generate_bar_chart(
    bars: &[(String, f64)],
    style: &BarChartStyle,
    width: u32,
    height: u32,
) -> ToolResult<Vec<u8>> {
    if bars.is_empty() {
        return Err(ToolError::NoData);
    }

    let peak = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };
    let n = bars.len() as i32;

    render_png(width, height, |root| {
        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len().min(20))
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) if *i >= 0 => bars
                    .get(*i as usize)
                    .map(|(label, _)| label.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(style.color.filled())
                    .margin(2)
                    .data(bars.iter().enumerate().map(|(i, (_, v))| (i as i32, *v))),
            )
            .map_err(|e| e.to_string())?;

        Ok(())
    })
}

// ============================================================================
// Output
// ============================================================================

/// Write PNG bytes to `dir/name`
pub fn write_png(dir: &Path, name: &str, png: &[u8]) -> ToolResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, png)?;
    tracing::info!(path = %path.display(), "Chart written");
    Ok(path)
}

/// Render the session charts into the output dir.
///
/// A chart with nothing to show is skipped; the paths of the written files
/// are returned.
pub fn write_session_charts(
    session: &Session,
    config: &AnalyzerConfig,
) -> ToolResult<Vec<PathBuf>> {
    let entries = session.annotated_entries()?;
    let Some(stats) = session.statistics()? else {
        return Ok(Vec::new());
    };
    let (w, h) = (config.chart_width, config.chart_height);
    let label = session.profile().goal.balance_label();

    let charts = [
        (MACRO_CHART_FILE, generate_macro_chart(&stats.latest_macros, w, h)),
        (BALANCE_CHART_FILE, generate_balance_chart(&entries, label, w, h)),
        (WEIGHT_CHART_FILE, generate_weight_chart(&entries, w, h)),
    ];

    let mut written = Vec::new();
    for (name, result) in charts {
        match result {
            Ok(png) => written.push(write_png(&config.output_dir, name, &png)?),
            Err(ToolError::NoData) => tracing::warn!("Skipping {}: no data", name),
            Err(e) => return Err(e),
        }
    }

    Ok(written)
}
