use std::path::Path;

use chrono::{Duration, NaiveDate};
use marketbrief_types::{Error, Result, VolumePoint, WeeklyPoint};
use plotters::prelude::*;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 1000;

const COLOR_DOCUMENTS: RGBColor = RGBColor(0x2e, 0x86, 0xab);
const COLOR_CHUNKS: RGBColor = RGBColor(0xa2, 0x3b, 0x72);
const COLOR_SENTIMENT: RGBColor = RGBColor(0xf1, 0x8f, 0x01);

/// Render the three-panel theme volume chart (documents, chunks,
/// sentiment per day, with weekly averages emphasized) to a PNG.
pub fn render_volume_chart(
    theme: &str,
    daily: &[VolumePoint],
    weekly: &[WeeklyPoint],
    path: &Path,
) -> Result<()> {
    if daily.is_empty() {
        return Err(Error::Render("no volume data to plot".to_string()));
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let root = root
        .titled(
            &format!("Theme Volume Evolution: \"{}\"", theme),
            ("sans-serif", 30),
        )
        .map_err(draw_err)?;

    let panels = root.split_evenly((3, 1));

    let dates = date_range(daily);

    draw_count_panel(
        &panels[0],
        "Unique Documents per Day",
        dates.clone(),
        daily.iter().map(|p| (p.date, p.documents as f64)).collect(),
        weekly.iter().map(|p| (p.week_start, p.documents)).collect(),
        COLOR_DOCUMENTS,
    )?;

    draw_count_panel(
        &panels[1],
        "Chunks per Day",
        dates.clone(),
        daily.iter().map(|p| (p.date, p.chunks as f64)).collect(),
        weekly.iter().map(|p| (p.week_start, p.chunks)).collect(),
        COLOR_CHUNKS,
    )?;

    draw_sentiment_panel(
        &panels[2],
        dates,
        daily.iter().map(|p| (p.date, p.sentiment)).collect(),
        weekly.iter().map(|p| (p.week_start, p.sentiment)).collect(),
    )?;

    root.present().map_err(draw_err)
}

fn draw_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

fn date_range(daily: &[VolumePoint]) -> std::ops::Range<NaiveDate> {
    let first = daily.iter().map(|p| p.date).min().unwrap_or_default();
    let last = daily.iter().map(|p| p.date).max().unwrap_or_default();
    // Pad one day so a single-day series still has a drawable axis
    first..(last + Duration::days(1))
}

fn draw_count_panel(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    title: &str,
    dates: std::ops::Range<NaiveDate>,
    daily: Vec<(NaiveDate, f64)>,
    weekly: Vec<(NaiveDate, f64)>,
    color: RGBColor,
) -> Result<()> {
    let max = daily
        .iter()
        .chain(weekly.iter())
        .map(|(_, v)| *v)
        .fold(1.0_f64, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(dates, 0.0..max * 1.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|d| d.format("%Y-%m-%d").to_string())
        .x_labels(8)
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(daily, color.mix(0.4)))
        .map_err(draw_err)?
        .label("Daily")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 16, y)], color.mix(0.4))
        });

    chart
        .draw_series(LineSeries::new(weekly.clone(), color.stroke_width(3)))
        .map_err(draw_err)?
        .label("Weekly Average")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(3)));

    chart
        .draw_series(
            weekly
                .into_iter()
                .map(|point| Circle::new(point, 4, color.filled())),
        )
        .map_err(draw_err)?;

    chart
        .configure_series_labels()
        .border_style(BLACK.mix(0.3))
        .background_style(WHITE.mix(0.9))
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

fn draw_sentiment_panel(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    dates: std::ops::Range<NaiveDate>,
    daily: Vec<(NaiveDate, f64)>,
    weekly: Vec<(NaiveDate, f64)>,
) -> Result<()> {
    let bound = daily
        .iter()
        .chain(weekly.iter())
        .map(|(_, v)| v.abs())
        .fold(0.1_f64, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Sentiment per Day", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(dates.clone(), -bound * 1.1..bound * 1.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|d| d.format("%Y-%m-%d").to_string())
        .x_labels(8)
        .draw()
        .map_err(draw_err)?;

    // Zero baseline
    chart
        .draw_series(LineSeries::new(
            vec![(dates.start, 0.0), (dates.end, 0.0)],
            BLACK.mix(0.4),
        ))
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(daily, COLOR_SENTIMENT.mix(0.4)))
        .map_err(draw_err)?
        .label("Daily")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], COLOR_SENTIMENT.mix(0.4)));

    chart
        .draw_series(LineSeries::new(
            weekly.clone(),
            COLOR_SENTIMENT.stroke_width(3),
        ))
        .map_err(draw_err)?
        .label("Weekly Average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], COLOR_SENTIMENT.stroke_width(3)));

    chart
        .draw_series(
            weekly
                .into_iter()
                .map(|point| Circle::new(point, 4, COLOR_SENTIMENT.filled())),
        )
        .map_err(draw_err)?;

    chart
        .configure_series_labels()
        .border_style(BLACK.mix(0.3))
        .background_style(WHITE.mix(0.9))
        .draw()
        .map_err(draw_err)?;

    Ok(())
}
