use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use marketbrief_api::DataClient;
use marketbrief_report::{chart_png_name, render_volume_chart};
use marketbrief_types::weekly_averages;

const API_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The theme volume flow: one search request, weekly aggregation, and
/// the three-panel PNG chart.
pub fn handle(
    start_date: &str,
    end_date: &str,
    theme: &str,
    data_base_url: &str,
    output_dir: &Path,
) -> Result<()> {
    let api_key = marketbrief_api::bigdata_api_key()?;
    let (start, end) = api_range(start_date, end_date)?;

    println!(
        "Fetching volume for theme '{}' from {} to {}",
        theme, start, end
    );

    let report = DataClient::new(api_key, data_base_url.to_string()).fetch_volume(theme, &start, &end)?;

    if let Some(request_id) = &report.metadata.request_id {
        println!("Request ID: {}", request_id);
    }
    println!("Total documents: {}", report.results.total.documents);
    println!("Total chunks: {}", report.results.total.chunks);
    println!("Days in response: {}", report.results.volume.len());

    if report.results.volume.is_empty() {
        println!("No volume data available to visualize");
        return Ok(());
    }

    let weekly = weekly_averages(&report.results.volume);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let path = output_dir.join(chart_png_name(theme));
    render_volume_chart(theme, &report.results.volume, &weekly, &path)?;

    println!("Chart saved as: {}", path.display());
    Ok(())
}

/// Expand the two date arguments into the API's timestamp format.
///
/// A date-only start means start of day; a date-only end (or an
/// explicit midnight) means end of day, so a single-day range still
/// covers the full day.
fn api_range(start_arg: &str, end_arg: &str) -> Result<(String, String)> {
    let start = parse_date_arg(start_arg)?;
    let mut end = parse_date_arg(end_arg)?;

    if end.time() == NaiveTime::MIN {
        end = end
            .with_hour(23)
            .and_then(|t| t.with_minute(59))
            .and_then(|t| t.with_second(59))
            .unwrap_or(end);
    }

    if start >= end {
        bail!(
            "start date ({}) must be before end date ({})",
            start_arg,
            end_arg
        );
    }

    Ok((
        start.format(API_TIME_FORMAT).to_string(),
        end.format(API_TIME_FORMAT).to_string(),
    ))
}

fn parse_date_arg(value: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    bail!(
        "unable to parse date '{}'; expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ",
        value
    )
}
