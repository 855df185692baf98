use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;

/// Envelope of the volume search response.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeReport {
    #[serde(default)]
    pub metadata: VolumeMetadata,
    pub results: VolumeResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeMetadata {
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeResults {
    #[serde(default)]
    pub total: VolumeTotals,
    #[serde(default)]
    pub volume: Vec<VolumePoint>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct VolumeTotals {
    #[serde(default)]
    pub documents: u64,
    #[serde(default)]
    pub chunks: u64,
}

/// One day of theme activity.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub documents: u64,
    pub chunks: u64,
    pub sentiment: f64,
}

/// Weekly averages of the daily series, anchored on Monday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyPoint {
    pub week_start: NaiveDate,
    pub documents: f64,
    pub chunks: f64,
    pub sentiment: f64,
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Collapse a daily series into per-week averages.
///
/// Output is ordered by week start. Weeks with a single sample average
/// to that sample; the input need not be contiguous.
pub fn weekly_averages(points: &[VolumePoint]) -> Vec<WeeklyPoint> {
    let mut weeks: Vec<(NaiveDate, Vec<&VolumePoint>)> = Vec::new();

    for point in points {
        let week_start = monday_of(point.date);
        match weeks.iter_mut().find(|(start, _)| *start == week_start) {
            Some((_, bucket)) => bucket.push(point),
            None => weeks.push((week_start, vec![point])),
        }
    }

    weeks.sort_by_key(|(start, _)| *start);

    weeks
        .into_iter()
        .map(|(week_start, bucket)| {
            let n = bucket.len() as f64;
            WeeklyPoint {
                week_start,
                documents: bucket.iter().map(|p| p.documents as f64).sum::<f64>() / n,
                chunks: bucket.iter().map(|p| p.chunks as f64).sum::<f64>() / n,
                sentiment: bucket.iter().map(|p| p.sentiment).sum::<f64>() / n,
            }
        })
        .collect()
}
