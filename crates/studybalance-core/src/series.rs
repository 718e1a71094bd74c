//! Mood series reconstruction.
//!
//! Stored logs are sparse: dates the user never logged simply have no
//! row. Reconstruction reindexes to one row per calendar day between
//! the earliest and latest stored date, fills gaps by forward-fill
//! then backward-fill (so only genuinely leading gaps borrow the first
//! valid value), optionally truncates to a trailing window, and
//! downsamples long histories to weekly means.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::storage::StoredMood;

/// Histories longer than this many rows are resampled to weekly means.
pub const RESAMPLE_THRESHOLD: usize = 180;

/// Row granularity of a reconstructed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Weekly,
}

/// One reconstructed row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub mood: f64,
    pub sleep_hours: f64,
    pub study_hours: f64,
}

/// A gap-free, date-ordered mood series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSeries {
    pub points: Vec<SeriesPoint>,
    pub granularity: Granularity,
}

impl MoodSeries {
    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            granularity: Granularity::Daily,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    pub fn moods(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mood).collect()
    }

    /// The raw (sleep − study) balance per row.
    pub fn balance(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.sleep_hours - p.study_hours)
            .collect()
    }
}

/// Reindex stored rows to a complete daily calendar, fill gaps, apply
/// the optional trailing window, and downsample long histories.
///
/// `last_days` is measured against the reconstructed calendar, not the
/// set of rows actually logged. An empty store yields an explicitly
/// empty series.
pub fn reconstruct(records: &[StoredMood], last_days: Option<usize>) -> MoodSeries {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return MoodSeries::empty();
    };

    let span_days = (last.date - first.date).num_days() + 1;
    let mut dates = Vec::with_capacity(span_days as usize);
    let mut mood: Vec<Option<f64>> = Vec::with_capacity(span_days as usize);
    let mut sleep: Vec<Option<f64>> = Vec::with_capacity(span_days as usize);
    let mut study: Vec<Option<f64>> = Vec::with_capacity(span_days as usize);

    let mut iter = records.iter().peekable();
    let mut date = first.date;
    while date <= last.date {
        let row = iter.next_if(|r| r.date == date);
        dates.push(date);
        mood.push(row.map(|r| r.mood));
        sleep.push(row.map(|r| r.sleep_hours));
        study.push(row.map(|r| r.study_hours));
        date += Duration::days(1);
    }

    ffill_then_bfill(&mut mood);
    ffill_then_bfill(&mut sleep);
    ffill_then_bfill(&mut study);

    let mut points: Vec<SeriesPoint> = dates
        .into_iter()
        .zip(mood)
        .zip(sleep)
        .zip(study)
        .map(|(((date, m), sl), st)| SeriesPoint {
            date,
            // Unwraps cannot fail: at least one record exists, so the
            // fills leave no None behind.
            mood: m.unwrap_or(0.0),
            sleep_hours: sl.unwrap_or(0.0),
            study_hours: st.unwrap_or(0.0),
        })
        .collect();

    if let Some(n) = last_days {
        if points.len() > n {
            points.drain(..points.len() - n);
        }
    }

    if points.len() > RESAMPLE_THRESHOLD {
        return resample_weekly(&points);
    }

    MoodSeries {
        points,
        granularity: Granularity::Daily,
    }
}

/// Forward-fill then backward-fill. Forward-fill must run first so
/// that only leading gaps receive backward-filled values.
fn ffill_then_bfill(values: &mut [Option<f64>]) {
    let mut last_seen = None;
    for v in values.iter_mut() {
        match v {
            Some(x) => last_seen = Some(*x),
            None => *v = last_seen,
        }
    }
    let mut next_seen = None;
    for v in values.iter_mut().rev() {
        match v {
            Some(x) => next_seen = Some(*x),
            None => *v = next_seen,
        }
    }
}

/// The Sunday ending the week containing `date` (weeks run Mon..Sun).
fn week_label(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - i64::from(date.weekday().num_days_from_monday());
    date + Duration::days(days_to_sunday)
}

/// Aggregate a daily series to weekly means, linearly interpolating
/// any weeks left without data (cannot happen on a gap-free input;
/// kept so the resampler is total).
fn resample_weekly(points: &[SeriesPoint]) -> MoodSeries {
    let first_week = week_label(points[0].date);
    let last_week = week_label(points[points.len() - 1].date);
    let n_weeks = ((last_week - first_week).num_days() / 7 + 1) as usize;

    let mut mood: Vec<Option<f64>> = vec![None; n_weeks];
    let mut sleep: Vec<Option<f64>> = vec![None; n_weeks];
    let mut study: Vec<Option<f64>> = vec![None; n_weeks];
    let mut counts = vec![0usize; n_weeks];
    let mut sums = vec![[0.0f64; 3]; n_weeks];

    for p in points {
        let idx = ((week_label(p.date) - first_week).num_days() / 7) as usize;
        counts[idx] += 1;
        sums[idx][0] += p.mood;
        sums[idx][1] += p.sleep_hours;
        sums[idx][2] += p.study_hours;
    }
    for i in 0..n_weeks {
        if counts[i] > 0 {
            let n = counts[i] as f64;
            mood[i] = Some(sums[i][0] / n);
            sleep[i] = Some(sums[i][1] / n);
            study[i] = Some(sums[i][2] / n);
        }
    }

    interpolate_both(&mut mood);
    interpolate_both(&mut sleep);
    interpolate_both(&mut study);

    let points = (0..n_weeks)
        .map(|i| SeriesPoint {
            date: first_week + Duration::days(7 * i as i64),
            mood: mood[i].unwrap_or(0.0),
            sleep_hours: sleep[i].unwrap_or(0.0),
            study_hours: study[i].unwrap_or(0.0),
        })
        .collect();

    MoodSeries {
        points,
        granularity: Granularity::Weekly,
    }
}

/// Linear interpolation between known values, with edge gaps extended
/// from the nearest known value (both directions).
fn interpolate_both(values: &mut [Option<f64>]) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|_| i))
        .collect();
    if known.is_empty() {
        return;
    }

    for w in known.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (va, vb) = (values[a].unwrap_or(0.0), values[b].unwrap_or(0.0));
        for i in a + 1..b {
            let t = (i - a) as f64 / (b - a) as f64;
            values[i] = Some(va + t * (vb - va));
        }
    }

    let first = known[0];
    let last = known[known.len() - 1];
    for i in 0..first {
        values[i] = values[first];
    }
    for i in last + 1..values.len() {
        values[i] = values[last];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(date: &str, mood: f64) -> StoredMood {
        StoredMood {
            date: date.parse().unwrap(),
            mood,
            sleep_hours: 7.0,
            study_hours: 3.0,
        }
    }

    #[test]
    fn empty_store_yields_empty_series() {
        let series = reconstruct(&[], None);
        assert!(series.is_empty());
        assert_eq!(series.granularity, Granularity::Daily);
    }

    #[test]
    fn gap_days_are_forward_filled() {
        let records = vec![stored("2026-03-01", 2.0), stored("2026-03-04", 4.0)];
        let series = reconstruct(&records, None);
        assert_eq!(series.len(), 4);
        assert_eq!(series.points[1].mood, 2.0);
        assert_eq!(series.points[2].mood, 2.0);
        assert_eq!(series.points[3].mood, 4.0);
    }

    #[test]
    fn no_gaps_after_reconstruction() {
        let records = vec![
            stored("2026-03-01", 2.0),
            stored("2026-03-05", 3.0),
            stored("2026-03-09", 4.0),
        ];
        let series = reconstruct(&records, None);
        for w in series.points.windows(2) {
            assert_eq!((w[1].date - w[0].date).num_days(), 1);
        }
    }

    #[test]
    fn last_days_truncates_reconstructed_calendar() {
        let records = vec![stored("2026-03-01", 2.0), stored("2026-03-10", 4.0)];
        let series = reconstruct(&records, Some(3));
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[0].date.to_string(), "2026-03-08");
    }

    #[test]
    fn long_history_resampled_weekly() {
        let records = vec![stored("2025-01-01", 2.0), stored("2025-12-31", 4.0)];
        let series = reconstruct(&records, None);
        assert_eq!(series.granularity, Granularity::Weekly);
        for w in series.points.windows(2) {
            assert_eq!((w[1].date - w[0].date).num_days(), 7);
        }
        // Week labels are Sundays
        assert_eq!(
            series.points[0].date.weekday(),
            chrono::Weekday::Sun
        );
    }

    #[test]
    fn weekly_mean_of_constant_series_is_constant() {
        let records = vec![stored("2025-01-01", 3.0), stored("2025-09-01", 3.0)];
        let series = reconstruct(&records, None);
        assert_eq!(series.granularity, Granularity::Weekly);
        assert!(series.points.iter().all(|p| (p.mood - 3.0).abs() < 1e-9));
    }

    #[test]
    fn interpolation_fills_interior_and_edges() {
        let mut values = vec![None, Some(1.0), None, None, Some(4.0), None];
        interpolate_both(&mut values);
        assert_eq!(values[0], Some(1.0));
        assert_eq!(values[2], Some(2.0));
        assert_eq!(values[3], Some(3.0));
        assert_eq!(values[5], Some(4.0));
    }
}
