//! Short-horizon mood forecasting.
//!
//! Fits an ARIMAX(1,1,1) on the reconstructed mood series with a
//! standardized (sleep − study) balance regressor, and projects
//! forward holding the regressor at its last observed value. With
//! fewer than seven observed rows the forecaster falls back to a flat
//! line at the last observed mood.

pub mod arima;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::series::MoodSeries;

/// Minimum rows before the model path is used.
pub const MIN_MODEL_ROWS: usize = 7;

/// Default projection horizon in days.
pub const DEFAULT_HORIZON_DAYS: usize = 7;

/// A single forecasted day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub mood: f64,
}

/// Standardize the balance regressor to zero mean, unit variance.
/// The small denominator guard keeps a constant regressor finite.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    if values.is_empty() {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = if values.len() > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    let denom = var.sqrt() + 1e-6;
    values.iter().map(|v| (v - mean) / denom).collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Forecast `horizon_days` consecutive days of mood.
///
/// `today` anchors the cold-start path, whose dates start tomorrow;
/// the model path starts the day after the last observed date. Every
/// point is clamped to [1.0, 5.0] and rounded to 2dp.
pub fn forecast_mood(series: &MoodSeries, horizon_days: usize, today: NaiveDate) -> Vec<ForecastPoint> {
    if series.len() < MIN_MODEL_ROWS {
        let base = series.points.last().map_or(3.0, |p| p.mood);
        let start = today + Duration::days(1);
        return (0..horizon_days)
            .map(|i| ForecastPoint {
                date: start + Duration::days(i as i64),
                mood: round2(base),
            })
            .collect();
    }

    let y = series.moods();
    let x = standardize(&series.balance());
    let params = arima::fit(&y, &x);

    let x_last = x[x.len() - 1];
    let projected = arima::forecast(&y, &x, &params, x_last, horizon_days);

    // Model path dates continue the observed calendar.
    let start = series.last_date().unwrap_or(today) + Duration::days(1);
    projected
        .into_iter()
        .enumerate()
        .map(|(i, mood)| ForecastPoint {
            date: start + Duration::days(i as i64),
            mood: round2(mood.clamp(1.0, 5.0)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{Granularity, MoodSeries, SeriesPoint};

    fn series_of(moods: &[f64]) -> MoodSeries {
        let start: NaiveDate = "2026-04-01".parse().unwrap();
        MoodSeries {
            points: moods
                .iter()
                .enumerate()
                .map(|(i, &m)| SeriesPoint {
                    date: start + Duration::days(i as i64),
                    mood: m,
                    sleep_hours: 7.0,
                    study_hours: 3.0,
                })
                .collect(),
            granularity: Granularity::Daily,
        }
    }

    fn today() -> NaiveDate {
        "2026-04-20".parse().unwrap()
    }

    #[test]
    fn empty_store_forecasts_neutral_flat_line() {
        let fc = forecast_mood(&MoodSeries::empty(), 7, today());
        assert_eq!(fc.len(), 7);
        assert!(fc.iter().all(|p| p.mood == 3.0));
        assert_eq!(fc[0].date.to_string(), "2026-04-21");
    }

    #[test]
    fn short_history_repeats_last_mood() {
        let fc = forecast_mood(&series_of(&[2.0, 2.5, 4.1]), 7, today());
        assert_eq!(fc.len(), 7);
        assert!(fc.iter().all(|p| p.mood == 4.1));
    }

    #[test]
    fn model_path_dates_follow_last_observation() {
        let fc = forecast_mood(&series_of(&[3.0; 10]), 7, today());
        // 10 observed days from Apr 1 end Apr 10; forecast starts Apr 11.
        assert_eq!(fc[0].date.to_string(), "2026-04-11");
        for w in fc.windows(2) {
            assert_eq!((w[1].date - w[0].date).num_days(), 1);
        }
    }

    #[test]
    fn forecasts_are_clamped_and_rounded() {
        let moods: Vec<f64> = (0..20).map(|i| (1.0 + 0.3 * f64::from(i)).min(5.0)).collect();
        let fc = forecast_mood(&series_of(&moods), 7, today());
        assert_eq!(fc.len(), 7);
        for p in fc {
            assert!(p.mood >= 1.0 && p.mood <= 5.0);
            assert!((p.mood * 100.0 - (p.mood * 100.0).round()).abs() < 1e-9);
        }
    }

    #[test]
    fn standardize_zero_mean() {
        let z = standardize(&[1.0, 2.0, 3.0, 4.0]);
        let mean: f64 = z.iter().sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-9);
    }

    #[test]
    fn standardize_constant_series_is_finite() {
        let z = standardize(&[4.0; 10]);
        assert!(z.iter().all(|v| v.is_finite()));
        assert!(z.iter().all(|v| v.abs() < 1e-9));
    }
}
