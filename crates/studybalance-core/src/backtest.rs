//! Expanding-window walk-forward evaluation of the mood forecaster.
//!
//! One-step-ahead predictions over a growing training window, compared
//! against a naive-1 baseline (tomorrow = today) on the same steps.
//! Parameters are re-estimated periodically rather than every step;
//! the innovation recursion still runs over the full history before
//! each step, so every prediction conditions on all prior
//! observations.

use serde::{Deserialize, Serialize};

use crate::error::{InsufficientDataError, Result};
use crate::forecast::{arima, standardize};
use crate::series::MoodSeries;

/// Error metrics over one prediction set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ErrorMetrics {
    pub n: usize,
    #[serde(rename = "MAE")]
    pub mae: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    #[serde(rename = "MAPE")]
    pub mape: f64,
    #[serde(rename = "sMAPE")]
    pub smape: f64,
}

/// Percentage improvement of the model over the naive baseline.
/// `None` when the baseline metric is zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Improvement {
    #[serde(rename = "MAE_%")]
    pub mae_pct: Option<f64>,
    #[serde(rename = "RMSE_%")]
    pub rmse_pct: Option<f64>,
    #[serde(rename = "sMAPE_%")]
    pub smape_pct: Option<f64>,
}

/// Full backtest report. Computed on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub samples_evaluated: usize,
    pub sarimax: ErrorMetrics,
    pub naive: ErrorMetrics,
    pub improvement_vs_naive: Improvement,
}

fn round_to(v: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (v * factor).round() / factor
}

/// MAE/RMSE/MAPE/sMAPE over aligned prediction/actual pairs.
/// Percentage denominators are clipped at 1e-6, mirroring the guard
/// needed for series that can touch zero (mood cannot, but the
/// metrics stay total).
pub fn error_metrics(actual: &[f64], predicted: &[f64]) -> ErrorMetrics {
    debug_assert_eq!(actual.len(), predicted.len());
    let n = actual.len();
    let nf = n.max(1) as f64;

    let mae = actual
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / nf;
    let rmse = (actual
        .iter()
        .zip(predicted)
        .map(|(t, p)| (t - p) * (t - p))
        .sum::<f64>()
        / nf)
        .sqrt();
    let mape = actual
        .iter()
        .zip(predicted)
        .map(|(t, p)| ((t - p) / t.abs().max(1e-6)).abs())
        .sum::<f64>()
        / nf
        * 100.0;
    let smape = actual
        .iter()
        .zip(predicted)
        .map(|(t, p)| 2.0 * (p - t).abs() / (t.abs() + p.abs()).max(1e-6))
        .sum::<f64>()
        / nf
        * 100.0;

    ErrorMetrics {
        n,
        mae: round_to(mae, 4),
        rmse: round_to(rmse, 4),
        mape: round_to(mape, 2),
        smape: round_to(smape, 2),
    }
}

fn improvement(model: f64, baseline: f64) -> Option<f64> {
    if baseline > 0.0 {
        Some(round_to(100.0 * (baseline - model) / baseline, 2))
    } else {
        None
    }
}

/// Walk the reconstructed series forward, refitting every
/// `refit_every` steps, and compare against the naive-1 baseline.
///
/// # Errors
/// Returns `InsufficientDataError` when fewer than `min_days` rows
/// exist, reporting required vs. available counts.
pub fn backtest_mood(
    series: &MoodSeries,
    min_days: usize,
    refit_every: usize,
) -> Result<BacktestReport> {
    if series.len() < min_days {
        return Err(InsufficientDataError {
            required: min_days,
            available: series.len(),
        }
        .into());
    }

    let y = series.moods();
    let x = standardize(&series.balance());
    let refit_every = refit_every.max(1);

    // Warm-up for the first fit
    let start = 7.max(min_days / 2);

    let mut predicted = Vec::with_capacity(y.len() - start);
    let mut actual = Vec::with_capacity(y.len() - start);
    let mut params = arima::ArimaxParams {
        phi: 0.0,
        theta: 0.0,
        beta: 0.0,
    };

    for i in start..y.len() {
        if i == start || (i - start) % refit_every == 0 {
            params = arima::fit(&y[..i], &x[..i]);
        }
        let pred = arima::one_step_ahead(&y[..i], &x[..i], x[i], &params).clamp(1.0, 5.0);
        predicted.push(pred);
        actual.push(y[i]);
    }

    // Naive-1 baseline: predict tomorrow = today's actual
    let naive_pred: Vec<f64> = y[start - 1..y.len() - 1].to_vec();
    let naive_actual: Vec<f64> = y[start..].to_vec();

    let sarimax = error_metrics(&actual, &predicted);
    let naive = error_metrics(&naive_actual, &naive_pred);

    Ok(BacktestReport {
        samples_evaluated: sarimax.n,
        sarimax,
        naive,
        improvement_vs_naive: Improvement {
            mae_pct: improvement(sarimax.mae, naive.mae),
            rmse_pct: improvement(sarimax.rmse, naive.rmse),
            smape_pct: improvement(sarimax.smape, naive.smape),
        },
    })
}
