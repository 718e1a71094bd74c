//! Boundary operations.
//!
//! Transport-agnostic entry points mirroring the external interface:
//! classification and planning over a submitted week, and the mood
//! store operations (log, series, clear, seed, forecast, accuracy).
//! A server or CLI front-end serializes these responses as-is.

use chrono::{Duration, Local, NaiveDate};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::backtest::{backtest_mood, BacktestReport};
use crate::cluster::{BalanceLabel, Classification, ClusterModel};
use crate::error::Result;
use crate::forecast::{forecast_mood, ForecastPoint};
use crate::log::{DailyLog, WeekFeatures};
use crate::plan::{plan_for_label, WeekPlan};
use crate::series::reconstruct;
use crate::storage::{MoodDb, MoodRecord};

/// Simple acknowledgement payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl Ack {
    fn ok() -> Self {
        Self { ok: true, msg: None }
    }

    fn with_msg(msg: impl Into<String>) -> Self {
        Self {
            ok: true,
            msg: Some(msg.into()),
        }
    }
}

/// Liveness check.
pub fn health() -> Ack {
    Ack::ok()
}

/// Classify a submitted week of daily logs.
pub fn classify_week(model: &ClusterModel, week: &[DailyLog]) -> Result<Classification> {
    let features = WeekFeatures::from_logs(week)?;
    Ok(model.classify(&features))
}

/// Classification plus synthesized daily plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub label: BalanceLabel,
    pub plan: WeekPlan,
}

/// Classify a week and synthesize its study/rest plan.
pub fn plan_week(model: &ClusterModel, week: &[DailyLog]) -> Result<PlanResponse> {
    let features = WeekFeatures::from_logs(week)?;
    let label = model.classify(&features).label;
    Ok(PlanResponse {
        label,
        plan: plan_for_label(label, week),
    })
}

/// Upsert one mood log row.
pub fn mood_log(db: &MoodDb, record: &MoodRecord) -> Result<Ack> {
    db.upsert(record)?;
    Ok(Ack::ok())
}

/// Delete all mood history.
pub fn mood_clear(db: &MoodDb) -> Result<Ack> {
    db.clear()?;
    Ok(Ack::with_msg("cleared"))
}

/// One row of reconstructed history, rounded for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub mood: f64,
    pub sleep_hours: f64,
    pub study_hours: f64,
}

/// Reconstructed history response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub history: Vec<HistoryPoint>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// The reconstructed series over the trailing `days` window
/// (clamped to [7, 365]). Empty history when nothing is stored.
pub fn mood_series(db: &MoodDb, days: usize) -> Result<SeriesResponse> {
    let days = days.clamp(7, 365);
    let records = db.load_all()?;
    let series = reconstruct(&records, Some(days));
    Ok(SeriesResponse {
        history: series
            .points
            .iter()
            .map(|p| HistoryPoint {
                date: p.date,
                mood: round2(p.mood),
                sleep_hours: round2(p.sleep_hours),
                study_hours: round2(p.study_hours),
            })
            .collect(),
    })
}

/// Forecast response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub forecast: Vec<ForecastPoint>,
}

/// Forecast the next `horizon_days` of mood from the full stored
/// history. The boundary default is [`crate::forecast::DEFAULT_HORIZON_DAYS`].
pub fn mood_forecast(db: &MoodDb, horizon_days: usize) -> Result<ForecastResponse> {
    let records = db.load_all()?;
    let series = reconstruct(&records, None);
    let today = Local::now().date_naive();
    Ok(ForecastResponse {
        forecast: forecast_mood(&series, horizon_days, today),
    })
}

/// Backtest the forecaster against stored history.
pub fn mood_accuracy(db: &MoodDb, min_days: usize, refit_every: usize) -> Result<BacktestReport> {
    let records = db.load_all()?;
    let series = reconstruct(&records, None);
    backtest_mood(&series, min_days, refit_every)
}

/// Box–Muller standard normal sample scaled to `sd`.
fn normal(rng: &mut impl Rng, sd: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    sd * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Seed the trailing `days` (clamped to [7, 60], ending yesterday)
/// with plausible demo records: sleep and study oscillate gently with
/// noise, and mood loosely follows the sleep/study balance.
pub fn mood_seed(db: &MoodDb, days: usize) -> Result<Ack> {
    let days = days.clamp(7, 60);
    let today = Local::now().date_naive();
    let mut rng = Mcg128Xsl64::from_entropy();

    for i in (1..=days).rev() {
        let date = today - Duration::days(i as i64);
        let fi = i as f64;
        let sleep = (7.2 + (fi / 3.0).sin() * 0.5 + normal(&mut rng, 0.15)).clamp(0.0, 24.0);
        let study = (3.5 + (fi / 4.0).cos() + normal(&mut rng, 0.3)).clamp(0.0, 24.0);
        let balance = sleep - study * 0.35;
        let mood = (3.0 + (balance - 5.0) * 0.4 + normal(&mut rng, 0.15)).clamp(1.0, 5.0);
        db.upsert(&MoodRecord {
            date: date.format("%Y-%m-%d").to_string(),
            mood,
            sleep_hours: sleep,
            study_hours: study,
        })?;
    }
    Ok(Ack::with_msg(format!("seeded {days} days")))
}
