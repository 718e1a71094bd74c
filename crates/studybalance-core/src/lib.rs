//! # Studybalance Core Library
//!
//! Core business logic for the study–stress balancer. Two independent
//! pipelines share no runtime state:
//!
//! - **Classification**: a week of daily logs is aggregated into a
//!   fixed feature vector, assigned to one of three frozen clusters
//!   (Overloaded / Balanced / Relaxed), and turned into a daily
//!   study/sleep/recovery plan by a rule engine.
//! - **Forecasting**: mood logs persist in SQLite, are reconstructed
//!   onto a gap-free calendar, and feed a regression-augmented
//!   ARIMA(1,1,1) forecaster with walk-forward backtesting.
//!
//! ## Key Components
//!
//! - [`ClusterModel`]: seeded, frozen balance classifier
//! - [`plan_for_label`]: rule-based plan synthesis
//! - [`MoodDb`]: mood log persistence
//! - [`forecast_mood`] / [`backtest_mood`]: forecasting pipeline
//!
//! The boundary operations in [`api`] are transport-agnostic; a CLI
//! or HTTP front-end serializes their responses directly.

pub mod api;
pub mod backtest;
pub mod cluster;
pub mod error;
pub mod forecast;
pub mod log;
pub mod plan;
pub mod series;
pub mod storage;

pub use backtest::{backtest_mood, BacktestReport, ErrorMetrics};
pub use cluster::{BalanceLabel, Classification, ClusterModel};
pub use error::{ConfigError, CoreError, DatabaseError, InsufficientDataError, ValidationError};
pub use forecast::{forecast_mood, ForecastPoint};
pub use log::{DailyLog, WeekFeatures, FEATURE_NAMES};
pub use plan::{plan_for_label, DayPlan, PomodoroBlock, WeekPlan};
pub use series::{reconstruct, Granularity, MoodSeries, SeriesPoint};
pub use storage::{Config, MoodDb, MoodRecord, StoredMood};
