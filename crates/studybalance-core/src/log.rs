//! Daily wellbeing logs and weekly feature aggregation.
//!
//! A week of [`DailyLog`] entries reduces to a fixed 6-dimensional
//! [`WeekFeatures`] vector that the balance classifier consumes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// One self-reported day: study/sleep/class hours, deadline count,
/// mood and whether the user exercised.
///
/// The date is kept as the submitted string so plans can echo it back
/// untouched; only the mood store parses dates strictly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: String,
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub deadlines: u32,
    pub classes_hours: f64,
    #[serde(default = "default_mood")]
    pub mood: f64,
    #[serde(default)]
    pub exercised: bool,
}

fn default_mood() -> f64 {
    3.0
}

impl DailyLog {
    /// Check every bounded field against its declared range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("study_hours", self.study_hours, 0.0, 24.0)?;
        check_range("sleep_hours", self.sleep_hours, 0.0, 24.0)?;
        check_range("classes_hours", self.classes_hours, 0.0, 24.0)?;
        check_range("mood", self.mood, 1.0, 5.0)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, lo: f64, hi: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("{value} is outside [{lo}, {hi}]"),
        });
    }
    Ok(())
}

/// Names of the six aggregate features, in vector order.
pub const FEATURE_NAMES: [&str; 6] = [
    "study_total",
    "sleep_avg",
    "deadlines_7d",
    "classes_total",
    "mood_avg",
    "exercise_days",
];

/// Fixed 6-dimensional aggregate of one week of daily logs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeekFeatures {
    pub study_total: f64,
    pub sleep_avg: f64,
    pub deadlines_7d: f64,
    pub classes_total: f64,
    pub mood_avg: f64,
    pub exercise_days: f64,
}

impl WeekFeatures {
    /// Aggregate an ordered, non-empty week of logs.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyCollection` for an empty week,
    /// a range error for any out-of-bounds field, and
    /// `ValidationError::NonFiniteFeature` if any derived scalar is
    /// NaN or infinite (unreachable under the field bounds, kept as a
    /// guard against degenerate inputs).
    pub fn from_logs(logs: &[DailyLog]) -> Result<Self> {
        if logs.is_empty() {
            return Err(ValidationError::EmptyCollection("week logs".to_string()).into());
        }
        for log in logs {
            log.validate()?;
        }

        let n = logs.len() as f64;
        let features = Self {
            study_total: logs.iter().map(|d| d.study_hours).sum(),
            sleep_avg: logs.iter().map(|d| d.sleep_hours).sum::<f64>() / n,
            deadlines_7d: logs.iter().map(|d| f64::from(d.deadlines)).sum(),
            classes_total: logs.iter().map(|d| d.classes_hours).sum(),
            mood_avg: logs.iter().map(|d| d.mood).sum::<f64>() / n,
            exercise_days: logs.iter().filter(|d| d.exercised).count() as f64,
        };

        if features.as_array().iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFiniteFeature.into());
        }
        Ok(features)
    }

    /// The vector in `FEATURE_NAMES` order.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.study_total,
            self.sleep_avg,
            self.deadlines_7d,
            self.classes_total,
            self.mood_avg,
            self.exercise_days,
        ]
    }

    pub fn from_array(v: [f64; 6]) -> Self {
        Self {
            study_total: v[0],
            sleep_avg: v[1],
            deadlines_7d: v[2],
            classes_total: v[3],
            mood_avg: v[4],
            exercise_days: v[5],
        }
    }

    /// Copy with every component rounded to 2 decimal places, for
    /// echoing back in responses.
    pub fn rounded(&self) -> Self {
        let mut v = self.as_array();
        for x in &mut v {
            *x = (*x * 100.0).round() / 100.0;
        }
        Self::from_array(v)
    }
}
