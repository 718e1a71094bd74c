//! Integration tests for the forecasting path: storage, series
//! reconstruction, forecasting and backtesting end to end.

use chrono::{Duration, NaiveDate};
use studybalance_core::api::{mood_clear, mood_forecast, mood_log, mood_seed, mood_series};
use studybalance_core::{CoreError, MoodDb, MoodRecord};

fn record(date: NaiveDate, mood: f64, sleep: f64, study: f64) -> MoodRecord {
    MoodRecord {
        date: date.format("%Y-%m-%d").to_string(),
        mood,
        sleep_hours: sleep,
        study_hours: study,
    }
}

#[test]
fn sparse_logs_reconstruct_to_gap_free_history() {
    let db = MoodDb::open_memory().unwrap();
    let start: NaiveDate = "2026-06-01".parse().unwrap();
    mood_log(&db, &record(start, 2.0, 7.0, 4.0)).unwrap();
    mood_log(&db, &record(start + Duration::days(4), 4.0, 8.0, 2.0)).unwrap();

    let response = mood_series(&db, 120).unwrap();
    assert_eq!(response.history.len(), 5);
    for w in response.history.windows(2) {
        assert_eq!((w[1].date - w[0].date).num_days(), 1);
    }
    // Interior days forward-fill the Jun 1 row
    assert_eq!(response.history[2].mood, 2.0);
}

#[test]
fn cold_start_forecast_is_flat_at_last_mood() {
    let db = MoodDb::open_memory().unwrap();
    let start: NaiveDate = "2026-06-01".parse().unwrap();
    for i in 0..5 {
        mood_log(&db, &record(start + Duration::days(i), 3.7, 7.0, 3.0)).unwrap();
    }

    let response = mood_forecast(&db, 7).unwrap();
    assert_eq!(response.forecast.len(), 7);
    assert!(response.forecast.iter().all(|p| p.mood == 3.7));
}

#[test]
fn empty_store_forecast_is_neutral() {
    let db = MoodDb::open_memory().unwrap();
    let response = mood_forecast(&db, 7).unwrap();
    assert_eq!(response.forecast.len(), 7);
    assert!(response.forecast.iter().all(|p| p.mood == 3.0));
}

#[test]
fn forecast_bounds_and_consecutive_dates_on_real_history() {
    let db = MoodDb::open_memory().unwrap();
    mood_seed(&db, 30).unwrap();

    let response = mood_forecast(&db, 7).unwrap();
    assert_eq!(response.forecast.len(), 7);
    for p in &response.forecast {
        assert!(p.mood >= 1.0 && p.mood <= 5.0);
    }
    for w in response.forecast.windows(2) {
        assert_eq!((w[1].date - w[0].date).num_days(), 1);
    }
}

#[test]
fn accuracy_error_names_available_count() {
    let db = MoodDb::open_memory().unwrap();
    mood_seed(&db, 8).unwrap();

    let err = studybalance_core::api::mood_accuracy(&db, 30, 7).unwrap_err();
    match err {
        CoreError::InsufficientData(e) => {
            assert_eq!(e.required, 30);
            assert_eq!(e.available, 8);
        }
        other => panic!("expected InsufficientData, got {other}"),
    }
}

#[test]
fn accuracy_reports_both_metric_sets() {
    let db = MoodDb::open_memory().unwrap();
    mood_seed(&db, 40).unwrap();

    let report = studybalance_core::api::mood_accuracy(&db, 14, 7).unwrap();
    assert_eq!(report.samples_evaluated, report.sarimax.n);
    assert_eq!(report.sarimax.n, report.naive.n);
    assert!(report.sarimax.rmse >= report.sarimax.mae || report.sarimax.mae < 1e-9);
}

#[test]
fn clear_round_trip_leaves_empty_history() {
    let db = MoodDb::open_memory().unwrap();
    mood_seed(&db, 14).unwrap();
    mood_clear(&db).unwrap();
    assert!(mood_series(&db, 120).unwrap().history.is_empty());
}

#[test]
fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mood.db");
    {
        let db = MoodDb::open_at(&path).unwrap();
        mood_log(&db, &record("2026-06-01".parse().unwrap(), 3.5, 7.5, 2.0)).unwrap();
    }
    let db = MoodDb::open_at(&path).unwrap();
    let rows = db.load_all().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].mood, 3.5);
}

#[test]
fn year_of_history_is_served_weekly() {
    let db = MoodDb::open_memory().unwrap();
    let start: NaiveDate = "2025-01-01".parse().unwrap();
    for i in 0..365 {
        let date = start + Duration::days(i);
        mood_log(&db, &record(date, 3.0, 7.0, 3.0)).unwrap();
    }

    let response = mood_series(&db, 365).unwrap();
    assert!(!response.history.is_empty());
    assert!(response.history.len() < 365);
    for w in response.history.windows(2) {
        assert_eq!((w[1].date - w[0].date).num_days(), 7);
    }
}
