use clap::Subcommand;
use studybalance_core::api;
use studybalance_core::{Config, MoodDb, MoodRecord};

use super::common::print_json;

#[derive(Subcommand)]
pub enum MoodAction {
    /// Upsert one day's mood log
    Log {
        /// Calendar date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Mood, 1..5
        #[arg(long)]
        mood: f64,
        /// Sleep hours, 0..24
        #[arg(long)]
        sleep: f64,
        /// Study hours, 0..24
        #[arg(long)]
        study: f64,
    },
    /// Reconstructed history over the trailing window
    Series {
        /// Trailing window in days (clamped to 7..365)
        #[arg(long)]
        days: Option<usize>,
    },
    /// Delete all mood history
    Clear,
    /// Seed demo history ending yesterday
    Seed {
        /// Days to seed (clamped to 7..60)
        #[arg(long)]
        days: Option<usize>,
    },
    /// Forecast upcoming mood
    Forecast {
        /// Days ahead to forecast
        #[arg(long)]
        horizon: Option<usize>,
    },
    /// Walk-forward backtest of the forecaster
    Accuracy {
        /// Minimum days of history required
        #[arg(long)]
        min_days: Option<usize>,
        /// Refit cadence in steps
        #[arg(long)]
        refit_every: Option<usize>,
    },
}

fn open_db(config: &Config) -> Result<MoodDb, Box<dyn std::error::Error>> {
    match &config.database_path {
        Some(path) => Ok(MoodDb::open_at(path)?),
        None => Ok(MoodDb::open()?),
    }
}

pub fn run(action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = open_db(&config)?;

    match action {
        MoodAction::Log {
            date,
            mood,
            sleep,
            study,
        } => {
            let ack = api::mood_log(
                &db,
                &MoodRecord {
                    date,
                    mood,
                    sleep_hours: sleep,
                    study_hours: study,
                },
            )?;
            print_json(&ack)
        }
        MoodAction::Series { days } => {
            let days = days.unwrap_or(config.series.default_window_days as usize);
            print_json(&api::mood_series(&db, days)?)
        }
        MoodAction::Clear => print_json(&api::mood_clear(&db)?),
        MoodAction::Seed { days } => {
            let days = days.unwrap_or(config.series.seed_days as usize);
            print_json(&api::mood_seed(&db, days)?)
        }
        MoodAction::Forecast { horizon } => {
            let horizon = horizon.unwrap_or(config.forecast.horizon_days as usize);
            print_json(&api::mood_forecast(&db, horizon)?)
        }
        MoodAction::Accuracy {
            min_days,
            refit_every,
        } => {
            let min_days = min_days.unwrap_or(config.forecast.backtest_min_days as usize);
            let refit_every =
                refit_every.unwrap_or(config.forecast.backtest_refit_every as usize);
            print_json(&api::mood_accuracy(&db, min_days, refit_every)?)
        }
    }
}
