use std::io::Read;
use std::path::PathBuf;

use serde::Deserialize;
use studybalance_core::DailyLog;

/// Week payload accepted by `classify` and `plan`:
/// `{"logs": [{"date": ..., "study_hours": ...}, ...]}`.
#[derive(Debug, Deserialize)]
pub struct WeekInput {
    pub logs: Vec<DailyLog>,
}

/// Read the week JSON from a file, or stdin when no path is given.
pub fn read_week(path: Option<&PathBuf>) -> Result<WeekInput, Box<dyn std::error::Error>> {
    let raw = match path {
        Some(p) => std::fs::read_to_string(p)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Print any serializable response as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
