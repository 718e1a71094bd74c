//! Rule-based daily plan synthesis.
//!
//! Converts a balance label plus the raw week of logs into per-day
//! sleep targets, capped study targets, pomodoro block layouts and a
//! short prioritized recommendation list. Pure: no clocks, no storage.

use serde::{Deserialize, Serialize};

use crate::cluster::BalanceLabel;
use crate::log::DailyLog;

/// Per-label planning policy.
#[derive(Debug, Clone, Copy)]
struct PlanPolicy {
    sleep_target_hours: f64,
    max_study_hours: f64,
    add_recovery_block: bool,
}

fn policy_for(label: BalanceLabel) -> PlanPolicy {
    match label {
        BalanceLabel::Overloaded => PlanPolicy {
            sleep_target_hours: 7.5,
            max_study_hours: 4.5,
            add_recovery_block: true,
        },
        BalanceLabel::Balanced => PlanPolicy {
            sleep_target_hours: 7.0,
            max_study_hours: 5.5,
            add_recovery_block: false,
        },
        BalanceLabel::Relaxed => PlanPolicy {
            sleep_target_hours: 7.5,
            max_study_hours: 4.0,
            add_recovery_block: false,
        },
    }
}

const RECOVERY_ITEMS: [&str; 3] = [
    "20-min walk",
    "2× 4-7-8 breathing",
    "No screens 30 min before bed",
];
const MAX_RECOMMENDATIONS: usize = 4;

/// One work/break segment of a pomodoro layout, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroBlock {
    pub study_min: u32,
    pub break_min: u32,
}

/// Plan for a single day, echoing the submitted date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: String,
    pub sleep_target_hours: f64,
    pub study_target_hours: f64,
    pub pomodoro: Vec<PomodoroBlock>,
    pub recommendations: Vec<String>,
}

/// Ordered per-day plans for the submitted week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPlan {
    pub days: Vec<DayPlan>,
}

/// Greedily chunk a study target into 50-minute segments with
/// 10-minute breaks. The final segment takes whatever remains and
/// carries no break.
pub fn pomodoro_blocks(target_study_hours: f64) -> Vec<PomodoroBlock> {
    let mut blocks = Vec::new();
    let mut minutes = (target_study_hours * 60.0).round() as i64;
    while minutes > 0 {
        let study = minutes.min(50);
        minutes -= study;
        let brk = if minutes > 0 { 10 } else { 0 };
        blocks.push(PomodoroBlock {
            study_min: study as u32,
            break_min: brk,
        });
    }
    blocks
}

/// Build the week's plan for an already-decided balance label.
///
/// Per day: `base = min(max_study, study_hours + deadlines * 0.6)`,
/// with an extra 4.0h cap when overloaded and a 2.0h floor when
/// relaxed.
pub fn plan_for_label(label: BalanceLabel, week: &[DailyLog]) -> WeekPlan {
    let policy = policy_for(label);

    let days = week
        .iter()
        .map(|day| {
            let mut base = policy
                .max_study_hours
                .min(day.study_hours + f64::from(day.deadlines) * 0.6);
            if label == BalanceLabel::Overloaded {
                base = base.min(4.0);
            }
            if label == BalanceLabel::Relaxed {
                base = base.max(2.0);
            }
            let target = (base * 10.0).round() / 10.0;

            let mut recommendations: Vec<String> = Vec::new();
            if policy.add_recovery_block {
                recommendations.extend(RECOVERY_ITEMS.iter().map(|s| s.to_string()));
            }
            if day.deadlines >= 2 {
                recommendations.push("Do due-tomorrow tasks first".to_string());
            }
            if day.mood <= 2.5 {
                recommendations.push("Short check-in with mentor/friend".to_string());
            }
            recommendations.truncate(MAX_RECOMMENDATIONS);

            DayPlan {
                date: day.date.clone(),
                sleep_target_hours: policy.sleep_target_hours,
                study_target_hours: target,
                pomodoro: pomodoro_blocks(target),
                recommendations,
            }
        })
        .collect();

    WeekPlan { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(study: f64, deadlines: u32, mood: f64) -> DailyLog {
        DailyLog {
            date: "2026-02-02".to_string(),
            study_hours: study,
            sleep_hours: 7.0,
            deadlines,
            classes_hours: 2.0,
            mood,
            exercised: false,
        }
    }

    #[test]
    fn chunking_78_minutes() {
        let blocks = pomodoro_blocks(1.3);
        assert_eq!(
            blocks,
            vec![
                PomodoroBlock { study_min: 50, break_min: 10 },
                PomodoroBlock { study_min: 28, break_min: 0 },
            ]
        );
    }

    #[test]
    fn chunking_zero_target_is_empty() {
        assert!(pomodoro_blocks(0.0).is_empty());
    }

    #[test]
    fn overloaded_caps_at_four_hours() {
        let plan = plan_for_label(BalanceLabel::Overloaded, &[day(6.0, 3, 3.0)]);
        assert_eq!(plan.days[0].study_target_hours, 4.0);
        assert_eq!(plan.days[0].sleep_target_hours, 7.5);
    }

    #[test]
    fn relaxed_floors_at_two_hours() {
        let plan = plan_for_label(BalanceLabel::Relaxed, &[day(0.5, 0, 4.0)]);
        assert_eq!(plan.days[0].study_target_hours, 2.0);
    }

    #[test]
    fn balanced_uses_deadline_adjusted_base() {
        // 3.0 + 2 * 0.6 = 4.2, under the 5.5 cap
        let plan = plan_for_label(BalanceLabel::Balanced, &[day(3.0, 2, 3.0)]);
        assert_eq!(plan.days[0].study_target_hours, 4.2);
    }

    #[test]
    fn recommendations_priority_and_cap() {
        // Recovery (3) + deadlines + low mood would be 5; capped at 4.
        let plan = plan_for_label(BalanceLabel::Overloaded, &[day(5.0, 2, 2.0)]);
        let recs = &plan.days[0].recommendations;
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0], "20-min walk");
        assert_eq!(recs[3], "Do due-tomorrow tasks first");
    }

    #[test]
    fn low_mood_check_in_without_recovery() {
        let plan = plan_for_label(BalanceLabel::Balanced, &[day(3.0, 0, 2.0)]);
        assert_eq!(
            plan.days[0].recommendations,
            vec!["Short check-in with mentor/friend".to_string()]
        );
    }

    #[test]
    fn preserves_input_date_order() {
        let mut week = vec![day(3.0, 0, 3.0), day(2.0, 0, 3.0)];
        week[0].date = "2026-02-03".to_string();
        week[1].date = "2026-02-02".to_string();
        let plan = plan_for_label(BalanceLabel::Balanced, &week);
        assert_eq!(plan.days[0].date, "2026-02-03");
        assert_eq!(plan.days[1].date, "2026-02-02");
    }

    proptest! {
        #[test]
        fn chunking_invariants(target in 0.0f64..12.0) {
            let target = (target * 10.0).round() / 10.0;
            let blocks = pomodoro_blocks(target);
            let total: u32 = blocks.iter().map(|b| b.study_min).sum();
            prop_assert_eq!(i64::from(total), (target * 60.0).round() as i64);
            for (i, b) in blocks.iter().enumerate() {
                prop_assert!(b.study_min > 0 && b.study_min <= 50);
                if i + 1 == blocks.len() {
                    prop_assert_eq!(b.break_min, 0);
                } else {
                    prop_assert_eq!(b.break_min, 10);
                }
            }
        }
    }
}
