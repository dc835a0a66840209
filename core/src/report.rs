use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::daily_log::DailyLog;
use crate::models::{DailySummary, DayTotal, GoalStatus};

/// Days covered by the trend, today included.
pub const TREND_DAYS: i64 = 7;

#[must_use]
pub fn daily_summary(log: &DailyLog, date: NaiveDate, tdee: f64) -> DailySummary {
    let entries = log.entries_for_date(date);
    let total_calories: f64 = entries.iter().map(|e| e.calories).sum();
    let delta = total_calories - tdee;
    DailySummary {
        date,
        entries,
        total_calories,
        tdee,
        delta,
        status: GoalStatus::from_delta(delta),
    }
}

/// First day of the trend window ending on `today`.
#[must_use]
pub fn trend_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(TREND_DAYS - 1)
}

/// Per-day calorie totals over `[today - 6, today]`, oldest first.
/// Days without entries are left out rather than reported as zero.
#[must_use]
pub fn weekly_trend(log: &DailyLog, today: NaiveDate) -> Vec<DayTotal> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for entry in log.entries_in_window(trend_start(today), today) {
        *totals.entry(entry.date).or_insert(0.0) += entry.calories;
    }
    totals
        .into_iter()
        .map(|(date, total_calories)| DayTotal {
            date,
            total_calories,
        })
        .collect()
}
