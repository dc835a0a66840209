use std::fmt::Write as _;

use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use chow_core::Tracker;
use chow_core::models::{DailySummary, GoalStatus, capitalize};
use chow_core::tdee::round_tdee;

use super::helpers::{no_neg_zero, parse_date};

pub(crate) fn cmd_today(tracker: &Tracker, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    let summary = tracker.summary_for(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary, date == tracker.today()));
    }
    Ok(())
}

/// Text report for one day: entry table, total, target and the over/under line.
pub(crate) fn render_summary(summary: &DailySummary, is_today: bool) -> String {
    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Weight (g)")]
        weight: String,
        #[tabled(rename = "Calories")]
        calories: String,
    }

    let mut out = String::new();
    let tdee = summary.tdee;

    if summary.entries.is_empty() {
        if is_today {
            let _ = writeln!(out, "No entries today.");
        } else {
            let _ = writeln!(out, "No entries for {}.", summary.date);
        }
        let _ = writeln!(out, "Recommended calorie intake: {tdee:.0} kcal");
        return out;
    }

    let rows: Vec<EntryRow> = summary
        .entries
        .iter()
        .map(|e| EntryRow {
            food: capitalize(&e.food),
            weight: format!("{}", e.weight_grams),
            calories: format!("{:.2}", e.calories),
        })
        .collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    if is_today {
        let _ = writeln!(out, "Today's Food Log ({}):", summary.date);
    } else {
        let _ = writeln!(out, "Food Log for {}:", summary.date);
    }
    let _ = writeln!(out, "{table}");

    let total = no_neg_zero(summary.total_calories);
    let _ = writeln!(out, "Total calories consumed: {total:.2} kcal");
    let _ = writeln!(out, "Recommended intake (TDEE): {:.1} kcal", round_tdee(tdee));
    let diff = summary.delta.abs();
    match summary.status {
        GoalStatus::Over => {
            let _ = writeln!(out, "You exceeded your goal by {diff:.1} kcal.");
        }
        GoalStatus::Under => {
            let _ = writeln!(out, "You are {diff:.1} kcal under your goal.");
        }
    }
    out
}
