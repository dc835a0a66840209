use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use chow_core::Tracker;
use chow_core::models::DayTotal;
use chow_core::report::TREND_DAYS;
use chow_core::tdee::round_tdee;

const CHART_WIDTH: usize = 40;

pub(crate) fn cmd_trend(tracker: &Tracker, json: bool) -> Result<()> {
    let days = tracker.weekly_trend();

    if json {
        #[derive(Serialize)]
        struct TrendOutput<'a> {
            tdee: f64,
            days: &'a [DayTotal],
        }
        let output = TrendOutput {
            tdee: tracker.tdee(),
            days: &days,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_trend(&days, tracker.tdee()));
    }
    Ok(())
}

pub(crate) fn render_trend(days: &[DayTotal], tdee: f64) -> String {
    #[derive(Tabled)]
    struct TrendRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "vs TDEE")]
        delta: String,
    }

    if days.is_empty() {
        return format!("No records in the last {TREND_DAYS} days.\n");
    }

    let rows: Vec<TrendRow> = days
        .iter()
        .map(|d| TrendRow {
            date: d.date.to_string(),
            calories: format!("{:.0}", d.total_calories),
            delta: format!("{:+.0}", d.total_calories - tdee),
        })
        .collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    let mut out = String::new();
    let _ = writeln!(out, "Last {TREND_DAYS} Days Calorie Trend");
    let _ = writeln!(out, "{table}");
    let _ = writeln!(out);
    out.push_str(&render_chart(days, tdee, CHART_WIDTH));
    out
}

/// Horizontal bar per day with the TDEE drawn as a `|` reference column.
#[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub(crate) fn render_chart(days: &[DayTotal], tdee: f64, width: usize) -> String {
    let peak = days
        .iter()
        .map(|d| d.total_calories)
        .fold(tdee, f64::max)
        .max(1.0);
    let column = |value: f64| -> usize { ((value.max(0.0) / peak) * width as f64).round() as usize };
    let marker = column(tdee);

    let mut out = String::new();
    for day in days {
        let bar_len = column(day.total_calories);
        let bar: String = (0..=width)
            .map(|i| {
                if i == marker {
                    '|'
                } else if i < bar_len {
                    '#'
                } else {
                    ' '
                }
            })
            .collect();
        let _ = writeln!(out, "{} {} {:.0} kcal", day.date, bar, day.total_calories);
    }
    let pad = " ".repeat("YYYY-MM-DD ".len() + marker);
    let _ = writeln!(out, "{pad}^ TDEE {:.1} kcal", round_tdee(tdee));
    out
}
