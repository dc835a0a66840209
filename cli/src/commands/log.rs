use anyhow::Result;

use chow_core::Tracker;
use chow_core::models::{LogEntry, capitalize};

use super::helpers::{NOT_SAVED, parse_weight};

pub(crate) fn format_entry(entry: &LogEntry) -> String {
    let name = capitalize(&entry.food);
    let weight = entry.weight_grams;
    let cal = entry.calories;
    format!("{name} ({weight}g) = {cal:.2} kcal")
}

pub(crate) fn cmd_log(tracker: &mut Tracker, food: &str, weight: &str, json: bool) -> Result<()> {
    let weight_g = parse_weight(weight)?;
    let recorded = tracker.add_entry(food, weight_g)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recorded.value)?);
    } else {
        println!("Logged: {}", format_entry(&recorded.value));
    }
    if !recorded.persisted {
        eprintln!("{NOT_SAVED}");
    }
    Ok(())
}
