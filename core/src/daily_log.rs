//! Append-only consumption log covering every day, persisted as CSV.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::food_db::FoodDatabase;
use crate::models::{LogEntry, calories_for, validate_weight_grams};
use crate::store::{bad_row, read_rows, write_rows};

const COLUMNS: &[&str] = &["date", "food", "weight(g)", "calories"];

#[derive(Serialize, Deserialize)]
struct LogRow {
    date: NaiveDate,
    food: String,
    #[serde(rename = "weight(g)")]
    weight: f64,
    calories: f64,
}

impl From<&LogEntry> for LogRow {
    fn from(e: &LogEntry) -> Self {
        LogRow {
            date: e.date,
            food: e.food.clone(),
            weight: e.weight_grams,
            calories: e.calories,
        }
    }
}

impl From<LogRow> for LogEntry {
    fn from(r: LogRow) -> Self {
        LogEntry {
            date: r.date,
            food: r.food,
            weight_grams: r.weight,
            calories: r.calories,
        }
    }
}

/// Create an empty log with only the header row if none exists yet.
pub fn ensure_log(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    write_rows::<LogRow>(path, COLUMNS, &[])?;
    tracing::info!(path = %path.display(), "created empty food log");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DailyLog {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl DailyLog {
    pub fn open(path: &Path) -> Result<Self> {
        ensure_log(path)?;
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let rows: Vec<LogRow> = read_rows(path, COLUMNS)?;
        let mut entries = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            validate_weight_grams(row.weight).map_err(|e| bad_row(path, index, e))?;
            if !row.calories.is_finite() || row.calories < 0.0 {
                return Err(bad_row(path, index, format!("invalid calories {}", row.calories)));
            }
            entries.push(LogEntry::from(row));
        }
        Ok(DailyLog {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn save(&self) -> Result<()> {
        let rows: Vec<LogRow> = self.entries.iter().map(LogRow::from).collect();
        write_rows(&self.path, COLUMNS, &rows)
    }

    /// Price a new entry against the food database without touching the log.
    pub fn build_entry(
        foods: &FoodDatabase,
        food_name: &str,
        weight_grams: f64,
        date: NaiveDate,
    ) -> Result<LogEntry> {
        let food = foods.require(food_name)?;
        let weight_grams = validate_weight_grams(weight_grams)?;
        Ok(LogEntry {
            date,
            calories: calories_for(food.calories_per_100g, weight_grams),
            food: food.name,
            weight_grams,
        })
    }

    /// Append in memory only.
    pub fn append(&mut self, entry: LogEntry) {
        tracing::debug!(date = %entry.date, food = %entry.food, calories = entry.calories, "appended entry");
        self.entries.push(entry);
    }

    /// Build, append and persist an entry. On any failure, including a failed
    /// save, the log is left untouched.
    pub fn add_entry(
        &mut self,
        foods: &FoodDatabase,
        food_name: &str,
        weight_grams: f64,
        date: NaiveDate,
    ) -> Result<LogEntry> {
        let entry = Self::build_entry(foods, food_name, weight_grams, date)?;
        self.append(entry.clone());
        if let Err(e) = self.save() {
            self.entries.pop();
            return Err(e);
        }
        Ok(entry)
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect()
    }

    /// Entries with `start <= date <= end`, in log order.
    #[must_use]
    pub fn entries_in_window(&self, start: NaiveDate, end: NaiveDate) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| (start..=end).contains(&e.date))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
