use chrono::{Local, NaiveDate};

use crate::daily_log::DailyLog;
use crate::error::{Result, TrackerError};
use crate::food_db::FoodDatabase;
use crate::models::{DailySummary, DayTotal, FoodItem, LogEntry, Profile};
use crate::profile::{ProfileSource, load_or_create_profile};
use crate::report;
use crate::store::DataPaths;
use crate::tdee;

/// The result of a mutating call. `persisted` is false when the change was
/// applied for this session but could not be written to disk.
#[derive(Debug, Clone)]
pub struct Recorded<T> {
    pub value: T,
    pub persisted: bool,
}

/// Session context: the profile, its TDEE, the food database and the log,
/// loaded once at startup and shared by every handler.
pub struct Tracker {
    profile: Profile,
    tdee: f64,
    foods: FoodDatabase,
    log: DailyLog,
    today: NaiveDate,
}

impl Tracker {
    /// Load every store, creating the profile through `source` on first run.
    /// Any storage failure here is fatal to the caller.
    pub fn open(paths: &DataPaths, source: &mut dyn ProfileSource) -> Result<Self> {
        Self::open_on(paths, source, Local::now().date_naive())
    }

    /// Like [`Tracker::open`], with an explicit "today".
    pub fn open_on(
        paths: &DataPaths,
        source: &mut dyn ProfileSource,
        today: NaiveDate,
    ) -> Result<Self> {
        let profile = load_or_create_profile(&paths.profile, source)?;
        let tdee = tdee::tdee(&profile);
        let foods = FoodDatabase::load_or_seed(&paths.foods)?;
        let log = DailyLog::open(&paths.log)?;
        tracing::debug!(
            tdee,
            foods = foods.len(),
            entries = log.len(),
            %today,
            "session ready"
        );
        Ok(Tracker {
            profile,
            tdee,
            foods,
            log,
            today,
        })
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Unrounded TDEE, used for every comparison.
    #[must_use]
    pub fn tdee(&self) -> f64 {
        self.tdee
    }

    #[must_use]
    pub fn foods(&self) -> &FoodDatabase {
        &self.foods
    }

    #[must_use]
    pub fn log(&self) -> &DailyLog {
        &self.log
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn add_food(&mut self, name: &str, calories_per_100g: f64) -> Result<Recorded<FoodItem>> {
        let item = self.foods.upsert(name, calories_per_100g)?;
        let persisted = persist_or_warn(self.foods.save())?;
        Ok(Recorded {
            value: item,
            persisted,
        })
    }

    pub fn add_entry(&mut self, food_name: &str, weight_grams: f64) -> Result<Recorded<LogEntry>> {
        let entry = DailyLog::build_entry(&self.foods, food_name, weight_grams, self.today)?;
        self.log.append(entry.clone());
        let persisted = persist_or_warn(self.log.save())?;
        Ok(Recorded {
            value: entry,
            persisted,
        })
    }

    #[must_use]
    pub fn todays_summary(&self) -> DailySummary {
        self.summary_for(self.today)
    }

    #[must_use]
    pub fn summary_for(&self, date: NaiveDate) -> DailySummary {
        report::daily_summary(&self.log, date, self.tdee)
    }

    #[must_use]
    pub fn weekly_trend(&self) -> Vec<DayTotal> {
        report::weekly_trend(&self.log, self.today)
    }
}

/// Downgrade a mid-session storage failure to a warning. Other errors propagate.
fn persist_or_warn(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e @ TrackerError::Storage { .. }) => {
            tracing::warn!(error = %e, "change kept in memory but not saved");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
