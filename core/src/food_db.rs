//! Food name to calories-per-100g mapping, persisted as CSV.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::models::{
    FoodItem, normalize_food_name, validate_calories_per_100g, validate_food_name,
};
use crate::store::{bad_row, read_rows, write_rows};

const COLUMNS: &[&str] = &["food", "calories_per_100g"];

/// Seeded into a fresh installation, kcal per 100g.
pub const DEFAULT_FOODS: &[(&str, f64)] = &[
    ("rice", 116.0),
    ("bread", 265.0),
    ("chicken breast", 165.0),
    ("apple", 52.0),
    ("egg", 155.0),
    ("milk", 60.0),
    ("banana", 89.0),
    ("potato", 77.0),
];

#[derive(Serialize, Deserialize)]
struct FoodRow {
    food: String,
    calories_per_100g: f64,
}

#[derive(Debug, Clone)]
pub struct FoodDatabase {
    path: PathBuf,
    foods: BTreeMap<String, f64>,
}

impl FoodDatabase {
    /// Load the stored foods, or seed and save the defaults if no file exists.
    pub fn load_or_seed(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        let db = FoodDatabase {
            path: path.to_path_buf(),
            foods: DEFAULT_FOODS
                .iter()
                .map(|&(name, kcal)| (name.to_string(), kcal))
                .collect(),
        };
        db.save()?;
        tracing::info!(path = %path.display(), foods = db.len(), "seeded food database");
        Ok(db)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let rows: Vec<FoodRow> = read_rows(path, COLUMNS)?;
        let mut foods = BTreeMap::new();
        for (index, row) in rows.into_iter().enumerate() {
            let name = validate_food_name(&row.food).map_err(|e| bad_row(path, index, e))?;
            let calories = validate_calories_per_100g(row.calories_per_100g)
                .map_err(|e| bad_row(path, index, e))?;
            foods.insert(name, calories);
        }
        Ok(FoodDatabase {
            path: path.to_path_buf(),
            foods,
        })
    }

    pub fn save(&self) -> Result<()> {
        let rows: Vec<FoodRow> = self
            .foods
            .iter()
            .map(|(food, &calories_per_100g)| FoodRow {
                food: food.clone(),
                calories_per_100g,
            })
            .collect();
        write_rows(&self.path, COLUMNS, &rows)
    }

    /// Validate and insert or overwrite an entry in memory only.
    pub fn upsert(&mut self, name: &str, calories_per_100g: f64) -> Result<FoodItem> {
        let name = validate_food_name(name)?;
        let calories_per_100g = validate_calories_per_100g(calories_per_100g)?;
        if let Some(old) = self.foods.insert(name.clone(), calories_per_100g) {
            tracing::debug!(food = %name, old, new = calories_per_100g, "overwrote food");
        }
        Ok(FoodItem {
            name,
            calories_per_100g,
        })
    }

    /// Upsert an entry and persist the whole mapping. If the save fails the
    /// previous value is restored.
    pub fn add_food(&mut self, name: &str, calories_per_100g: f64) -> Result<FoodItem> {
        let previous = self.foods.get(&normalize_food_name(name)).copied();
        let item = self.upsert(name, calories_per_100g)?;
        if let Err(e) = self.save() {
            match previous {
                Some(old) => self.foods.insert(item.name.clone(), old),
                None => self.foods.remove(&item.name),
            };
            return Err(e);
        }
        Ok(item)
    }

    /// Case- and whitespace-insensitive lookup.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.foods.get(&normalize_food_name(name)).copied()
    }

    pub fn require(&self, name: &str) -> Result<FoodItem> {
        let key = normalize_food_name(name);
        match self.foods.get(&key) {
            Some(&calories_per_100g) => Ok(FoodItem {
                name: key,
                calories_per_100g,
            }),
            None => Err(TrackerError::FoodNotFound(key)),
        }
    }

    /// Entries sorted by name, optionally filtered by a case-insensitive substring.
    #[must_use]
    pub fn list(&self, search: Option<&str>) -> Vec<FoodItem> {
        let needle = search.map(normalize_food_name).unwrap_or_default();
        self.foods
            .iter()
            .filter(|(name, _)| name.contains(&needle))
            .map(|(name, &calories_per_100g)| FoodItem {
                name: name.clone(),
                calories_per_100g,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
