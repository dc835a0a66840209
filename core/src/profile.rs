//! The single user profile, stored as a one-row CSV.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::models::{Profile, Sex};
use crate::store::{read_rows, write_rows};

const COLUMNS: &[&str] = &["name", "sex", "height", "weight", "age", "activity_factor"];

/// Supplies a new profile on first run.
///
/// The CLI prompts on stdin; tests pass a closure.
pub trait ProfileSource {
    fn collect_profile(&mut self) -> Result<Profile>;
}

impl<F> ProfileSource for F
where
    F: FnMut() -> Result<Profile>,
{
    fn collect_profile(&mut self) -> Result<Profile> {
        self()
    }
}

#[derive(Serialize, Deserialize)]
struct ProfileRow {
    name: String,
    sex: String,
    height: f64,
    weight: f64,
    age: u32,
    activity_factor: f64,
}

impl From<&Profile> for ProfileRow {
    fn from(p: &Profile) -> Self {
        ProfileRow {
            name: p.name.clone(),
            sex: p.sex.code().to_string(),
            height: p.height_cm,
            weight: p.weight_kg,
            age: p.age,
            activity_factor: p.activity_factor,
        }
    }
}

/// Load the stored profile, or `None` when no profile file exists yet.
pub fn load_profile(path: &Path) -> Result<Option<Profile>> {
    if !path.exists() {
        return Ok(None);
    }
    let rows: Vec<ProfileRow> = read_rows(path, COLUMNS)?;
    if rows.len() > 1 {
        tracing::warn!(rows = rows.len(), "profile store has extra rows, using the first");
    }
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| TrackerError::storage(path, "profile store has no data row"))?;
    let sex: Sex = row
        .sex
        .parse()
        .map_err(|_| TrackerError::storage(path, format!("invalid sex '{}'", row.sex)))?;

    Ok(Some(Profile {
        name: row.name,
        sex,
        height_cm: row.height,
        weight_kg: row.weight,
        age: row.age,
        activity_factor: row.activity_factor,
    }))
}

pub fn save_profile(path: &Path, profile: &Profile) -> Result<()> {
    write_rows(path, COLUMNS, &[ProfileRow::from(profile)])
}

/// Persist a brand new profile. Refuses to replace an existing one.
pub fn create_profile(path: &Path, profile: Profile) -> Result<Profile> {
    if path.exists() {
        return Err(TrackerError::validation(format!(
            "A profile already exists at {}",
            path.display()
        )));
    }
    save_profile(path, &profile)?;
    tracing::info!(name = %profile.name, "created profile");
    Ok(profile)
}

/// Load the profile, collecting and saving a new one on first run.
pub fn load_or_create_profile(path: &Path, source: &mut dyn ProfileSource) -> Result<Profile> {
    if let Some(profile) = load_profile(path)? {
        return Ok(profile);
    }
    let profile = source.collect_profile()?;
    create_profile(path, profile)
}
