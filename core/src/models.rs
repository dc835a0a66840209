use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            _ => Err(TrackerError::validation(format!(
                "Invalid sex '{}'. Use M or F",
                s.trim()
            ))),
        }
    }
}

/// Self-reported exercise frequency, selectable as 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Map a menu selection to a level. Anything unrecognised is sedentary.
    #[must_use]
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "2" => ActivityLevel::LightlyActive,
            "3" => ActivityLevel::ModeratelyActive,
            "4" => ActivityLevel::VeryActive,
            "5" => ActivityLevel::ExtraActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    #[must_use]
    pub fn choice(self) -> u8 {
        match self {
            ActivityLevel::Sedentary => 1,
            ActivityLevel::LightlyActive => 2,
            ActivityLevel::ModeratelyActive => 3,
            ActivityLevel::VeryActive => 4,
            ActivityLevel::ExtraActive => 5,
        }
    }

    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => "Lightly active (1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately active (3-5 days/week)",
            ActivityLevel::VeryActive => "Very active (6-7 days/week)",
            ActivityLevel::ExtraActive => "Extra active (physical job or athlete)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub activity_factor: f64,
}

pub const DEFAULT_PROFILE_NAME: &str = "User";

impl Profile {
    /// Build a profile from collected input. A blank name falls back to "User".
    pub fn new(
        name: &str,
        sex: Sex,
        height_cm: f64,
        weight_kg: f64,
        age: u32,
        activity: ActivityLevel,
    ) -> Result<Self> {
        let name = name.trim();
        let profile = Profile {
            name: if name.is_empty() {
                DEFAULT_PROFILE_NAME.to_string()
            } else {
                name.to_string()
            },
            sex,
            height_cm: validate_positive("height", height_cm)?,
            weight_kg: validate_positive("weight", weight_kg)?,
            age,
            activity_factor: activity.factor(),
        };
        if age == 0 {
            return Err(TrackerError::validation("Age must be greater than 0"));
        }
        Ok(profile)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodItem {
    pub name: String,
    pub calories_per_100g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub food: String,
    pub weight_grams: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Over,
    /// Also covers an exact hit: a zero delta does not exceed the target.
    Under,
}

impl GoalStatus {
    #[must_use]
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            GoalStatus::Over
        } else {
            GoalStatus::Under
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub entries: Vec<LogEntry>,
    pub total_calories: f64,
    pub tdee: f64,
    /// `total_calories - tdee`; positive means over the target.
    pub delta: f64,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total_calories: f64,
}

/// Canonical food key: trimmed and lowercased.
#[must_use]
pub fn normalize_food_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[must_use]
pub fn calories_for(calories_per_100g: f64, weight_grams: f64) -> f64 {
    calories_per_100g * weight_grams / 100.0
}

/// Parse a user-supplied number, rejecting non-numeric and non-finite input.
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TrackerError::validation(format!(
            "Invalid {field}: '{trimmed}'. Enter a number"
        ))),
    }
}

pub fn parse_age(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(TrackerError::validation(format!(
            "Invalid age: '{trimmed}'. Enter a whole number greater than 0"
        ))),
    }
}

pub fn validate_food_name(name: &str) -> Result<String> {
    let key = normalize_food_name(name);
    if key.is_empty() {
        return Err(TrackerError::validation("Food name cannot be empty"));
    }
    Ok(key)
}

pub fn validate_calories_per_100g(calories: f64) -> Result<f64> {
    if !calories.is_finite() || calories < 0.0 {
        return Err(TrackerError::validation(
            "Calories per 100g must be a number of at least 0",
        ));
    }
    Ok(calories)
}

pub fn validate_weight_grams(weight: f64) -> Result<f64> {
    validate_positive("weight", weight)
}

pub fn validate_positive(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackerError::validation(format!(
            "{} must be greater than 0",
            capitalize(field)
        )));
    }
    Ok(value)
}

/// Uppercase the first character, as food names are shown to the user.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_choices() {
        assert_eq!(ActivityLevel::from_choice("1").factor(), 1.2);
        assert_eq!(ActivityLevel::from_choice("2").factor(), 1.375);
        assert_eq!(ActivityLevel::from_choice("3").factor(), 1.55);
        assert_eq!(ActivityLevel::from_choice("4").factor(), 1.725);
        assert_eq!(ActivityLevel::from_choice(" 5 ").factor(), 1.9);
    }

    #[test]
    fn test_activity_level_unknown_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::from_choice("7"), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_choice(""), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_choice("abc"), ActivityLevel::Sedentary);
    }

    #[test]
    fn test_activity_level_choice_round_trips() {
        for level in ActivityLevel::ALL {
            let choice = level.choice().to_string();
            assert_eq!(ActivityLevel::from_choice(&choice), level);
        }
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" f ".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("x".parse::<Sex>().is_err());
        assert!("".parse::<Sex>().is_err());
    }

    #[test]
    fn test_profile_blank_name_defaults() {
        let p = Profile::new("  ", Sex::Female, 165.0, 60.0, 25, ActivityLevel::Sedentary).unwrap();
        assert_eq!(p.name, "User");
        assert_eq!(p.activity_factor, 1.2);
    }

    #[test]
    fn test_profile_rejects_non_positive_numbers() {
        assert!(Profile::new("A", Sex::Male, 0.0, 70.0, 30, ActivityLevel::Sedentary).is_err());
        assert!(Profile::new("A", Sex::Male, 175.0, -1.0, 30, ActivityLevel::Sedentary).is_err());
        assert!(Profile::new("A", Sex::Male, 175.0, 70.0, 0, ActivityLevel::Sedentary).is_err());
        assert!(
            Profile::new("A", Sex::Male, f64::NAN, 70.0, 30, ActivityLevel::Sedentary).is_err()
        );
    }

    #[test]
    fn test_parse_number() {
        assert!((parse_number("height", " 175.5 ").unwrap() - 175.5).abs() < f64::EPSILON);
        let err = parse_number("height", "tall").unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(err.to_string().contains("height"));
        assert!(parse_number("height", "inf").is_err());
        assert!(parse_number("height", "NaN").is_err());
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("30").unwrap(), 30);
        assert!(parse_age("0").is_err());
        assert!(parse_age("-3").is_err());
        assert!(parse_age("30.5").is_err());
    }

    #[test]
    fn test_normalize_food_name() {
        assert_eq!(normalize_food_name("  Chicken Breast "), "chicken breast");
        assert_eq!(normalize_food_name("RICE"), "rice");
    }

    #[test]
    fn test_validate_food_name_empty() {
        assert!(matches!(
            validate_food_name("   "),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_calories_per_100g() {
        assert!(validate_calories_per_100g(0.0).is_ok());
        assert!(validate_calories_per_100g(250.5).is_ok());
        assert!(validate_calories_per_100g(-1.0).is_err());
        assert!(validate_calories_per_100g(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_weight_grams() {
        assert!(validate_weight_grams(150.0).is_ok());
        assert!(validate_weight_grams(0.0).is_err());
        assert!(validate_weight_grams(-20.0).is_err());
    }

    #[test]
    fn test_calories_for_exact() {
        assert_eq!(calories_for(116.0, 150.0), 174.0);
        assert_eq!(calories_for(52.0, 100.0), 52.0);
    }

    #[test]
    fn test_goal_status_boundary() {
        assert_eq!(GoalStatus::from_delta(0.1), GoalStatus::Over);
        assert_eq!(GoalStatus::from_delta(0.0), GoalStatus::Under);
        assert_eq!(GoalStatus::from_delta(-0.0), GoalStatus::Under);
        assert_eq!(GoalStatus::from_delta(-500.0), GoalStatus::Under);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("chicken breast"), "Chicken breast");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
