//! Mifflin-St Jeor energy estimates.
//!
//! All comparisons use the unrounded TDEE; [`round_tdee`] is for display only.

use crate::models::{Profile, Sex};

/// Basal metabolic rate in kcal/day.
#[must_use]
pub fn bmr(profile: &Profile) -> f64 {
    let offset = match profile.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age) + offset
}

/// Total daily energy expenditure: BMR scaled by the activity factor.
#[must_use]
pub fn tdee(profile: &Profile) -> f64 {
    bmr(profile) * profile.activity_factor
}

/// Round to one decimal place.
#[must_use]
pub fn round_tdee(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
