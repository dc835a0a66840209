use std::fmt::{self, Display, Write as _};
use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde::Serialize;

use chow_core::models::{ActivityLevel, Profile, Sex, parse_age};
use chow_core::profile::{ProfileSource, create_profile};
use chow_core::tdee::{bmr, round_tdee, tdee};
use chow_core::{DataPaths, Tracker, TrackerError};

use super::helpers::{Prompter, parse_positive};

fn aborted(reason: impl Display) -> TrackerError {
    TrackerError::Validation(format!("Profile setup aborted: {reason}"))
}

fn required<T>(answer: io::Result<Option<T>>) -> chow_core::Result<T> {
    answer.map_err(aborted)?.ok_or_else(|| aborted("no input"))
}

impl<R: BufRead, W: Write> ProfileSource for Prompter<R, W> {
    fn collect_profile(&mut self) -> chow_core::Result<Profile> {
        self.say("=== Create Your Profile ===").map_err(aborted)?;
        let name = required(self.ask("Name: "))?;
        let sex = required(self.ask_until("Sex (M/F): ", str::parse::<Sex>))?;
        let height = required(self.ask_until("Height (cm): ", parse_positive("height")))?;
        let weight = required(self.ask_until("Weight (kg): ", parse_positive("weight")))?;
        let age = required(self.ask_until("Age: ", parse_age))?;

        self.say("Activity level:").map_err(aborted)?;
        for level in ActivityLevel::ALL {
            self.say(&format!("  {}. {}", level.choice(), level.label()))
                .map_err(aborted)?;
        }
        let choice = required(self.ask("Choose activity level (1-5): "))?;
        let activity = ActivityLevel::from_choice(&choice);

        Profile::new(&name, sex, height, weight, age, activity)
    }
}

#[derive(Serialize)]
struct ProfileOutput<'a> {
    profile: &'a Profile,
    bmr: f64,
    tdee: f64,
}

pub(crate) fn cmd_profile_show(tracker: &Tracker, json: bool) -> Result<()> {
    let profile = tracker.profile();
    if json {
        let output = ProfileOutput {
            profile,
            bmr: bmr(profile),
            tdee: tracker.tdee(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_profile(profile, tracker.tdee()));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_profile_init(
    paths: &DataPaths,
    name: &str,
    sex: &str,
    height: f64,
    weight: f64,
    age: u32,
    activity: &str,
    json: bool,
) -> Result<()> {
    let sex: Sex = sex.parse()?;
    let profile = Profile::new(
        name,
        sex,
        height,
        weight,
        age,
        ActivityLevel::from_choice(activity),
    )?;
    let profile = create_profile(&paths.profile, profile)?;
    let target = tdee(&profile);

    if json {
        let output = ProfileOutput {
            profile: &profile,
            bmr: bmr(&profile),
            tdee: target,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Profile created for {}.", profile.name);
        println!("Recommended daily intake: {target:.0} kcal");
    }
    Ok(())
}

pub(crate) fn render_profile(profile: &Profile, tdee: f64) -> String {
    let mut out = String::new();
    let _ = write_profile(&mut out, profile, tdee);
    out
}

fn write_profile(out: &mut String, profile: &Profile, tdee: f64) -> fmt::Result {
    writeln!(out, "=== Current Profile ===")?;
    writeln!(out, "Name: {}", profile.name)?;
    writeln!(out, "Sex: {}", profile.sex)?;
    writeln!(out, "Height: {} cm", profile.height_cm)?;
    writeln!(out, "Weight: {} kg", profile.weight_kg)?;
    writeln!(out, "Age: {}", profile.age)?;
    writeln!(out, "Activity factor: {}", profile.activity_factor)?;
    writeln!(out, "Daily TDEE: {:.1} kcal", round_tdee(tdee))?;
    writeln!(out, "Recommended daily intake: {tdee:.0} kcal")
}
