//! Interactive menu loop, the default when no subcommand is given.

use std::io::{self, BufRead, Write};

use chow_core::Tracker;
use chow_core::models::validate_food_name;

use crate::commands::{
    NOT_SAVED, Prompter, format_entry, format_food, parse_calories, parse_weight, render_profile,
    render_summary, render_trend,
};

const OPTIONS: [&str; 6] = [
    "Add food entry",
    "Add new food to database",
    "Show today's log",
    "Show 7-day trend",
    "Show profile",
    "Exit",
];

/// Whether the menu should keep going after a handler returns.
enum Flow {
    Continue,
    Exit,
}

pub(crate) fn run_menu<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    loop {
        prompter.say("")?;
        prompter.say("=== Daily Calorie Tracker ===")?;
        for (i, option) in OPTIONS.iter().enumerate() {
            prompter.say(&format!("{}. {option}", i + 1))?;
        }
        let Some(choice) = prompter.ask("Choose an option (1-6): ")? else {
            return Ok(());
        };

        let flow = match choice.as_str() {
            "1" => add_entry(tracker, prompter)?,
            "2" => add_food(tracker, prompter)?,
            "3" => {
                prompter.show(&render_summary(&tracker.todays_summary(), true))?;
                Flow::Continue
            }
            "4" => {
                prompter.show(&render_trend(&tracker.weekly_trend(), tracker.tdee()))?;
                Flow::Continue
            }
            "5" => {
                prompter.show(&render_profile(tracker.profile(), tracker.tdee()))?;
                Flow::Continue
            }
            "6" => {
                prompter.say("Goodbye!")?;
                Flow::Exit
            }
            _ => {
                prompter.say("Invalid choice. Try again.")?;
                Flow::Continue
            }
        };
        if let Flow::Exit = flow {
            return Ok(());
        }
    }
}

fn add_entry<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Flow> {
    let Some(name) = prompter.ask("Food name: ")? else {
        return Ok(Flow::Exit);
    };
    // Fail fast on an unknown food before asking for the weight.
    if let Err(e) = tracker.foods().require(&name) {
        prompter.say(&e.to_string())?;
        return Ok(Flow::Continue);
    }
    let Some(weight) = prompter.ask_until("Weight (g): ", parse_weight)? else {
        return Ok(Flow::Exit);
    };

    match tracker.add_entry(&name, weight) {
        Ok(recorded) => {
            prompter.say(&format!("Logged: {}", format_entry(&recorded.value)))?;
            if !recorded.persisted {
                prompter.say(NOT_SAVED)?;
            }
        }
        Err(e) => prompter.say(&e.to_string())?,
    }
    Ok(Flow::Continue)
}

fn add_food<R: BufRead, W: Write>(
    tracker: &mut Tracker,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Flow> {
    let Some(name) = prompter.ask("New food name: ")? else {
        return Ok(Flow::Exit);
    };
    if let Err(e) = validate_food_name(&name) {
        prompter.say(&e.to_string())?;
        return Ok(Flow::Continue);
    }
    let Some(calories) = prompter.ask_until("Calories per 100g: ", parse_calories)? else {
        return Ok(Flow::Exit);
    };

    match tracker.add_food(&name, calories) {
        Ok(recorded) => {
            prompter.say(&format!("Added {} to database.", format_food(&recorded.value)))?;
            if !recorded.persisted {
                prompter.say(NOT_SAVED)?;
            }
        }
        Err(e) => prompter.say(&e.to_string())?,
    }
    Ok(Flow::Continue)
}
