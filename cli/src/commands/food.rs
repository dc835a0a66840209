use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use chow_core::Tracker;
use chow_core::models::{FoodItem, capitalize};

use super::helpers::{NOT_SAVED, truncate};

pub(crate) fn format_food(item: &FoodItem) -> String {
    let name = capitalize(&item.name);
    let cal = item.calories_per_100g;
    format!("{name} ({cal} kcal/100g)")
}

pub(crate) fn cmd_food_add(
    tracker: &mut Tracker,
    name: &str,
    calories: f64,
    json: bool,
) -> Result<()> {
    let recorded = tracker.add_food(name, calories)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recorded.value)?);
    } else {
        println!("Added {} to database.", format_food(&recorded.value));
    }
    if !recorded.persisted {
        eprintln!("{NOT_SAVED}");
    }
    Ok(())
}

pub(crate) fn cmd_food_list(tracker: &Tracker, search: Option<&str>, json: bool) -> Result<()> {
    let foods = tracker.foods().list(search);

    if json {
        println!("{}", serde_json::to_string_pretty(&foods)?);
    } else if foods.is_empty() {
        match search {
            Some(q) => eprintln!("No foods matching '{q}'"),
            None => eprintln!("The food database is empty. Use `chow food add` to add one."),
        }
    } else {
        println!("{}", render_food_table(&foods));
    }
    Ok(())
}

pub(crate) fn render_food_table(foods: &[FoodItem]) -> String {
    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "Food")]
        name: String,
        #[tabled(rename = "Cal/100g")]
        calories: String,
    }

    let rows: Vec<FoodRow> = foods
        .iter()
        .map(|f| FoodRow {
            name: truncate(&capitalize(&f.name), 35),
            calories: format!("{}", f.calories_per_100g),
        })
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}
