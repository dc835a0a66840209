mod food;
mod helpers;
mod log;
mod profile;
mod summary;
mod trend;

pub(crate) use food::{cmd_food_add, cmd_food_list, format_food};
pub(crate) use helpers::{NOT_SAVED, Prompter, parse_calories, parse_weight};
pub(crate) use log::{cmd_log, format_entry};
pub(crate) use profile::{cmd_profile_init, cmd_profile_show, render_profile};
pub(crate) use summary::{cmd_today, render_summary};
pub(crate) use trend::{cmd_trend, render_trend};
