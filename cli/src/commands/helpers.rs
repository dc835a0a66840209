use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use chow_core::models::{
    parse_number, validate_calories_per_100g, validate_positive, validate_weight_grams,
};

pub(crate) const NOT_SAVED: &str =
    "Warning: the change applies to this session but could not be saved to disk.";

/// Parse a weight in grams: "150", "150g" or "150 G".
pub(crate) fn parse_weight(s: &str) -> chow_core::Result<f64> {
    let trimmed = s.trim();
    let number = trimmed
        .strip_suffix(|c: char| c.eq_ignore_ascii_case(&'g'))
        .unwrap_or(trimmed);
    let value = parse_number("weight", number)?;
    validate_weight_grams(value)
}

pub(crate) fn parse_calories(s: &str) -> chow_core::Result<f64> {
    let value = parse_number("calorie value", s)?;
    validate_calories_per_100g(value)
}

pub(crate) fn parse_positive(field: &'static str) -> impl Fn(&str) -> chow_core::Result<f64> {
    move |s| parse_number(field, s).and_then(|v| validate_positive(field, v))
}

/// Accepts `today`, `yesterday`, `tomorrow` or `YYYY-MM-DD`; `None` is today.
pub(crate) fn parse_date(date: Option<String>) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match date.as_deref().map(str::trim) {
        None | Some("today") => Ok(today),
        Some("yesterday") => Ok(today - chrono::Duration::days(1)),
        Some("tomorrow") => Ok(today + chrono::Duration::days(1)),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date: '{s}'. Use YYYY-MM-DD, today or yesterday")),
    }
}

/// Line-oriented question/answer over any reader and writer.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub(crate) fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Write pre-rendered text as is.
    pub(crate) fn show(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    /// Ask once. `None` means the input is exhausted.
    pub(crate) fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer, printing each rejection.
    pub(crate) fn ask_until<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> chow_core::Result<T>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.ask(label)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.say(&e.to_string())?,
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

pub(crate) fn no_neg_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
