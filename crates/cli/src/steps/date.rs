// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Relative date modifiers and date rendering.
//!
//! Modifiers are a small relative-date language: `now`, `today`,
//! `midnight`, `tomorrow`, `yesterday`, `next <unit>`, `last <unit>`, and
//! signed offsets such as `+1 day` or `-2 weeks 3 hours`. Terms apply left to
//! right. Month arithmetic clamps to the last day of the target month.

use crate::error::StepError;
use chrono::{DateTime, FixedOffset, Local, Months, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Fortnight,
    Month,
    Year,
}

impl Unit {
    fn parse(word: &str) -> Option<Self> {
        Some(match word {
            "s" | "sec" | "secs" | "second" | "seconds" => Self::Second,
            "min" | "mins" | "minute" | "minutes" => Self::Minute,
            "h" | "hour" | "hours" => Self::Hour,
            "day" | "days" => Self::Day,
            "week" | "weeks" => Self::Week,
            "fortnight" | "fortnights" => Self::Fortnight,
            "month" | "months" => Self::Month,
            "year" | "years" => Self::Year,
            _ => return None,
        })
    }
}

/// Wall-clock time at `now` in the given offset, or local time
pub fn wall_clock(now: DateTime<Utc>, offset: Option<FixedOffset>) -> NaiveDateTime {
    match offset {
        Some(offset) => now.with_timezone(&offset).naive_local(),
        None => now.with_timezone(&Local).naive_local(),
    }
}

/// Apply a modifier expression to a wall-clock time
pub fn apply_modifier(base: NaiveDateTime, modifier: &str) -> Result<NaiveDateTime, StepError> {
    let lowered = modifier.to_lowercase();
    let mut tokens = lowered.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(invalid_modifier(modifier, "empty modifier"));
    }

    let mut current = base;
    while let Some(token) = tokens.next() {
        current = match token {
            "now" => current,
            "today" | "midnight" => current.date().and_time(NaiveTime::MIN),
            "tomorrow" => shift(current.date().and_time(NaiveTime::MIN), 1, Unit::Day)?,
            "yesterday" => shift(current.date().and_time(NaiveTime::MIN), -1, Unit::Day)?,
            "next" | "last" => {
                let unit = next_unit(&mut tokens, modifier)?;
                let amount = if token == "next" { 1 } else { -1 };
                shift(current, amount, unit)?
            }
            _ => {
                let amount = parse_amount(token)
                    .ok_or_else(|| invalid_modifier(modifier, &format!("unexpected '{}'", token)))?;
                let unit = next_unit(&mut tokens, modifier)?;
                shift(current, amount, unit)?
            }
        };
    }
    Ok(current)
}

/// Render the current date, optionally shifted by a modifier
pub fn render(
    now: DateTime<Utc>,
    offset: Option<FixedOffset>,
    format: &str,
    modifier: Option<&str>,
) -> Result<String, StepError> {
    let base = wall_clock(now, offset);
    let when = match modifier {
        Some(m) => apply_modifier(base, m)?,
        None => base,
    };
    let mut out = String::new();
    write!(out, "{}", when.format(format))
        .map_err(|_| StepError::invalid(format!("invalid date format '{}'", format)))?;
    Ok(out)
}

fn next_unit<'a, I>(tokens: &mut I, modifier: &str) -> Result<Unit, StepError>
where
    I: Iterator<Item = &'a str>,
{
    let word = tokens
        .next()
        .ok_or_else(|| invalid_modifier(modifier, "missing unit"))?;
    Unit::parse(word).ok_or_else(|| invalid_modifier(modifier, &format!("unknown unit '{}'", word)))
}

/// `+3`, `-3`, or `3`
fn parse_amount(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('+').unwrap_or(token);
    if digits.is_empty() || !digits.trim_start_matches('-').chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn shift(at: NaiveDateTime, amount: i64, unit: Unit) -> Result<NaiveDateTime, StepError> {
    let shifted = match unit {
        Unit::Second => TimeDelta::try_seconds(amount).and_then(|d| at.checked_add_signed(d)),
        Unit::Minute => TimeDelta::try_minutes(amount).and_then(|d| at.checked_add_signed(d)),
        Unit::Hour => TimeDelta::try_hours(amount).and_then(|d| at.checked_add_signed(d)),
        Unit::Day => TimeDelta::try_days(amount).and_then(|d| at.checked_add_signed(d)),
        Unit::Week => TimeDelta::try_weeks(amount).and_then(|d| at.checked_add_signed(d)),
        Unit::Fortnight => amount
            .checked_mul(2)
            .and_then(TimeDelta::try_weeks)
            .and_then(|d| at.checked_add_signed(d)),
        Unit::Month => shift_months(at, amount),
        Unit::Year => amount.checked_mul(12).and_then(|m| shift_months(at, m)),
    };
    shifted.ok_or_else(|| StepError::invalid(format!("date shift of {} {:?} is out of range", amount, unit)))
}

fn shift_months(at: NaiveDateTime, amount: i64) -> Option<NaiveDateTime> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        at.checked_add_months(months)
    } else {
        at.checked_sub_months(months)
    }
}

fn invalid_modifier(modifier: &str, reason: &str) -> StepError {
    StepError::invalid(format!("date modifier \"{}\": {}", modifier, reason))
}

#[cfg(test)]
#[path = "date_tests.rs"]
mod tests;
