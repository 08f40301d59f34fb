//! Pure derivations over a forecast payload. Nothing here holds state; callers
//! recompute whenever the repository publishes a new payload.

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::model::{ForecastDay, HourlyRecord, LocationData};

/// Hours sampled for the compact "tomorrow" strip.
pub const CHECKPOINTS: [&str; 6] = ["06:00", "09:00", "12:00", "15:00", "18:00", "21:00"];

pub const TODAY_LABEL: &str = "Today";

const TIMESTAMP_FORMATS: [&str; 4] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn today(payload: &LocationData) -> Option<&ForecastDay> {
    payload.days().first()
}

pub fn tomorrow(payload: &LocationData) -> Option<&ForecastDay> {
    payload.days().get(1)
}

/// Hours of `day` falling exactly on one of [`CHECKPOINTS`], in source order.
pub fn checkpointed_hours(day: &ForecastDay) -> Vec<&HourlyRecord> {
    day.hour
        .iter()
        .filter(|h| hour_label(&h.time).is_some_and(|label| CHECKPOINTS.contains(&label.as_str())))
        .collect()
}

/// `HH:MM` (24-hour) of an hourly timestamp, or `None` if it can't be parsed.
pub fn hour_label(time: &str) -> Option<String> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
        .map(|ts| ts.format("%H:%M").to_string())
}

/// English weekday name of a `YYYY-MM-DD` date.
pub fn weekday_name(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok().map(|d| d.format("%A").to_string())
}

/// `"Today"` for the current date, otherwise whatever `weekday` names it.
/// Dates `weekday` can't name are shown as-is.
pub fn day_label<F>(date: &str, today: &str, weekday: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if date == today {
        return TODAY_LABEL.to_string();
    }
    weekday(date).unwrap_or_else(|| date.to_string())
}

pub fn today_date_string(clock: &dyn Clock) -> String {
    clock.now().format("%Y-%m-%d").to_string()
}
