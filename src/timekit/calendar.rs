use super::{strtotime, timestamp_to_date, DATE_FORMAT};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::time::Duration;

/// Whether month/day/year form a valid Gregorian date (years 1..=32767).
pub fn checkdate(month: u32, day: u32, year: i32) -> bool {
    (1..=32767).contains(&year) && NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// `2022-03-01` shifted by `n` days (negative goes back).
pub fn date_str_add_day(date: &str, n: i64) -> Result<String> {
    let timestamp = strtotime(DATE_FORMAT, date)?;
    Ok(timestamp_to_date(timestamp + n * 86_400))
}

/// True when the calendar dates of the two instants are exactly one day apart.
pub fn is_adjacent_days<Tz1: TimeZone, Tz2: TimeZone>(t1: &DateTime<Tz1>, t2: &DateTime<Tz2>) -> bool {
    let diff = t1.date_naive().signed_duration_since(t2.date_naive());
    diff.num_days().abs() == 1
}

pub fn sleep(seconds: u64) {
    std::thread::sleep(Duration::from_secs(seconds));
}

pub fn usleep(micros: u64) {
    std::thread::sleep(Duration::from_micros(micros));
}
