//! Time formatting and arithmetic in a process-wide "local" offset.
//!
//! The offset defaults to UTC+8 and is replaced through [`set_utc_offset`] or
//! [`crate::config::KitConfig::apply`]. Formats are chrono strftime strings.

mod calendar;
mod convert;
mod now;

pub use calendar::{checkdate, date_str_add_day, is_adjacent_days, sleep, usleep};
pub use convert::{
    date, datetime_format, datetime_str_to_date_str, datetime_t_to_time, datetime_to_timestamp,
    get_year_month_day, str_to_time, strtotime, time_str_to_str, time_to_stamp, time_to_str,
    timestamp_to_date, timestamp_to_datetime, timestamp_to_datetime_str,
};
pub use now::{
    date_before_days_str, date_str, date_today_2359_str, date_today_int, date_today_short_str,
    date_today_str, date_today_zero_str, datetime, datetime_str, microtime, millisecond,
    now_datetime_str, now_timestamp, timestamp_string, today_end_time, today_start_time,
    today_time, week_time, year_month_short_str,
};

use crate::config::{self, TimeSettings};
use crate::utils::error::{KitError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt::Write;

pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// The offset every "local" helper in this module uses.
pub fn utc_offset() -> FixedOffset {
    config::time_settings().offset()
}

/// Replace the process-wide offset. The timezone label is updated alongside.
pub fn set_utc_offset(seconds: i32, timezone: &str) -> Result<()> {
    if FixedOffset::east_opt(seconds).is_none() {
        return Err(KitError::invalid_argument(format!(
            "utc offset out of range: {}s",
            seconds
        )));
    }
    config::set_time_settings(TimeSettings {
        utc_offset_seconds: seconds,
        timezone: timezone.to_string(),
    });
    Ok(())
}

pub fn timezone() -> String {
    config::time_settings().timezone
}

pub(crate) fn now_local() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&utc_offset())
}

pub(crate) fn local_from_timestamp(timestamp: i64) -> Result<DateTime<FixedOffset>> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.with_timezone(&utc_offset()))
        .ok_or_else(|| KitError::invalid_argument(format!("timestamp out of range: {}", timestamp)))
}

/// Format with a user supplied pattern. Bad specifiers are an error rather than a panic.
pub(crate) fn format_checked<Tz>(dt: &DateTime<Tz>, format: &str) -> Result<String>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", dt.format(format))
        .map_err(|_| KitError::invalid_argument(format!("invalid time format: {}", format)))?;
    Ok(out)
}
