use super::{now_local, utc_offset, DATETIME_FORMAT, DATE_FORMAT};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// Current local time as MySQL datetime text. `tz_offset` (seconds east of
/// UTC) overrides the configured offset for this call only.
pub fn now_datetime_str(tz_offset: Option<i32>) -> String {
    let offset = tz_offset
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(utc_offset);
    Utc::now().with_timezone(&offset).format(DATETIME_FORMAT).to_string()
}

pub fn datetime_str() -> String {
    now_local().format(DATETIME_FORMAT).to_string()
}

/// Today's date shifted by `offset_days` (yesterday is `-1`).
pub fn date_str(offset_days: i64) -> String {
    (now_local() + Duration::days(offset_days))
        .format(DATE_FORMAT)
        .to_string()
}

/// `2202` for February 2022.
pub fn year_month_short_str() -> String {
    now_local().format("%y%m").to_string()
}

pub fn datetime() -> String {
    datetime_str()
}

fn at_time_of_day(now: DateTime<FixedOffset>, time: NaiveTime) -> i64 {
    let local = now.date_naive().and_time(time);
    now.offset()
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| now.timestamp())
}

fn start_of_day(now: DateTime<FixedOffset>) -> i64 {
    at_time_of_day(now, NaiveTime::MIN)
}

/// Unix seconds of today 00:00:00 local.
pub fn today_start_time() -> i64 {
    start_of_day(now_local())
}

/// Unix seconds of today 23:59:59 local.
pub fn today_end_time() -> i64 {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    at_time_of_day(now_local(), end)
}

/// Nanoseconds since the epoch.
pub fn microtime() -> i64 {
    Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000)
}

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn millisecond() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn today_time() -> i64 {
    today_start_time()
}

pub fn date_today_zero_str() -> String {
    format!("{} 00:00:00", date_today_str())
}

pub fn date_today_2359_str() -> String {
    format!("{} 23:59:59", date_today_str())
}

pub fn date_today_int() -> (i32, u32, u32) {
    let now = now_local();
    (now.year(), now.month(), now.day())
}

pub fn date_today_str() -> String {
    now_local().format(DATE_FORMAT).to_string()
}

/// `220105` for 2022-01-05.
pub fn date_today_short_str() -> String {
    now_local().format("%y%m%d").to_string()
}

pub fn date_before_days_str(days: i64) -> String {
    super::timestamp_to_date(today_time() - days * 86_400)
}

/// Current unix seconds plus `add`, as text. Handy for expiry fields.
pub fn timestamp_string(add: i64) -> String {
    (Utc::now().timestamp() + add).to_string()
}

fn week_start(now: DateTime<FixedOffset>) -> i64 {
    let back = now.weekday().num_days_from_sunday() as i64;
    start_of_day(now - Duration::days(back))
}

/// Unix seconds of the most recent Sunday 00:00 local (today if it is Sunday).
pub fn week_time() -> i64 {
    week_start(now_local())
}
