use super::{format_checked, local_from_timestamp, utc_offset, DATETIME_FORMAT, DATE_FORMAT};
use crate::utils::error::{KitError, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

fn local_format(timestamp: i64, format: &str) -> String {
    local_from_timestamp(timestamp)
        .map(|dt| dt.format(format).to_string())
        .unwrap_or_default()
}

/// Format a unix timestamp, e.g. `date("%Y-%m-%d %H:%M:%S", 1524799394)`.
pub fn date(format: &str, timestamp: i64) -> Result<String> {
    format_checked(&local_from_timestamp(timestamp)?, format)
}

/// `2006-01-02T15:04:05+08:00` style values as `2006-01-02 15:04:05`.
pub fn datetime_format<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse `value` with `format` as local time and return unix seconds.
/// Formats without a time of day resolve to midnight.
pub fn strtotime(format: &str, value: &str) -> Result<i64> {
    let naive = match NaiveDateTime::parse_from_str(value, format) {
        Ok(naive) => naive,
        Err(_) => NaiveDate::parse_from_str(value, format)
            .map_err(|e| KitError::parse(format!("'{}' does not match '{}': {}", value, format, e)))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| KitError::parse("midnight out of range"))?,
    };

    utc_offset()
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| KitError::parse(format!("ambiguous local time: {}", value)))
}

pub fn timestamp_to_datetime_str(timestamp: i64) -> String {
    local_format(timestamp, DATETIME_FORMAT)
}

/// `2021-11-03 15:04:05` to `2021-11-03`.
pub fn datetime_str_to_date_str(datetime: &str) -> Result<String> {
    let timestamp = strtotime(DATETIME_FORMAT, datetime)?;
    Ok(timestamp_to_date(timestamp))
}

/// MySQL `datetime` text to unix seconds.
pub fn datetime_to_timestamp(datetime: &str) -> Result<i64> {
    strtotime(DATETIME_FORMAT, datetime)
}

/// RFC3339 (`2023-11-27T21:10:10+07:00`) to a time value.
pub fn datetime_t_to_time(datetime: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(datetime)
        .map_err(|e| KitError::parse(format!("not an RFC3339 time '{}': {}", datetime, e)))
}

pub fn timestamp_to_datetime(timestamp: i64) -> String {
    local_format(timestamp, DATETIME_FORMAT)
}

pub fn timestamp_to_date(timestamp: i64) -> String {
    local_format(timestamp, DATE_FORMAT)
}

/// `2019-01-01 15:22:22` in the local offset.
pub fn str_to_time(value: &str) -> Result<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|e| KitError::parse(format!("'{}': {}", value, e)))?;
    utc_offset()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| KitError::parse(format!("ambiguous local time: {}", value)))
}

/// Wall clock text of `dt` in its own offset. The offset is dropped.
pub fn time_to_str<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    datetime_format(dt)
}

/// Textual cut of `2023-11-27T21:10:10+07:00` to `2023-11-27 21:10:10`.
pub fn time_str_to_str(value: &str) -> String {
    let replaced = value.replacen('T', " ", 1);
    replaced.split('+').next().unwrap_or_default().to_string()
}

/// Milliseconds since the epoch.
pub fn time_to_stamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> i64 {
    dt.timestamp_millis()
}

pub fn get_year_month_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> (i32, u32, u32) {
    (dt.year(), dt.month(), dt.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1524799394 is 2018-04-27 03:23:14 UTC.
    const TS: i64 = 1524799394;

    #[test]
    fn test_date_uses_default_offset() {
        assert_eq!(date("%Y-%m-%d %H:%M:%S", TS).unwrap(), "2018-04-27 11:23:14");
        assert_eq!(date("%Y/%m/%d %I:%M:%S %p", TS).unwrap(), "2018/04/27 11:23:14 AM");
        assert!(date("%Q", TS).is_err());
        assert_eq!(timestamp_to_datetime_str(TS), "2018-04-27 11:23:14");
        assert_eq!(timestamp_to_date(TS), "2018-04-27");
    }

    #[test]
    fn test_strtotime() {
        assert_eq!(strtotime("%Y-%m-%d %H:%M:%S", "2018-04-27 11:23:14").unwrap(), TS);
        assert_eq!(
            strtotime("%Y-%m-%d", "2018-04-27").unwrap(),
            TS - (11 * 3600 + 23 * 60 + 14)
        );
        assert!(strtotime("%Y-%m-%d", "27/04/2018").is_err());
        assert_eq!(datetime_to_timestamp("2018-04-27 11:23:14").unwrap(), TS);
        assert_eq!(datetime_str_to_date_str("2018-04-27 23:59:59").unwrap(), "2018-04-27");
    }

    #[test]
    fn test_rfc3339_helpers() {
        let t = datetime_t_to_time("2023-11-27T21:10:10+07:00").unwrap();
        assert_eq!(time_to_str(&t), "2023-11-27 21:10:10");
        assert_eq!(time_str_to_str("2023-11-27T21:10:10+07:00"), "2023-11-27 21:10:10");
        assert_eq!(get_year_month_day(&t), (2023, 11, 27));
        assert_eq!(time_to_stamp(&t), t.timestamp() * 1000);
        assert!(datetime_t_to_time("2023-11-27 21:10:10").is_err());
    }

    #[test]
    fn test_str_to_time() {
        let t = str_to_time("2018-04-27 11:23:14").unwrap();
        assert_eq!(t.timestamp(), TS);
        assert_eq!(t.offset().local_minus_utc(), 8 * 3600);
    }
}
