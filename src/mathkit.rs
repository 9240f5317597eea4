//! Numeric helpers: random numbers, rounding, base conversion and formatting.

use crate::utils::error::{KitError, Result};
use rand::Rng;

/// Largest value `rand` accepts, PHP's `getrandmax()`.
pub const RAND_MAX: i64 = (1 << 31) - 1;

/// Random integer in `[min, max]`.
pub fn rand(min: i64, max: i64) -> Result<i64> {
    if min > max {
        return Err(KitError::invalid_argument("min cannot be greater than max"));
    }
    if max > RAND_MAX {
        return Err(KitError::invalid_argument(format!(
            "max cannot be greater than {}",
            RAND_MAX
        )));
    }
    if min == max {
        return Ok(min);
    }
    Ok(rand::thread_rng().gen_range(min..=max))
}

/// Random float in `[min, max)` rounded to `precision` decimals.
pub fn rand_decimals(min: f64, max: f64, precision: u32) -> f64 {
    let value = min + rand::thread_rng().gen::<f64>() * (max - min);
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

/// Round to `decimals` places.
pub fn floor(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Round to `decimals` places and keep trailing zeros, e.g. `3.1` -> `"3.10"`.
pub fn floor_with_zero_pad(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

pub fn abs(number: f64) -> f64 {
    number.abs()
}

/// Without a precision, round half up to an integer. With one, round to that many places.
pub fn round(value: f64, precision: Option<usize>) -> f64 {
    match precision {
        Some(p) => floor(value, p),
        None => (value + 0.5).floor(),
    }
}

pub fn ceil(value: f64) -> f64 {
    value.ceil()
}

fn at_least_two(nums: &[f64]) -> Result<()> {
    if nums.len() < 2 {
        return Err(KitError::invalid_argument("at least two numbers are required"));
    }
    Ok(())
}

pub fn max(nums: &[f64]) -> Result<f64> {
    at_least_two(nums)?;
    Ok(nums.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn min(nums: &[f64]) -> Result<f64> {
    at_least_two(nums)?;
    Ok(nums.iter().copied().fold(f64::INFINITY, f64::min))
}

fn check_radix(radix: u32) -> Result<()> {
    if !(2..=36).contains(&radix) {
        return Err(KitError::invalid_argument(format!("radix {} not in 2..=36", radix)));
    }
    Ok(())
}

fn parse_radix(number: &str, radix: u32) -> Result<i64> {
    check_radix(radix)?;
    i64::from_str_radix(number, radix)
        .map_err(|e| KitError::parse(format!("'{}' in base {}: {}", number, radix, e)))
}

fn format_radix(number: i64, radix: u32) -> String {
    if number == 0 {
        return "0".to_string();
    }
    let mut magnitude = number.unsigned_abs();
    let mut digits = Vec::new();
    while magnitude > 0 {
        let digit = (magnitude % radix as u64) as u32;
        digits.push(std::char::from_digit(digit, radix).unwrap_or('?'));
        magnitude /= radix as u64;
    }
    if number < 0 {
        digits.push('-');
    }
    digits.iter().rev().collect()
}

pub fn decbin(number: i64) -> String {
    format_radix(number, 2)
}

pub fn bindec(binary: &str) -> Result<String> {
    Ok(parse_radix(binary, 2)?.to_string())
}

/// Hexadecimal text to binary text.
pub fn hex2bin(hex: &str) -> Result<String> {
    Ok(format_radix(parse_radix(hex, 16)?, 2))
}

/// Binary text to hexadecimal text.
pub fn bin2hex(binary: &str) -> Result<String> {
    Ok(format_radix(parse_radix(binary, 2)?, 16))
}

pub fn dechex(number: i64) -> String {
    format_radix(number, 16)
}

pub fn hexdec(hex: &str) -> Result<i64> {
    parse_radix(hex, 16)
}

pub fn decoct(number: i64) -> String {
    format_radix(number, 8)
}

pub fn octdec(octal: &str) -> Result<i64> {
    parse_radix(octal, 8)
}

pub fn base_convert(number: &str, from_base: u32, to_base: u32) -> Result<String> {
    check_radix(to_base)?;
    Ok(format_radix(parse_radix(number, from_base)?, to_base))
}

/// `prefix` followed by 13 hex digits derived from the current time.
pub fn uniqid(prefix: &str) -> String {
    let now = chrono::Utc::now();
    let nanos = now.timestamp_nanos_opt().unwrap_or_default();
    format!("{}{:08x}{:05x}", prefix, now.timestamp(), nanos % 0x100000)
}

/// Group thousands and fix the decimals: `number_format(1234.567, 2, ".", ",")` is `1,234.57`.
pub fn number_format(number: f64, decimals: usize, dec_point: &str, thousands_sep: &str) -> String {
    let negative = number < 0.0;
    let fixed = format!("{:.*}", decimals, number.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 * thousands_sep.len());
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push_str(thousands_sep);
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push_str(dec_point);
        grouped.push_str(frac);
    }
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_bounds() {
        for _ in 0..100 {
            let v = rand(3, 7).unwrap();
            assert!((3..=7).contains(&v));
        }
        assert_eq!(rand(5, 5).unwrap(), 5);
        assert!(rand(6, 5).is_err());
        assert!(rand(0, RAND_MAX + 1).is_err());

        let d = rand_decimals(1.0, 2.0, 2);
        assert!((1.0..=2.0).contains(&d));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(floor(3.14159, 2), 3.14);
        assert_eq!(floor_with_zero_pad(3.1, 2), "3.10");
        assert_eq!(floor_with_zero_pad(2.0, 4), "2.0000");
        assert_eq!(round(2.5, None), 3.0);
        assert_eq!(round(-2.5, None), -2.0);
        assert_eq!(round(3.14159, Some(3)), 3.142);
        assert_eq!(ceil(4.1), 5.0);
        assert_eq!(abs(-2.5), 2.5);
    }

    #[test]
    fn test_max_min() {
        assert_eq!(max(&[1.0, 9.5, 3.0]).unwrap(), 9.5);
        assert_eq!(min(&[1.0, -9.5, 3.0]).unwrap(), -9.5);
        assert!(max(&[1.0]).is_err());
        assert!(min(&[]).is_err());
    }

    #[test]
    fn test_base_conversion() {
        assert_eq!(decbin(10), "1010");
        assert_eq!(decbin(0), "0");
        assert_eq!(bindec("1010").unwrap(), "10");
        assert_eq!(hex2bin("ff").unwrap(), "11111111");
        assert_eq!(bin2hex("11111111").unwrap(), "ff");
        assert_eq!(dechex(-255), "-ff");
        assert_eq!(hexdec("1A").unwrap(), 26);
        assert_eq!(decoct(8), "10");
        assert_eq!(octdec("777").unwrap(), 511);
        assert_eq!(base_convert("zz", 36, 10).unwrap(), "1295");
        assert_eq!(base_convert("a37334", 16, 2).unwrap(), "101000110111001100110100");
        assert!(base_convert("10", 1, 10).is_err());
        assert!(base_convert("10", 10, 37).is_err());
        assert!(bindec("102").is_err());
    }

    #[test]
    fn test_uniqid() {
        let id = uniqid("order_");
        assert!(id.starts_with("order_"));
        assert_eq!(id.len(), "order_".len() + 13);
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number_format(1234.567, 2, ".", ","), "1,234.57");
        assert_eq!(number_format(1234567.891, 2, ",", "."), "1.234.567,89");
        assert_eq!(number_format(-1234.6, 0, ".", ","), "-1,235");
        assert_eq!(number_format(999.0, 1, ".", " "), "999.0");
        assert_eq!(number_format(1000000.0, 0, ".", ""), "1000000");
    }
}
