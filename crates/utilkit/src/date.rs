//! Calendar helpers over `chrono` naive dates.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

/// Tokens understood by [`format_date`], longest first so `YYYY` wins over
/// `YY` and `MM` over `M`.
const TOKENS: &[&str] = &["YYYY", "YY", "MM", "DD", "HH", "mm", "ss", "M", "D", "H"];

/// Format `date` with a pattern such as `"DD/MM/YYYY HH:mm"`.
///
/// | token | meaning |
/// |-------|---------|
/// | `YYYY` / `YY` | four / two digit year |
/// | `MM` / `M` | month, padded / unpadded |
/// | `DD` / `D` | day of month, padded / unpadded |
/// | `HH` / `H` | hour (24h), padded / unpadded |
/// | `mm` | minutes, padded |
/// | `ss` | seconds, padded |
///
/// Any other text is copied as is.
pub fn format_date(date: NaiveDateTime, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    while !rest.is_empty() {
        match TOKENS.iter().find(|t| rest.starts_with(**t)) {
            Some(token) => {
                out.push_str(&render_token(&date, token));
                rest = &rest[token.len()..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    out.push(c);
                }
                rest = chars.as_str();
            }
        }
    }
    out
}

fn render_token(date: &NaiveDateTime, token: &str) -> String {
    match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "HH" => format!("{:02}", date.hour()),
        "H" => date.hour().to_string(),
        "mm" => format!("{:02}", date.minute()),
        "ss" => format!("{:02}", date.second()),
        other => other.to_string(),
    }
}

/// Shift `date` by `days` (negative moves backwards). `None` on overflow.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_tokens() {
        let christmas = ymd(2023, 12, 25).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(format_date(christmas, "DD/MM/YYYY"), "25/12/2023");

        let morning = ymd(2024, 3, 5).and_hms_opt(7, 4, 9).unwrap();
        assert_eq!(format_date(morning, "YYYY-MM-DD HH:mm:ss"), "2024-03-05 07:04:09");
        assert_eq!(format_date(morning, "D.M.YY H"), "5.3.24 7");
        assert_eq!(format_date(morning, "at HH:mm"), "at 07:04");
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(add_days(ymd(2024, 2, 28), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_days(ymd(2024, 1, 1), -1), Some(ymd(2023, 12, 31)));
        assert_eq!(days_between(ymd(2024, 1, 1), ymd(2024, 3, 1)), 60);
        assert_eq!(days_between(ymd(2024, 3, 1), ymd(2024, 1, 1)), -60);
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }
}
