//! Syntactic validation of Extended Date/Time Format values.
//!
//! Covers level 0 (dates, date-times, intervals) and the level 1 features a
//! migration worksheet actually carries: `?` `~` `%` qualifiers, unspecified
//! digits (`201X`, `1985-XX`), seasons (`-21` .. `-24`), negative and
//! `Y`-prefixed long years, and open or unknown interval ends.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?[0-9X]{4})(?:-([0-9X]{2})(?:-([0-9X]{2}))?)?([?~%])?$").expect("valid regex")
});

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})(Z|[+-](\d{2})(?::?(\d{2}))?)?$")
        .expect("valid regex")
});

static LONG_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Y-?[1-9]\d{4,}$").expect("valid regex"));

/// Whether `value` is a valid EDTF literal.
pub fn is_valid(value: &str) -> bool {
    match value.split_once('/') {
        Some((start, end)) => is_valid_interval(start, end),
        None => is_valid_instant(value),
    }
}

fn is_valid_instant(value: &str) -> bool {
    LONG_YEAR.is_match(value) || is_valid_date_time(value) || parse_date(value).is_some()
}

fn is_valid_interval(start: &str, end: &str) -> bool {
    if end.contains('/') {
        return false;
    }
    let open = |side: &str| side.is_empty() || side == "..";
    match (open(start), open(end)) {
        (true, true) => false,
        (true, false) => parse_date(end).is_some(),
        (false, true) => parse_date(start).is_some(),
        (false, false) => match (parse_date(start), parse_date(end)) {
            (Some(a), Some(b)) => a.not_after(&b),
            _ => false,
        },
    }
}

fn is_valid_date_time(value: &str) -> bool {
    let Some(caps) = DATE_TIME.captures(value) else {
        return false;
    };
    let num = |i: usize| caps.get(i).map_or(0, |m| m.as_str().parse::<u32>().unwrap_or(99));
    let date_ok = caps[1]
        .parse::<i32>()
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, num(2), num(3)))
        .is_some();
    date_ok && num(4) < 24 && num(5) < 60 && num(6) < 60 && num(8) < 24 && num(9) < 60
}

/// A calendar point with unspecified (`X`) components left as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DatePoint {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
}

impl DatePoint {
    /// Ordering check at the coarsest precision both sides share.
    fn not_after(&self, other: &DatePoint) -> bool {
        let (Some(y1), Some(y2)) = (self.year, other.year) else {
            return true;
        };
        if y1 != y2 {
            return y1 < y2;
        }
        match (self.month, other.month) {
            // seasons do not order against months
            (Some(m1), Some(m2)) if m1 <= 12 && m2 <= 12 => match (self.day, other.day) {
                _ if m1 != m2 => m1 < m2,
                (Some(d1), Some(d2)) => d1 <= d2,
                _ => true,
            },
            _ => true,
        }
    }
}

fn parse_date(value: &str) -> Option<DatePoint> {
    let caps = DATE.captures(value)?;
    let year_text = &caps[1];
    let month_text = caps.get(2).map(|m| m.as_str());
    let day_text = caps.get(3).map(|m| m.as_str());

    let year = parse_year(year_text)?;

    let month = match month_text {
        None => None,
        Some("XX") => None,
        Some(text) => {
            let month: u32 = text.parse().ok()?;
            let season = (21..=24).contains(&month);
            if !(1..=12).contains(&month) && !(season && day_text.is_none()) {
                return None;
            }
            Some(month)
        }
    };

    // 201X-05 is not a thing: once a component is unspecified, everything after it is too
    if year.is_none() && month.is_some() {
        return None;
    }

    let day = match day_text {
        None => None,
        Some("XX") => None,
        Some(text) => {
            let day: u32 = text.parse().ok()?;
            match (year, month) {
                (Some(y), Some(m)) => {
                    NaiveDate::from_ymd_opt(y, m, day)?;
                }
                _ => {
                    if !(1..=31).contains(&day) || month_text != Some("XX") || year.is_none() {
                        return None;
                    }
                }
            }
            Some(day)
        }
    };

    Some(DatePoint { year, month, day })
}

/// `Some(None)` for years with unspecified digits, which may only trail.
fn parse_year(text: &str) -> Option<Option<i32>> {
    if !text.contains('X') {
        let year: i32 = text.parse().ok()?;
        if text.starts_with('-') && year == 0 {
            return None;
        }
        return Some(Some(year));
    }
    if text.starts_with('-') {
        return None;
    }
    let digits = text.trim_end_matches('X');
    let unspecified = text.len() - digits.len();
    if digits.contains('X') || unspecified > 2 {
        return None;
    }
    Some(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level0_dates() {
        assert!(is_valid("1990"));
        assert!(is_valid("1990-02"));
        assert!(is_valid("1990-02-08"));
        assert!(is_valid("2000-02-29"));
        assert!(!is_valid("1990-02-29"));
        assert!(!is_valid("1990-13"));
        assert!(!is_valid("90"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_date_times() {
        assert!(is_valid("2001-02-03T09:30:01"));
        assert!(is_valid("2004-01-01T10:10:10Z"));
        assert!(is_valid("2004-01-01T10:10:10+05:00"));
        assert!(!is_valid("2004-01-01T25:10:10"));
    }

    #[test]
    fn test_intervals() {
        assert!(is_valid("1964/2008"));
        assert!(is_valid("2004-02-01/2005-02-08"));
        assert!(is_valid("2010-11/2010-12"));
        assert!(is_valid("../1970"));
        assert!(is_valid("1985/"));
        assert!(!is_valid("2008/1964"));
        assert!(!is_valid("../.."));
        assert!(!is_valid("1990/1991/1992"));
    }

    #[test]
    fn test_level1_features() {
        assert!(is_valid("1984?"));
        assert!(is_valid("1950~"));
        assert!(is_valid("2004-06~"));
        assert!(is_valid("2004-06-11%"));
        assert!(is_valid("201X"));
        assert!(is_valid("20XX"));
        assert!(is_valid("2004-XX"));
        assert!(is_valid("1985-04-XX"));
        assert!(is_valid("1985-XX-XX"));
        assert!(is_valid("2005-24"));
        assert!(is_valid("-1970"));
        assert!(is_valid("Y170000002"));
    }

    #[test]
    fn test_level1_rejections() {
        assert!(!is_valid("1XXX"));
        assert!(!is_valid("19X5"));
        assert!(!is_valid("201X-05"));
        assert!(!is_valid("2005-25"));
        assert!(!is_valid("2005-21-01"));
        assert!(!is_valid("1990-??"));
        assert!(!is_valid("-0000"));
        assert!(!is_valid("Y1700"));
    }
}
