//! Repair of free-text dates into EDTF.
//!
//! [`DateNormalizer::normalize`] runs a fixed cascade; the first rule that
//! recognizes the text decides the result:
//!
//! 1. literal corrections for known malformed values (the cascade continues
//!    on the corrected text)
//! 2. `;` and `,` are stripped
//! 3. `January 1973` -> `1973-01`
//! 4. `Jan 1973` / `Sept. 1973` -> `1973-01`
//! 5. `November-December 2010` -> `2010-11/2010-12`
//! 6. `1982-83` -> `1982/1983`
//! 7. `February 27 2010` -> `2010-02-27`
//! 8. `1949-1965` -> `1949/1965`
//! 9. `ca. 1950` -> `1950~`
//! 10. anything already valid EDTF is kept
//!
//! Every value produced by a rule is checked with [`edtf::is_valid`]. When no
//! rule produces a valid value the caller keeps the raw input.

pub mod edtf;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{4})$").expect("valid regex"));

static SHORT_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\.?\s*(\d{4})$").expect("valid regex"));

static MONTH_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]+)\.?\s*-\s*([A-Za-z]+)\.?\s*(\d{4})$").expect("valid regex")
});

static SHORT_YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^((?:18|19|20)\d{2})-(\d{2})$").expect("valid regex"));

static FULL_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{1,2})\s*(\d{4})$",
    )
    .expect("valid regex")
});

static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("valid regex"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Known malformed values seen in the legacy repository.
const CORRECTIONS: &[(&str, &str)] = &[
    ("8 Feb 1990", "1990-02-08"),
    ("Sept 1993", "1993-09"),
    ("Winter 2005", "2005-24"),
    ("November. 2008", "2008-11"),
    ("Between 1949 and 1965", "1949-1965"),
    ("Between 1953 and 1966", "1953-1966"),
    ("[before 1970]", "../1970"),
];

/// What the full-month rule does with `<Word> YYYY` when the word is not a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownMonthPolicy {
    /// The rule does not apply; later rules get a chance.
    #[default]
    FallThrough,
    /// Legacy behaviour: emit `YYYY-??`, which is not valid EDTF.
    Sentinel,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("'{0}' matches no date pattern and is not valid EDTF")]
    Unrecognized(String),
    #[error("'{0}' is not a real calendar date")]
    InvalidCalendarDate(String),
}

#[derive(Debug, Clone)]
pub struct DateNormalizer {
    corrections: BTreeMap<String, String>,
    unknown_month: UnknownMonthPolicy,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        DateNormalizer::new(UnknownMonthPolicy::default(), &BTreeMap::new())
    }
}

impl DateNormalizer {
    /// Built-in corrections, overridden and extended by `extra`.
    pub fn new(unknown_month: UnknownMonthPolicy, extra: &BTreeMap<String, String>) -> Self {
        let mut corrections: BTreeMap<String, String> = CORRECTIONS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        corrections.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        DateNormalizer {
            corrections,
            unknown_month,
        }
    }

    /// Normalize one raw date. On error the caller should keep `raw` as it was.
    pub fn normalize(&self, raw: &str) -> Result<String, DateError> {
        let trimmed = raw.trim();
        let corrected = match self.corrections.get(trimmed) {
            Some(fixed) if edtf::is_valid(fixed) => return Ok(fixed.clone()),
            Some(fixed) => fixed.as_str(),
            None => trimmed,
        };

        let stripped: String = corrected.chars().filter(|c| !matches!(c, ';' | ',')).collect();
        let date = stripped.trim();

        let unrecognized = || DateError::Unrecognized(raw.to_string());
        let conforming = |value: String| {
            if edtf::is_valid(&value) {
                Ok(value)
            } else {
                Err(unrecognized())
            }
        };

        if let Some(caps) = MONTH_YEAR.captures(date) {
            match (full_month_number(&caps[1]), self.unknown_month) {
                (Some(month), _) => return conforming(format!("{}-{:02}", &caps[2], month)),
                (None, UnknownMonthPolicy::Sentinel) => return Ok(format!("{}-??", &caps[2])),
                (None, UnknownMonthPolicy::FallThrough) => {}
            }
        }

        if let Some(caps) = SHORT_MONTH_YEAR.captures(date) {
            if let Some(month) = month_number(&caps[1]) {
                return conforming(format!("{}-{:02}", &caps[2], month));
            }
        }

        if let Some(caps) = MONTH_SPAN.captures(date) {
            if let (Some(first), Some(second)) = (month_number(&caps[1]), month_number(&caps[2])) {
                let year = &caps[3];
                return conforming(format!("{}-{:02}/{}-{:02}", year, first, year, second));
            }
        }

        if let Some(caps) = SHORT_YEAR_RANGE.captures(date) {
            let start = &caps[1];
            let century = if start == "1999" { "20" } else { &start[..2] };
            let end = format!("{}{}", century, &caps[2]);
            if end.as_str() > start {
                return conforming(format!("{}/{}", start, end));
            }
        }

        if let Some(caps) = FULL_DATE.captures(date) {
            let invalid = || DateError::InvalidCalendarDate(raw.to_string());
            let month = full_month_number(&caps[1]).ok_or_else(invalid)?;
            let mut day: u32 = caps[2].parse().map_err(|_| invalid())?;
            let year: i32 = caps[3].parse().map_err(|_| invalid())?;
            // 1990 was not a leap year; this one slipped into the catalogue
            if (year, month, day) == (1990, 2, 29) {
                day = 28;
            }
            let parsed = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
            return conforming(parsed.format("%Y-%m-%d").to_string());
        }

        if let Some(caps) = YEAR_RANGE.captures(date) {
            return conforming(format!("{}/{}", &caps[1], &caps[2]));
        }

        if date.contains("ca.") {
            let year = date
                .split_whitespace()
                .last()
                .unwrap_or_default()
                .trim_start_matches("ca.");
            return conforming(format!("{}~", year));
        }

        if edtf::is_valid(date) {
            return Ok(date.to_string());
        }

        Err(unrecognized())
    }
}

/// Month number for a full English month name.
fn full_month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Month number for a full name, a three-letter abbreviation or `Sept`.
fn month_number(name: &str) -> Option<u32> {
    if let Some(month) = full_month_number(name) {
        return Some(month);
    }
    if name.eq_ignore_ascii_case("sept") {
        return Some(9);
    }
    if name.len() != 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m[..3].eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Normalize with the built-in corrections and the default month policy.
pub fn normalize(raw: &str) -> Result<String, DateError> {
    DateNormalizer::default().normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_corrections() {
        assert_eq!(normalize("8 Feb 1990").unwrap(), "1990-02-08");
        assert_eq!(normalize("Sept 1993").unwrap(), "1993-09");
        assert_eq!(normalize("Winter 2005").unwrap(), "2005-24");
        assert_eq!(normalize("November. 2008").unwrap(), "2008-11");
        assert_eq!(normalize("[before 1970]").unwrap(), "../1970");
    }

    #[test]
    fn test_corrections_continue_through_cascade() {
        assert_eq!(normalize("Between 1949 and 1965").unwrap(), "1949/1965");
        assert_eq!(normalize("Between 1953 and 1966").unwrap(), "1953/1966");
    }

    #[test]
    fn test_month_year() {
        assert_eq!(normalize("January 1973").unwrap(), "1973-01");
        assert_eq!(normalize("December, 2001").unwrap(), "2001-12");
        assert_eq!(normalize("  March 1990; ").unwrap(), "1990-03");
    }

    #[test]
    fn test_short_month_year() {
        assert_eq!(normalize("Jan 1999").unwrap(), "1999-01");
        assert_eq!(normalize("Oct. 1985").unwrap(), "1985-10");
        assert_eq!(normalize("Sept. 1993").unwrap(), "1993-09");
    }

    #[test]
    fn test_unknown_month_policies() {
        assert!(matches!(
            normalize("Spring 1990"),
            Err(DateError::Unrecognized(_))
        ));

        let legacy = DateNormalizer::new(UnknownMonthPolicy::Sentinel, &BTreeMap::new());
        assert_eq!(legacy.normalize("Spring 1990").unwrap(), "1990-??");
        // the sentinel rule runs before the abbreviation rule
        assert_eq!(legacy.normalize("Jan 1999").unwrap(), "1999-??");
        assert_eq!(legacy.normalize("January 1999").unwrap(), "1999-01");
    }

    #[test]
    fn test_month_span() {
        assert_eq!(
            normalize("November-December, 2010").unwrap(),
            "2010-11/2010-12"
        );
        assert_eq!(normalize("Jan-Mar 1971").unwrap(), "1971-01/1971-03");
        assert!(normalize("December-January 2010").is_err());
    }

    #[test]
    fn test_two_digit_year_range() {
        assert_eq!(normalize("1982-83").unwrap(), "1982/1983");
        assert_eq!(normalize("1999-00").unwrap(), "1999/2000");
        // only 1999 rolls over; anything else that would run backwards is not a range
        assert!(normalize("1899-95").is_err());
    }

    #[test]
    fn test_two_digit_range_wins_over_month_and_season_reading() {
        assert_eq!(normalize("1911-12").unwrap(), "1911/1912");
        assert_eq!(normalize("1901-02").unwrap(), "1901/1902");
        assert_eq!(normalize("1920-21").unwrap(), "1920/1921");
        assert_eq!(normalize("1923-24").unwrap(), "1923/1924");
    }

    #[test]
    fn test_two_digit_range_leaves_year_month_alone() {
        assert_eq!(normalize("1990-05").unwrap(), "1990-05");
        assert_eq!(normalize("1990-05-12").unwrap(), "1990-05-12");
    }

    #[test]
    fn test_full_date() {
        assert_eq!(normalize("February 27, 2010").unwrap(), "2010-02-27");
        assert_eq!(normalize("July 4,1976").unwrap(), "1976-07-04");
        assert_eq!(normalize("February 29, 1990").unwrap(), "1990-02-28");
        assert_eq!(normalize("February 29, 2000").unwrap(), "2000-02-29");
        assert_eq!(
            normalize("February 30, 1990"),
            Err(DateError::InvalidCalendarDate("February 30, 1990".to_string()))
        );
    }

    #[test]
    fn test_year_range() {
        assert_eq!(normalize("1949-1965").unwrap(), "1949/1965");
        assert!(normalize("1965-1949").is_err());
    }

    #[test]
    fn test_circa() {
        assert_eq!(normalize("ca. 1950").unwrap(), "1950~");
        assert_eq!(normalize("ca.1950").unwrap(), "1950~");
        assert!(normalize("ca. 1950s").is_err());
    }

    #[test]
    fn test_valid_edtf_is_kept() {
        assert_eq!(normalize("1990").unwrap(), "1990");
        assert_eq!(normalize("1984?").unwrap(), "1984?");
        assert_eq!(normalize("1964/2008").unwrap(), "1964/2008");
    }

    #[test]
    fn test_unrecognized_reports_raw_value() {
        assert_eq!(
            normalize("sometime in spring"),
            Err(DateError::Unrecognized("sometime in spring".to_string()))
        );
        assert!(normalize("").is_err());
    }

    #[test]
    fn test_extra_corrections_override() {
        let mut extra = BTreeMap::new();
        extra.insert("Spring 1990".to_string(), "1990-21".to_string());
        extra.insert("Winter 2005".to_string(), "2005-12".to_string());
        let normalizer = DateNormalizer::new(UnknownMonthPolicy::FallThrough, &extra);
        assert_eq!(normalizer.normalize("Spring 1990").unwrap(), "1990-21");
        assert_eq!(normalizer.normalize("Winter 2005").unwrap(), "2005-12");
    }

    #[test]
    fn test_rule_output_is_always_valid_edtf() {
        let inputs = [
            "8 Feb 1990",
            "January 1973",
            "Jan 1999",
            "November-December, 2010",
            "1982-83",
            "1999-00",
            "February 27, 2010",
            "1949-1965",
            "ca. 1950",
            "Winter 2005",
            "[before 1970]",
        ];
        for input in inputs {
            let value = normalize(input).unwrap();
            assert!(edtf::is_valid(&value), "{} -> {}", input, value);
        }
    }
}
