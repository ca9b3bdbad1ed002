//! Operating hours shared by the site config and per-location data.
//!
//! Hours are stored as one entry per day with `HH:MM` 24-hour times. Two
//! renderings exist: the compact Schema.org `openingHours` form used in
//! JSON-LD (`"Mo-Fr 09:00-17:00"`), and a human-readable list for pages
//! (`"Monday: 9:00 AM - 5:00 PM"`).

use crate::validation::{Validate, Validator};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// `HH:MM` from `00:00` to `23:59`.
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern is valid"));

pub fn is_valid_time(value: &str) -> bool {
    TIME_REGEX.is_match(value)
}

/// Day of the week, named as in Schema.org.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Two-letter Schema.org abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Mo",
            DayOfWeek::Tuesday => "Tu",
            DayOfWeek::Wednesday => "We",
            DayOfWeek::Thursday => "Th",
            DayOfWeek::Friday => "Fr",
            DayOfWeek::Saturday => "Sa",
            DayOfWeek::Sunday => "Su",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opening hours for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatingHoursEntry {
    #[serde(alias = "dayOfWeek")]
    pub day_of_week: DayOfWeek,
    pub open: String,
    pub close: String,
}

impl Validate for OperatingHoursEntry {
    fn validate(&self, v: &mut Validator) {
        v.check(
            "open",
            is_valid_time(&self.open),
            format!(
                "Invalid open time \"{}\" for {}. Must be in HH:MM format (00:00-23:59)",
                self.open, self.day_of_week
            ),
        );
        v.check(
            "close",
            is_valid_time(&self.close),
            format!(
                "Invalid close time \"{}\" for {}. Must be in HH:MM format (00:00-23:59)",
                self.close, self.day_of_week
            ),
        );
    }
}

/// Format hours for Schema.org `openingHours`.
///
/// Adjacent entries sharing the same open/close times collapse into one
/// range spanning the first and last day of the run:
///
/// ```text
/// Mon..Fri 09:00-17:00, Sat 10:00-14:00  →  ["Mo-Fr 09:00-17:00", "Sa 10:00-14:00"]
/// ```
pub fn format_schema_org_hours(hours: &[OperatingHoursEntry]) -> Vec<String> {
    let mut groups: Vec<(Vec<DayOfWeek>, &str, &str)> = Vec::new();

    for entry in hours {
        let same_hours = groups
            .last()
            .is_some_and(|(_, open, close)| *open == entry.open && *close == entry.close);
        if same_hours && let Some((days, _, _)) = groups.last_mut() {
            days.push(entry.day_of_week);
        } else {
            groups.push((
                vec![entry.day_of_week],
                entry.open.as_str(),
                entry.close.as_str(),
            ));
        }
    }

    groups
        .into_iter()
        .map(|(days, open, close)| {
            let span = match (days.first(), days.last()) {
                (Some(first), Some(last)) if days.len() > 1 => {
                    format!("{}-{}", first.abbreviation(), last.abbreviation())
                }
                (Some(only), _) => only.abbreviation().to_string(),
                _ => String::new(),
            };
            format!("{span} {open}-{close}")
        })
        .collect()
}

/// Format hours for display, e.g. `"Monday: 9:00 AM - 5:00 PM"`.
pub fn format_display_hours(hours: &[OperatingHoursEntry]) -> Vec<String> {
    hours
        .iter()
        .map(|entry| {
            format!(
                "{}: {} - {}",
                entry.day_of_week,
                to_12_hour(&entry.open),
                to_12_hour(&entry.close)
            )
        })
        .collect()
}

/// `"17:05"` → `"5:05 PM"`. Midnight and noon read as 12.
fn to_12_hour(time24: &str) -> String {
    let (h, m) = time24.split_once(':').unwrap_or((time24, "0"));
    let hours: u32 = h.parse().unwrap_or(0);
    let minutes: u32 = m.parse().unwrap_or(0);
    let period = if hours >= 12 { "PM" } else { "AM" };
    let hours12 = match hours % 12 {
        0 => 12,
        n => n,
    };
    format!("{hours12}:{minutes:02} {period}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: DayOfWeek, open: &str, close: &str) -> OperatingHoursEntry {
        OperatingHoursEntry {
            day_of_week: day,
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    fn weekday_hours() -> Vec<OperatingHoursEntry> {
        let mut hours: Vec<_> = DayOfWeek::ALL[..5]
            .iter()
            .map(|&d| entry(d, "09:00", "17:00"))
            .collect();
        hours.push(entry(DayOfWeek::Saturday, "10:00", "14:00"));
        hours
    }

    #[test]
    fn valid_times() {
        for t in ["00:00", "09:30", "12:00", "19:59", "23:59"] {
            assert!(is_valid_time(t), "{t} should be valid");
        }
    }

    #[test]
    fn invalid_times() {
        for t in ["24:00", "9:00", "09:60", "0900", "", "09:00:00", "ab:cd"] {
            assert!(!is_valid_time(t), "{t} should be invalid");
        }
    }

    #[test]
    fn non_ascii_digits_rejected() {
        for t in ["0\u{0669}:00", "\u{0661}\u{0662}:30", "09:\u{0663}0", "\u{FF10}9:00"] {
            assert!(!is_valid_time(t), "{t} should be invalid");
        }
    }

    #[test]
    fn schema_org_groups_weekdays() {
        assert_eq!(
            format_schema_org_hours(&weekday_hours()),
            vec!["Mo-Fr 09:00-17:00", "Sa 10:00-14:00"]
        );
    }

    #[test]
    fn schema_org_single_day() {
        let hours = vec![entry(DayOfWeek::Sunday, "11:00", "15:00")];
        assert_eq!(format_schema_org_hours(&hours), vec!["Su 11:00-15:00"]);
    }

    #[test]
    fn schema_org_does_not_merge_non_adjacent_runs() {
        let hours = vec![
            entry(DayOfWeek::Monday, "09:00", "17:00"),
            entry(DayOfWeek::Tuesday, "10:00", "12:00"),
            entry(DayOfWeek::Wednesday, "09:00", "17:00"),
        ];
        assert_eq!(
            format_schema_org_hours(&hours),
            vec!["Mo 09:00-17:00", "Tu 10:00-12:00", "We 09:00-17:00"]
        );
    }

    #[test]
    fn schema_org_empty() {
        assert!(format_schema_org_hours(&[]).is_empty());
    }

    #[test]
    fn display_hours_use_12_hour_clock() {
        let hours = vec![
            entry(DayOfWeek::Monday, "09:00", "17:00"),
            entry(DayOfWeek::Friday, "00:30", "12:05"),
        ];
        assert_eq!(
            format_display_hours(&hours),
            vec![
                "Monday: 9:00 AM - 5:00 PM",
                "Friday: 12:30 AM - 12:05 PM"
            ]
        );
    }

    #[test]
    fn entry_validation_reports_both_times() {
        let mut v = Validator::new();
        v.at(0, |v| entry(DayOfWeek::Monday, "9:00", "25:00").validate(v));
        let paths: Vec<&str> = v.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["0.open", "0.close"]);
        assert!(v.issues()[0].message.contains("Invalid open time \"9:00\" for Monday"));
    }

    #[test]
    fn day_parses_from_name() {
        let e: OperatingHoursEntry =
            serde_json::from_str(r#"{"dayOfWeek":"Saturday","open":"10:00","close":"14:00"}"#)
                .unwrap();
        assert_eq!(e.day_of_week, DayOfWeek::Saturday);
    }

    #[test]
    fn unknown_day_rejected() {
        let result: Result<OperatingHoursEntry, _> =
            serde_json::from_str(r#"{"dayOfWeek":"Funday","open":"10:00","close":"14:00"}"#);
        assert!(result.is_err());
    }
}
