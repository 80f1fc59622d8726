//! Event dates: categories, semesters and parsing of user input.
//!
//! Dates are plain calendar dates (`NaiveDate`). There is no time of day
//! and no timezone anywhere in the calendar so a day never shifts.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, Error, Result, anyhow, bail};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateCategory {
    Class,
    Lab,
    Quiz,
    Exam,
    Holiday,
}

impl DateCategory {
    /// Order of the legend entries.
    pub const LEGEND_ORDER: [DateCategory; 5] = [
        DateCategory::Class,
        DateCategory::Lab,
        DateCategory::Exam,
        DateCategory::Holiday,
        DateCategory::Quiz,
    ];

    /// Default order in which cell styles are applied. Later wins.
    pub const OVERLAY_ORDER: [DateCategory; 4] = [
        DateCategory::Class,
        DateCategory::Lab,
        DateCategory::Exam,
        DateCategory::Holiday,
    ];

    /// Whether the category recolors day cells (everything but quizzes).
    pub fn styles_cells(self) -> bool {
        !matches!(self, DateCategory::Quiz)
    }
}

impl fmt::Display for DateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateCategory::Class => "class",
            DateCategory::Lab => "lab",
            DateCategory::Quiz => "quiz",
            DateCategory::Exam => "exam",
            DateCategory::Holiday => "holiday",
        };
        write!(f, "{}", name)
    }
}

/// A four month teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    Winter,
    Spring,
    Fall,
}

impl Semester {
    /// 1-based months covered by the semester.
    pub fn months(self) -> RangeInclusive<u32> {
        match self {
            Semester::Winter => 1..=4,
            Semester::Spring => 5..=8,
            Semester::Fall => 9..=12,
        }
    }
}

impl FromStr for Semester {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "winter" => Ok(Semester::Winter),
            "s" | "spring" => Ok(Semester::Spring),
            "f" | "fall" => Ok(Semester::Fall),
            other => Err(anyhow!(
                "Unknown semester \"{}\" (expected W, S or F)",
                other
            )),
        }
    }
}

/// Restrict `dates` to the given year and 1-based month.
///
/// Absent input stays absent so callers can tell "no list given" from
/// "no date this month".
pub fn classify(dates: Option<&[NaiveDate]>, year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    dates.map(|dates| {
        dates
            .iter()
            .filter(|d| d.year() == year && d.month() == month)
            .copied()
            .collect()
    })
}

/// Parse a comma separated list of `YYYY-MM-DD` dates. Blank items are
/// skipped so an empty string is an empty list.
pub fn parse_date_list(raw: &str) -> Result<Vec<NaiveDate>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            NaiveDate::parse_from_str(item, DATE_FORMAT)
                .with_context(|| format!("Invalid date \"{}\" (expected YYYY-MM-DD)", item))
        })
        .collect()
}

pub fn parse_year(raw: &str) -> Result<i32> {
    let year: i32 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid year \"{}\"", raw.trim()))?;
    if !(1..=9999).contains(&year) {
        bail!("Year {} is out of range (1-9999)", year);
    }
    Ok(year)
}

/// Date lists per category. `None` means the list was not provided.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDates {
    pub class: Option<Vec<NaiveDate>>,
    pub lab: Option<Vec<NaiveDate>>,
    pub exam: Option<Vec<NaiveDate>>,
    pub quiz: Option<Vec<NaiveDate>>,
    pub holiday: Option<Vec<NaiveDate>>,
}

impl CategoryDates {
    pub fn get(&self, category: DateCategory) -> Option<&[NaiveDate]> {
        let dates = match category {
            DateCategory::Class => &self.class,
            DateCategory::Lab => &self.lab,
            DateCategory::Exam => &self.exam,
            DateCategory::Quiz => &self.quiz,
            DateCategory::Holiday => &self.holiday,
        };
        dates.as_deref()
    }

    /// Dates of the category, empty when absent.
    pub fn dates(&self, category: DateCategory) -> &[NaiveDate] {
        self.get(category).unwrap_or_default()
    }

    /// Every list classified to one month.
    pub fn for_month(&self, year: i32, month: u32) -> CategoryDates {
        CategoryDates {
            class: classify(self.class.as_deref(), year, month),
            lab: classify(self.lab.as_deref(), year, month),
            exam: classify(self.exam.as_deref(), year, month),
            quiz: classify(self.quiz.as_deref(), year, month),
            holiday: classify(self.holiday.as_deref(), year, month),
        }
    }
}

/// Calendar request as typed by a user: everything is a string.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCalendarInput {
    pub semester: String,
    pub year: String,
    #[serde(default)]
    pub classes: Option<String>,
    #[serde(default)]
    pub labs: Option<String>,
    #[serde(default)]
    pub exams: Option<String>,
    #[serde(default)]
    pub quizzes: Option<String>,
    #[serde(default)]
    pub holidays: Option<String>,
}

/// Validated calendar request.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarInput {
    pub semester: Semester,
    pub year: i32,
    pub dates: CategoryDates,
}

impl TryFrom<RawCalendarInput> for CalendarInput {
    type Error = Error;

    fn try_from(raw: RawCalendarInput) -> Result<Self, Self::Error> {
        let parse = |field: &str, value: Option<String>| -> Result<Option<Vec<NaiveDate>>> {
            value
                .map(|v| parse_date_list(&v).with_context(|| format!("Invalid {} dates", field)))
                .transpose()
        };

        Ok(CalendarInput {
            semester: raw.semester.parse()?,
            year: parse_year(&raw.year)?,
            dates: CategoryDates {
                class: parse("class", raw.classes)?,
                lab: parse("lab", raw.labs)?,
                exam: parse("exam", raw.exams)?,
                quiz: parse("quiz", raw.quizzes)?,
                holiday: parse("holiday", raw.holidays)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_keeps_matching_month_only() {
        let dates = vec![
            date(2024, 1, 10),
            date(2024, 2, 10),
            date(2023, 1, 10),
            date(2024, 1, 31),
        ];
        assert_eq!(
            classify(Some(dates.as_slice()), 2024, 1),
            Some(vec![date(2024, 1, 10), date(2024, 1, 31)])
        );
        assert_eq!(classify(Some(dates.as_slice()), 2024, 3), Some(vec![]));
    }

    #[test]
    fn test_classify_preserves_absence() {
        assert_eq!(classify(None, 2024, 1), None);
    }

    #[test]
    fn test_classify_is_pure() {
        let dates = vec![date(2024, 1, 1), date(2024, 1, 2)];
        assert_eq!(
            classify(Some(dates.as_slice()), 2024, 1),
            classify(Some(dates.as_slice()), 2024, 1)
        );
    }

    #[test]
    fn test_parse_date_list() {
        assert_eq!(
            parse_date_list("2024-01-10, 2024-01-17,2024-01-24").unwrap(),
            vec![date(2024, 1, 10), date(2024, 1, 17), date(2024, 1, 24)]
        );
        assert!(parse_date_list("").unwrap().is_empty());
        assert!(parse_date_list(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_date_list_rejects_malformed() {
        let err = parse_date_list("2024-01-10, 2024-13-01").unwrap_err();
        assert!(err.to_string().contains("2024-13-01"));
        assert!(parse_date_list("January 10").is_err());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(" 2024 ").unwrap(), 2024);
        assert!(parse_year("twenty").is_err());
        assert!(parse_year("0").is_err());
        assert!(parse_year("10000").is_err());
    }

    #[test]
    fn test_semester() {
        assert_eq!("W".parse::<Semester>().unwrap(), Semester::Winter);
        assert_eq!("spring".parse::<Semester>().unwrap(), Semester::Spring);
        assert_eq!("f".parse::<Semester>().unwrap(), Semester::Fall);
        assert!("summer".parse::<Semester>().is_err());
        assert_eq!(Semester::Winter.months(), 1..=4);
        assert_eq!(Semester::Spring.months(), 5..=8);
        assert_eq!(Semester::Fall.months(), 9..=12);
    }

    #[test]
    fn test_calendar_input_from_raw() {
        let raw = RawCalendarInput {
            semester: String::from("W"),
            year: String::from("2024"),
            classes: Some(String::from("2024-01-10, 2024-01-17")),
            holidays: Some(String::from("2024-01-01")),
            ..Default::default()
        };
        let input = CalendarInput::try_from(raw).unwrap();
        assert_eq!(input.semester, Semester::Winter);
        assert_eq!(input.year, 2024);
        assert_eq!(input.dates.dates(DateCategory::Class).len(), 2);
        assert_eq!(input.dates.get(DateCategory::Lab), None);
        assert_eq!(input.dates.dates(DateCategory::Lab), &[] as &[NaiveDate]);
    }

    #[test]
    fn test_calendar_input_reports_field() {
        let raw = RawCalendarInput {
            semester: String::from("F"),
            year: String::from("2024"),
            exams: Some(String::from("2024-10-xx")),
            ..Default::default()
        };
        let err = CalendarInput::try_from(raw).unwrap_err();
        assert!(format!("{:#}", err).contains("exam"));
    }
}
