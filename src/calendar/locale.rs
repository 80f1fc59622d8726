//! Month, weekday and legend labels.

use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};

use super::dates::DateCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLabels {
    pub class: String,
    pub lab: String,
    pub exam: String,
    pub holiday: String,
    pub quiz: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    /// January first.
    pub month_names: [String; 12],
    /// Sunday first, matching the weekday columns of the grid.
    pub weekday_names: [String; 7],
    pub legend: LegendLabels,
}

impl Labels {
    pub fn french() -> Self {
        Self {
            month_names: [
                "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet", "Août",
                "Septembre", "Octobre", "Novembre", "Décembre",
            ]
            .map(String::from),
            weekday_names: [
                "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
            ]
            .map(String::from),
            legend: LegendLabels {
                class: String::from("Cours"),
                lab: String::from("Laboratoire"),
                exam: String::from("Examen"),
                holiday: String::from("Congé férié"),
                quiz: String::from("Quiz"),
            },
        }
    }

    pub fn english() -> Self {
        Self {
            month_names: [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]
            .map(String::from),
            weekday_names: [
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]
            .map(String::from),
            legend: LegendLabels {
                class: String::from("Class"),
                lab: String::from("Lab"),
                exam: String::from("Exam"),
                holiday: String::from("Holiday"),
                quiz: String::from("Quiz"),
            },
        }
    }

    /// Name of a 1-based month, `None` outside `1..=12`.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.month_names.get(index).map(String::as_str)
    }

    pub fn legend_label(&self, category: DateCategory) -> &str {
        match category {
            DateCategory::Class => &self.legend.class,
            DateCategory::Lab => &self.legend.lab,
            DateCategory::Exam => &self.legend.exam,
            DateCategory::Holiday => &self.legend.holiday,
            DateCategory::Quiz => &self.legend.quiz,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::french()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    French,
    English,
}

impl Language {
    pub fn labels(self) -> Labels {
        match self {
            Language::French => Labels::french(),
            Language::English => Labels::english(),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "french" | "français" => Ok(Language::French),
            "en" | "english" => Ok(Language::English),
            other => Err(anyhow!("Unsupported language \"{}\" (expected fr or en)", other)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::French => write!(f, "fr"),
            Language::English => write!(f, "en"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_is_one_based() {
        let labels = Labels::french();
        assert_eq!(labels.month_name(1), Some("Janvier"));
        assert_eq!(labels.month_name(12), Some("Décembre"));
        assert_eq!(labels.month_name(0), None);
        assert_eq!(labels.month_name(13), None);
    }

    #[test]
    fn test_weekdays_start_on_sunday() {
        assert_eq!(Labels::french().weekday_names[0], "Dimanche");
        assert_eq!(Labels::english().weekday_names[6], "Saturday");
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::English);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::English.labels().legend.holiday, "Holiday");
    }
}
