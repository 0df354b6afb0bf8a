// mortgage-core/src/domain/dimension/calendar.rs

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::table::Table;

/// Inclusive calendar window used by the date dimension and the generator.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        let range = Self { start, end };
        range.check()?;
        Ok(range)
    }

    pub fn check(&self) -> Result<(), DomainError> {
        if self.start > self.end {
            return Err(DomainError::configuration(
                "date_range",
                format!("start {} is after end {}", self.start, self.end),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

impl Default for DateRange {
    // Fenêtre de 5 ans
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DateRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Month_Name")]
    pub month_name: String,
    #[serde(rename = "Quarter")]
    pub quarter: u32,
    #[serde(rename = "Quarter_Name")]
    pub quarter_name: String,
    #[serde(rename = "Year_Month")]
    pub year_month: String,
    #[serde(rename = "Day_Of_Month")]
    pub day_of_month: u32,
    /// ISO numbering, Monday = 1.
    #[serde(rename = "Day_Of_Week")]
    pub day_of_week: u32,
    #[serde(rename = "Day_Name")]
    pub day_name: String,
    #[serde(rename = "Is_Weekend")]
    pub is_weekend: bool,
    #[serde(rename = "Is_Month_End")]
    pub is_month_end: bool,
    #[serde(rename = "Is_Quarter_End")]
    pub is_quarter_end: bool,
    #[serde(rename = "Is_Year_End")]
    pub is_year_end: bool,
}

impl Table for DateRow {
    const NAME: &'static str = "dim_date";
    const COLUMNS: &'static [&'static str] = &[
        "Date",
        "Year",
        "Month",
        "Month_Name",
        "Quarter",
        "Quarter_Name",
        "Year_Month",
        "Day_Of_Month",
        "Day_Of_Week",
        "Day_Name",
        "Is_Weekend",
        "Is_Month_End",
        "Is_Quarter_End",
        "Is_Year_End",
    ];
}

/// `YYYY-MM` key shared by the date dimension, the summary and the trends.
pub fn year_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

impl DateRow {
    /// Every field is a pure function of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        let quarter = quarter_of(date);
        let day_of_week = date.weekday().number_from_monday();
        let is_month_end = date.succ_opt().is_none_or(|next| next.month() != date.month());

        Self {
            date,
            year: date.year(),
            month: date.month(),
            month_name: date.format("%B").to_string(),
            quarter,
            quarter_name: format!("Q{}", quarter),
            year_month: year_month(date),
            day_of_month: date.day(),
            day_of_week,
            day_name: date.format("%A").to_string(),
            is_weekend: day_of_week >= 6,
            is_month_end,
            is_quarter_end: is_month_end && date.month() % 3 == 0,
            is_year_end: date.month() == 12 && date.day() == 31,
        }
    }
}

/// One row per calendar day of `range`, in ascending order.
pub fn build_date_dimension(range: &DateRange) -> Result<Vec<DateRow>, DomainError> {
    range.check()?;
    Ok(range.days().map(DateRow::from_date).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_row_per_day_inclusive() {
        // 2020 is a leap year
        let rows = build_date_dimension(&DateRange::new(ymd(2020, 1, 1), ymd(2020, 12, 31)).unwrap())
            .unwrap();
        assert_eq!(rows.len(), 366);
        assert_eq!(rows.first().unwrap().date, ymd(2020, 1, 1));
        assert_eq!(rows.last().unwrap().date, ymd(2020, 12, 31));
    }

    #[test]
    fn test_single_day_range() {
        let day = ymd(2021, 6, 15);
        let rows = build_date_dimension(&DateRange { start: day, end: day }).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_inverted_range_is_configuration_error() {
        let err = build_date_dimension(&DateRange {
            start: ymd(2021, 2, 1),
            end: ymd(2021, 1, 1),
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Configuration { ref parameter, .. } if parameter == "date_range"));
    }

    #[test]
    fn test_derived_fields() {
        // Thursday, end of Q1 2024 leap February
        let feb = DateRow::from_date(ymd(2024, 2, 29));
        assert_eq!(feb.month_name, "February");
        assert_eq!(feb.day_name, "Thursday");
        assert_eq!(feb.day_of_week, 4);
        assert!(feb.is_month_end);
        assert!(!feb.is_quarter_end);
        assert!(!feb.is_weekend);
        assert_eq!(feb.year_month, "2024-02");

        let mar = DateRow::from_date(ymd(2024, 3, 31));
        assert_eq!(mar.quarter, 1);
        assert_eq!(mar.quarter_name, "Q1");
        assert!(mar.is_quarter_end);
        assert!(mar.is_weekend); // Sunday
        assert_eq!(mar.day_of_week, 7);

        let dec = DateRow::from_date(ymd(2022, 12, 31));
        assert!(dec.is_year_end && dec.is_quarter_end && dec.is_month_end);
        assert_eq!(dec.quarter, 4);
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let range = DateRange::default();
        assert_eq!(
            build_date_dimension(&range).unwrap(),
            build_date_dimension(&range).unwrap()
        );
    }
}
