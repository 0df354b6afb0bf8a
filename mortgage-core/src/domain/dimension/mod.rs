// mortgage-core/src/domain/dimension/mod.rs

pub mod calendar;
pub mod property_type;
pub mod province;

pub use calendar::{DateRange, DateRow, build_date_dimension, quarter_of, year_month};
pub use property_type::{PROPERTY_TYPES, PropertyType, RiskLevel};
pub use province::{PROVINCES, Province};

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::table::Table;

/// The three dimension tables of one run.
#[derive(Debug, Clone)]
pub struct Dimensions {
    pub dates: Vec<DateRow>,
    pub provinces: Vec<Province>,
    pub property_types: Vec<PropertyType>,
}

impl Dimensions {
    pub fn build(range: &DateRange) -> Result<Self, crate::domain::DomainError> {
        Ok(Self {
            dates: build_date_dimension(range)?,
            provinces: province::provinces(),
            property_types: property_type::property_types(),
        })
    }

    pub fn keys(&self) -> ReferenceKeys {
        ReferenceKeys {
            provinces: self.provinces.iter().map(|p| p.code.to_string()).collect(),
            property_types: self
                .property_types
                .iter()
                .map(|p| (p.name.to_string(), p.max_ltv))
                .collect(),
            calendar: match (self.dates.first(), self.dates.last()) {
                (Some(first), Some(last)) => Some((first.date, last.date)),
                _ => None,
            },
        }
    }
}

/// Dimension keys a fact or summary row may reference.
#[derive(Debug, Clone, Default)]
pub struct ReferenceKeys {
    pub provinces: BTreeSet<String>,
    /// Property type name to its maximum LTV.
    pub property_types: BTreeMap<String, f64>,
    /// First and last day of the date dimension, if one was loaded.
    pub calendar: Option<(NaiveDate, NaiveDate)>,
}

impl ReferenceKeys {
    /// Keys recovered from exported dimension files.
    pub fn from_exported(
        provinces: &[ProvinceKey],
        property_types: &[PropertyTypeKey],
        dates: &[DateKey],
    ) -> Self {
        Self {
            provinces: provinces.iter().map(|p| p.code.clone()).collect(),
            property_types: property_types
                .iter()
                .map(|t| (t.name.clone(), t.max_ltv))
                .collect(),
            calendar: dates
                .iter()
                .map(|d| d.date)
                .min()
                .zip(dates.iter().map(|d| d.date).max()),
        }
    }
}

// --- KEY COLUMNS OF EXPORTED DIMENSIONS ---
// Seuls les champs utiles à la validation sont relus.

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProvinceKey {
    #[serde(rename = "Province_Code")]
    pub code: String,
}

impl Table for ProvinceKey {
    const NAME: &'static str = Province::NAME;
    const COLUMNS: &'static [&'static str] = &["Province_Code"];
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PropertyTypeKey {
    #[serde(rename = "Property_Type")]
    pub name: String,
    #[serde(rename = "Max_LTV")]
    pub max_ltv: f64,
}

impl Table for PropertyTypeKey {
    const NAME: &'static str = PropertyType::NAME;
    const COLUMNS: &'static [&'static str] = &["Property_Type", "Max_LTV"];
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DateKey {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
}

impl Table for DateKey {
    const NAME: &'static str = DateRow::NAME;
    const COLUMNS: &'static [&'static str] = &["Date"];
}
