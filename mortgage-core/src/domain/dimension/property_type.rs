// mortgage-core/src/domain/dimension/property_type.rs

use serde::Serialize;
use std::fmt;

use crate::domain::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PropertyType {
    #[serde(rename = "Property_Type")]
    pub name: &'static str,
    #[serde(rename = "Property_Category")]
    pub category: &'static str,
    #[serde(rename = "Description")]
    pub description: &'static str,
    /// Highest LTV (percent) the generator will produce for this type.
    #[serde(rename = "Max_LTV")]
    pub max_ltv: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: RiskLevel,
    #[serde(skip)]
    pub weight: f64,
}

impl Table for PropertyType {
    const NAME: &'static str = "dim_property_type";
    const COLUMNS: &'static [&'static str] = &[
        "Property_Type",
        "Property_Category",
        "Description",
        "Max_LTV",
        "Risk_Level",
    ];
}

pub const PROPERTY_TYPES: [PropertyType; 3] = [
    PropertyType {
        name: "Existing",
        category: "Resale",
        description: "Previously owned home bought on the resale market",
        max_ltv: 95.0,
        risk_level: RiskLevel::Low,
        weight: 0.60,
    },
    PropertyType {
        name: "New",
        category: "New Construction",
        description: "Newly built home bought from a builder",
        max_ltv: 95.0,
        risk_level: RiskLevel::Medium,
        weight: 0.25,
    },
    PropertyType {
        name: "New Residential Construction",
        category: "New Construction",
        description: "Construction mortgage drawn against a build in progress",
        max_ltv: 90.0,
        risk_level: RiskLevel::High,
        weight: 0.15,
    },
];

pub fn property_types() -> Vec<PropertyType> {
    PROPERTY_TYPES.to_vec()
}
