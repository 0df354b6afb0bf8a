// mortgage-core/src/domain/fact/record.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::table::Table;

/// Amortization periods (years) a lender offers.
pub const AMORTIZATION_TERMS: [u32; 4] = [15, 20, 25, 30];

pub const MIN_LTV: f64 = 50.0;
pub const MAX_LTV: f64 = 95.0;
pub const MIN_CREDIT_SCORE: u16 = 500;
pub const MAX_CREDIT_SCORE: u16 = 850;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    #[serde(rename = "Self-Employed")]
    SelfEmployed,
    #[serde(rename = "Contract")]
    Contract,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        Self::FullTime,
        Self::PartTime,
        Self::SelfEmployed,
        Self::Contract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-Time",
            Self::PartTime => "Part-Time",
            Self::SelfEmployed => "Self-Employed",
            Self::Contract => "Contract",
        }
    }

    /// Income stability factor in [0, 1] used by the approval score.
    pub fn stability(&self) -> f64 {
        match self {
            Self::FullTime => 1.0,
            Self::SelfEmployed => 0.6,
            Self::Contract => 0.5,
            Self::PartTime => 0.4,
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One mortgage application (fact grain).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MortgageApplication {
    #[serde(rename = "Application_ID")]
    pub id: u64,
    #[serde(rename = "Application_Date")]
    pub application_date: NaiveDate,
    #[serde(rename = "Province")]
    pub province: String,
    #[serde(rename = "Property_Type")]
    pub property_type: String,
    #[serde(rename = "Mortgage_Value")]
    pub mortgage_value: f64,
    #[serde(rename = "Property_Value")]
    pub property_value: f64,
    #[serde(rename = "LTV_Ratio")]
    pub ltv_ratio: f64,
    #[serde(rename = "Applicant_Income")]
    pub applicant_income: f64,
    #[serde(rename = "Credit_Score")]
    pub credit_score: u16,
    #[serde(rename = "Employment_Type")]
    pub employment_type: EmploymentType,
    #[serde(rename = "Down_Payment")]
    pub down_payment: f64,
    #[serde(rename = "Approval_Status")]
    pub approval_status: ApprovalStatus,
    #[serde(rename = "Interest_Rate")]
    pub interest_rate: Option<f64>,
    #[serde(rename = "Amortization_Years")]
    pub amortization_years: Option<u32>,
}

impl Table for MortgageApplication {
    const NAME: &'static str = "mortgage_applications";
    const COLUMNS: &'static [&'static str] = &[
        "Application_ID",
        "Application_Date",
        "Province",
        "Property_Type",
        "Mortgage_Value",
        "Property_Value",
        "LTV_Ratio",
        "Applicant_Income",
        "Credit_Score",
        "Employment_Type",
        "Down_Payment",
        "Approval_Status",
        "Interest_Rate",
        "Amortization_Years",
    ];
}

impl MortgageApplication {
    pub fn is_approved(&self) -> bool {
        self.approval_status.is_approved()
    }

    /// LTV recomputed from the two amounts, unrounded.
    pub fn derived_ltv(&self) -> f64 {
        if self.property_value > 0.0 {
            self.mortgage_value / self.property_value * 100.0
        } else {
            f64::NAN
        }
    }
}
