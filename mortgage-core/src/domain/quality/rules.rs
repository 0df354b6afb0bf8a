// mortgage-core/src/domain/quality/rules.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every business rule the validator checks.
///
/// Fact rules cite `Application_ID`s; summary rules cite 1-based row numbers
/// of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    // --- Fact table ---
    NonPositiveAmount,
    PropertyNotAboveMortgage,
    LtvOutOfBounds,
    LtvMismatch,
    LtvAbovePropertyTypeMax,
    DownPaymentMismatch,
    CreditScoreOutOfRange,
    ApprovedBelowCreditFloor,
    ApprovedTermsMissing,
    InvalidAmortization,
    RejectedTermsPresent,
    DuplicateId,
    NonSequentialId,
    DateOutsideCalendar,
    UnknownProvince,
    UnknownPropertyType,

    // --- Summary table ---
    ApprovedExceedsTotal,
    ApprovalRateMismatch,
    SummaryUnknownProvince,
    SummaryUnknownPropertyType,
    SummaryTotalMismatch,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "non_positive_amount",
            Self::PropertyNotAboveMortgage => "property_not_above_mortgage",
            Self::LtvOutOfBounds => "ltv_out_of_bounds",
            Self::LtvMismatch => "ltv_mismatch",
            Self::LtvAbovePropertyTypeMax => "ltv_above_property_type_max",
            Self::DownPaymentMismatch => "down_payment_mismatch",
            Self::CreditScoreOutOfRange => "credit_score_out_of_range",
            Self::ApprovedBelowCreditFloor => "approved_below_credit_floor",
            Self::ApprovedTermsMissing => "approved_terms_missing",
            Self::InvalidAmortization => "invalid_amortization",
            Self::RejectedTermsPresent => "rejected_terms_present",
            Self::DuplicateId => "duplicate_id",
            Self::NonSequentialId => "non_sequential_id",
            Self::DateOutsideCalendar => "date_outside_calendar",
            Self::UnknownProvince => "unknown_province",
            Self::UnknownPropertyType => "unknown_property_type",
            Self::ApprovedExceedsTotal => "approved_exceeds_total",
            Self::ApprovalRateMismatch => "approval_rate_mismatch",
            Self::SummaryUnknownProvince => "summary_unknown_province",
            Self::SummaryUnknownPropertyType => "summary_unknown_property_type",
            Self::SummaryTotalMismatch => "summary_total_mismatch",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "Mortgage, property or income amount is not positive",
            Self::PropertyNotAboveMortgage => "Property value does not exceed mortgage value",
            Self::LtvOutOfBounds => "LTV ratio outside [50, 95]",
            Self::LtvMismatch => "LTV ratio differs from mortgage / property * 100",
            Self::LtvAbovePropertyTypeMax => "LTV ratio above the property type maximum",
            Self::DownPaymentMismatch => "Down payment differs from property - mortgage",
            Self::CreditScoreOutOfRange => "Credit score outside [500, 850]",
            Self::ApprovedBelowCreditFloor => "Approved below the minimum credit score",
            Self::ApprovedTermsMissing => "Approved without interest rate or amortization",
            Self::InvalidAmortization => "Amortization not in {15, 20, 25, 30}",
            Self::RejectedTermsPresent => "Rejected with interest rate or amortization set",
            Self::DuplicateId => "Application_ID already used",
            Self::NonSequentialId => "Application_ID breaks the 1..N sequence",
            Self::DateOutsideCalendar => "Application date not in the date dimension",
            Self::UnknownProvince => "Province not in the province dimension",
            Self::UnknownPropertyType => "Property type not in the property type dimension",
            Self::ApprovedExceedsTotal => "Approved count above total count",
            Self::ApprovalRateMismatch => "Approval rate differs from approved / total * 100",
            Self::SummaryUnknownProvince => "Summary province not in the province dimension",
            Self::SummaryUnknownPropertyType => "Summary property type not in the dimension",
            Self::SummaryTotalMismatch => "Summary totals do not add up to the fact count",
        }
    }

    pub fn is_summary_rule(&self) -> bool {
        matches!(
            self,
            Self::ApprovedExceedsTotal
                | Self::ApprovalRateMismatch
                | Self::SummaryUnknownProvince
                | Self::SummaryUnknownPropertyType
                | Self::SummaryTotalMismatch
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
