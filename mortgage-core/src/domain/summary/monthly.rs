// mortgage-core/src/domain/summary/monthly.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::dimension::year_month;
use crate::domain::fact::MortgageApplication;
use crate::domain::table::{Table, round2};

/// One (year-month, province, property type) group of the fact table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MonthlySummaryRow {
    #[serde(rename = "Year_Month")]
    pub year_month: String,
    #[serde(rename = "Province")]
    pub province: String,
    #[serde(rename = "Property_Type")]
    pub property_type: String,
    #[serde(rename = "Total_Applications")]
    pub total_applications: u64,
    #[serde(rename = "Approved_Applications")]
    pub approved_applications: u64,
    /// Percent, 0 when the group is empty.
    #[serde(rename = "Approval_Rate")]
    pub approval_rate: f64,
    /// Mean over approved applications only; empty when none were approved.
    #[serde(rename = "Avg_Mortgage_Value")]
    pub avg_mortgage_value: Option<f64>,
    #[serde(rename = "Avg_LTV_Ratio")]
    pub avg_ltv_ratio: f64,
    #[serde(rename = "Avg_Credit_Score")]
    pub avg_credit_score: f64,
}

impl Table for MonthlySummaryRow {
    const NAME: &'static str = "monthly_summary";
    const COLUMNS: &'static [&'static str] = &[
        "Year_Month",
        "Province",
        "Property_Type",
        "Total_Applications",
        "Approved_Applications",
        "Approval_Rate",
        "Avg_Mortgage_Value",
        "Avg_LTV_Ratio",
        "Avg_Credit_Score",
    ];
}

/// Percent of `part` in `total`, rounded; 0 for an empty total.
pub fn approval_rate(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(part as f64 / total as f64 * 100.0)
    }
}

#[derive(Default)]
struct Accumulator {
    total: u64,
    approved: u64,
    approved_mortgage_sum: f64,
    ltv_sum: f64,
    credit_sum: f64,
}

/// Rolls the fact table up to one row per non-empty group, sorted by
/// year-month, province then property type.
pub fn aggregate(facts: &[MortgageApplication]) -> Vec<MonthlySummaryRow> {
    let mut groups: BTreeMap<(String, String, String), Accumulator> = BTreeMap::new();

    for fact in facts {
        let key = (
            year_month(fact.application_date),
            fact.province.clone(),
            fact.property_type.clone(),
        );
        let acc = groups.entry(key).or_default();
        acc.total += 1;
        acc.ltv_sum += fact.ltv_ratio;
        acc.credit_sum += f64::from(fact.credit_score);
        if fact.is_approved() {
            acc.approved += 1;
            acc.approved_mortgage_sum += fact.mortgage_value;
        }
    }

    groups
        .into_iter()
        .map(|((year_month, province, property_type), acc)| {
            let n = acc.total as f64;
            MonthlySummaryRow {
                year_month,
                province,
                property_type,
                total_applications: acc.total,
                approved_applications: acc.approved,
                approval_rate: approval_rate(acc.approved, acc.total),
                avg_mortgage_value: (acc.approved > 0)
                    .then(|| round2(acc.approved_mortgage_sum / acc.approved as f64)),
                avg_ltv_ratio: round2(acc.ltv_sum / n),
                avg_credit_score: round2(acc.credit_sum / n),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::fact::{ApprovalStatus, EmploymentType};
    use chrono::NaiveDate;

    fn fact(id: u64, date: &str, province: &str, approved: bool) -> MortgageApplication {
        MortgageApplication {
            id,
            application_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            province: province.to_string(),
            property_type: "Existing".to_string(),
            mortgage_value: 400_000.0,
            property_value: 500_000.0,
            ltv_ratio: 80.0,
            applicant_income: 120_000.0,
            credit_score: if approved { 760 } else { 640 },
            employment_type: EmploymentType::FullTime,
            down_payment: 100_000.0,
            approval_status: if approved {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Rejected
            },
            interest_rate: approved.then_some(4.25),
            amortization_years: approved.then_some(25),
        }
    }

    #[test]
    fn test_two_of_five_approved() {
        let facts: Vec<_> = (1..=5)
            .map(|i| fact(i, "2020-01-15", "ON", i <= 2))
            .collect();
        let rows = aggregate(&facts);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.year_month, "2020-01");
        assert_eq!(row.province, "ON");
        assert_eq!(row.property_type, "Existing");
        assert_eq!(row.total_applications, 5);
        assert_eq!(row.approved_applications, 2);
        assert_eq!(row.approval_rate, 40.0);
        assert_eq!(row.avg_mortgage_value, Some(400_000.0));
        assert_eq!(row.avg_credit_score, 688.0);
    }

    #[test]
    fn test_groups_are_sorted_and_empty_groups_omitted() {
        let facts = vec![
            fact(1, "2020-02-03", "QC", true),
            fact(2, "2020-01-09", "ON", false),
            fact(3, "2020-01-20", "BC", true),
        ];
        let keys: Vec<(String, String)> = aggregate(&facts)
            .into_iter()
            .map(|r| (r.year_month, r.province))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2020-01".to_string(), "BC".to_string()),
                ("2020-01".to_string(), "ON".to_string()),
                ("2020-02".to_string(), "QC".to_string()),
            ]
        );
    }

    #[test]
    fn test_group_without_approvals_has_no_average_mortgage() {
        let rows = aggregate(&[fact(1, "2021-06-01", "NS", false)]);
        assert_eq!(rows[0].approval_rate, 0.0);
        assert_eq!(rows[0].avg_mortgage_value, None);
    }

    #[test]
    fn test_empty_fact_table() {
        assert!(aggregate(&[]).is_empty());
        assert_eq!(approval_rate(0, 0), 0.0);
    }
}
