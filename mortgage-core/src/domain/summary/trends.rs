// mortgage-core/src/domain/summary/trends.rs

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::dimension::year_month;
use crate::domain::fact::MortgageApplication;
use crate::domain::table::{Table, round2};

/// National rollup of one month with its period-over-period changes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrendRow {
    #[serde(rename = "Year_Month")]
    pub year_month: String,
    #[serde(rename = "Total_Applications")]
    pub total_applications: u64,
    #[serde(rename = "Approved_Applications")]
    pub approved_applications: u64,
    /// Requested mortgage volume over every application of the month.
    #[serde(rename = "Total_Mortgage_Value")]
    pub total_mortgage_value: f64,
    #[serde(rename = "MoM_Applications_Change")]
    pub mom_applications_change: Option<f64>,
    #[serde(rename = "MoM_Mortgage_Value_Change")]
    pub mom_mortgage_value_change: Option<f64>,
    #[serde(rename = "YoY_Applications_Change")]
    pub yoy_applications_change: Option<f64>,
}

impl Table for TrendRow {
    const NAME: &'static str = "monthly_trends";
    const COLUMNS: &'static [&'static str] = &[
        "Year_Month",
        "Total_Applications",
        "Approved_Applications",
        "Total_Mortgage_Value",
        "MoM_Applications_Change",
        "MoM_Mortgage_Value_Change",
        "YoY_Applications_Change",
    ];
}

/// National rollup of one calendar year.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct YearlyTrendRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Total_Applications")]
    pub total_applications: u64,
    #[serde(rename = "Approved_Applications")]
    pub approved_applications: u64,
    #[serde(rename = "Total_Mortgage_Value")]
    pub total_mortgage_value: f64,
    #[serde(rename = "YoY_Applications_Change")]
    pub yoy_applications_change: Option<f64>,
    #[serde(rename = "YoY_Mortgage_Value_Change")]
    pub yoy_mortgage_value_change: Option<f64>,
}

impl Table for YearlyTrendRow {
    const NAME: &'static str = "yearly_trends";
    const COLUMNS: &'static [&'static str] = &[
        "Year",
        "Total_Applications",
        "Approved_Applications",
        "Total_Mortgage_Value",
        "YoY_Applications_Change",
        "YoY_Mortgage_Value_Change",
    ];
}

/// Volume counters of one period.
#[derive(Debug, Default, Clone, Copy)]
struct Volume {
    total: u64,
    approved: u64,
    mortgage: f64,
}

impl Volume {
    fn add(&mut self, fact: &MortgageApplication) {
        self.total += 1;
        self.mortgage += fact.mortgage_value;
        if fact.is_approved() {
            self.approved += 1;
        }
    }
}

/// Percent change from `base`; `None` without a base or with a zero base.
fn pct_change(current: f64, base: Option<f64>) -> Option<f64> {
    match base {
        Some(b) if b != 0.0 => Some(round2((current - b) / b * 100.0)),
        _ => None,
    }
}

/// Key of the same month one year earlier.
fn previous_year(key: &str) -> Option<String> {
    let (year, month) = key.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    Some(format!("{:04}-{}", year - 1, month))
}

/// One row per month present in `facts`, oldest first.
///
/// Month-over-month compares with the previous row; year-over-year with the
/// same month of the previous year when that month has data.
pub fn build_trends(facts: &[MortgageApplication]) -> Vec<TrendRow> {
    let mut months: BTreeMap<String, Volume> = BTreeMap::new();
    for fact in facts {
        months.entry(year_month(fact.application_date)).or_default().add(fact);
    }

    let mut rows: Vec<TrendRow> = Vec::with_capacity(months.len());
    for (key, volume) in &months {
        let previous = rows.last();
        let year_ago = previous_year(key).and_then(|k| months.get(&k));

        let row = TrendRow {
            year_month: key.clone(),
            total_applications: volume.total,
            approved_applications: volume.approved,
            total_mortgage_value: round2(volume.mortgage),
            mom_applications_change: pct_change(
                volume.total as f64,
                previous.map(|p| p.total_applications as f64),
            ),
            mom_mortgage_value_change: pct_change(
                volume.mortgage,
                previous.map(|p| p.total_mortgage_value),
            ),
            yoy_applications_change: pct_change(volume.total as f64, year_ago.map(|m| m.total as f64)),
        };
        rows.push(row);
    }
    rows
}

/// One row per calendar year present in `facts`, compared with the year before.
pub fn build_yearly_trends(facts: &[MortgageApplication]) -> Vec<YearlyTrendRow> {
    let mut years: BTreeMap<i32, Volume> = BTreeMap::new();
    for fact in facts {
        years.entry(fact.application_date.year()).or_default().add(fact);
    }

    years
        .iter()
        .map(|(year, volume)| {
            let before = years.get(&(year - 1));
            YearlyTrendRow {
                year: *year,
                total_applications: volume.total,
                approved_applications: volume.approved,
                total_mortgage_value: round2(volume.mortgage),
                yoy_applications_change: pct_change(
                    volume.total as f64,
                    before.map(|b| b.total as f64),
                ),
                yoy_mortgage_value_change: pct_change(
                    volume.mortgage,
                    before.map(|b| round2(b.mortgage)),
                ),
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

    fn fact(id: u64, date: &str, mortgage: f64, approved: bool) -> MortgageApplication {
        MortgageApplication {
            id,
            application_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            province: "AB".to_string(),
            property_type: "New".to_string(),
            mortgage_value: mortgage,
            property_value: mortgage * 1.25,
            ltv_ratio: 80.0,
            applicant_income: 100_000.0,
            credit_score: 700,
            employment_type: EmploymentType::Contract,
            down_payment: mortgage * 0.25,
            approval_status: if approved {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Rejected
            },
            interest_rate: approved.then_some(5.0),
            amortization_years: approved.then_some(30),
        }
    }

    #[test]
    fn test_month_over_month_and_year_over_year() {
        let facts = vec![
            fact(1, "2020-01-05", 100_000.0, true),
            fact(2, "2020-01-06", 300_000.0, false),
            fact(3, "2020-02-01", 150_000.0, true),
            fact(4, "2020-02-11", 150_000.0, true),
            fact(5, "2020-02-21", 300_000.0, false),
            fact(6, "2021-01-15", 200_000.0, true),
        ];
        let rows = build_trends(&facts);
        assert_eq!(rows.len(), 3);

        let jan = &rows[0];
        assert_eq!(jan.total_applications, 2);
        assert_eq!(jan.approved_applications, 1);
        assert_eq!(jan.total_mortgage_value, 400_000.0);
        assert_eq!(jan.mom_applications_change, None);
        assert_eq!(jan.yoy_applications_change, None);

        let feb = &rows[1];
        assert_eq!(feb.total_mortgage_value, 600_000.0);
        assert_eq!(feb.mom_applications_change, Some(50.0));
        assert_eq!(feb.mom_mortgage_value_change, Some(50.0));

        let jan_next = &rows[2];
        assert_eq!(jan_next.year_month, "2021-01");
        assert_eq!(jan_next.mom_mortgage_value_change, Some(-66.67));
        assert_eq!(jan_next.yoy_applications_change, Some(-50.0));
    }

    #[test]
    fn test_rejected_volume_counts() {
        let facts = vec![
            fact(1, "2022-03-01", 250_000.0, false),
            fact(2, "2022-03-09", 150_000.0, false),
        ];
        let rows = build_trends(&facts);
        assert_eq!(rows[0].approved_applications, 0);
        assert_eq!(rows[0].total_mortgage_value, 400_000.0);
    }

    #[test]
    fn test_zero_base_has_no_change() {
        assert_eq!(pct_change(10.0, Some(0.0)), None);
        assert_eq!(pct_change(10.0, None), None);
        assert_eq!(pct_change(15.0, Some(10.0)), Some(50.0));
    }

    #[test]
    fn test_yearly_rollup() {
        let facts = vec![
            fact(1, "2020-01-05", 100_000.0, true),
            fact(2, "2020-07-06", 300_000.0, false),
            fact(3, "2021-02-01", 200_000.0, true),
            fact(4, "2021-02-11", 200_000.0, true),
            fact(5, "2021-12-31", 200_000.0, false),
            fact(6, "2023-06-15", 500_000.0, true),
        ];
        let rows = build_yearly_trends(&facts);
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2020, 2021, 2023]);

        assert_eq!(rows[0].yoy_applications_change, None);
        assert_eq!(rows[1].total_applications, 3);
        assert_eq!(rows[1].approved_applications, 2);
        assert_eq!(rows[1].total_mortgage_value, 600_000.0);
        assert_eq!(rows[1].yoy_applications_change, Some(50.0));
        assert_eq!(rows[1].yoy_mortgage_value_change, Some(50.0));
        // 2022 absent : pas de base
        assert_eq!(rows[2].yoy_applications_change, None);
    }
}
