// mortgage-core/src/domain/quality/overview.rs

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};

use crate::domain::fact::MortgageApplication;
use crate::domain::quality::anomaly::AnomalyScan;
use crate::domain::quality::report::ValidationReport;
use crate::domain::summary::monthly::approval_rate;
use crate::domain::table::round2;

const TOP_PROVINCES: usize = 5;

/// Headline figures of one dataset, rendered as `data_quality_report.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityOverview {
    pub records: u64,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
    pub provinces: usize,
    pub property_types: usize,
    pub avg_mortgage_value: f64,
    pub avg_property_value: f64,
    pub avg_ltv_ratio: f64,
    /// Over approved applications; `None` when nothing was approved.
    pub avg_interest_rate: Option<f64>,
    pub approval_rate: f64,
    /// Busiest provinces first, ties broken by code.
    pub top_provinces: Vec<(String, u64)>,
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { round2(sum / n as f64) }
}

impl QualityOverview {
    pub fn from_facts(facts: &[MortgageApplication]) -> Self {
        let n = facts.len();
        let mut volume: BTreeMap<&str, u64> = BTreeMap::new();
        let mut types: BTreeSet<&str> = BTreeSet::new();
        let mut rates: Vec<f64> = Vec::new();
        let mut approved: u64 = 0;

        for fact in facts {
            *volume.entry(fact.province.as_str()).or_default() += 1;
            types.insert(fact.property_type.as_str());
            if fact.is_approved() {
                approved += 1;
                rates.extend(fact.interest_rate);
            }
        }

        let mut top: Vec<(String, u64)> = volume.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top.truncate(TOP_PROVINCES);

        let first = facts.iter().map(|f| f.application_date).min();
        let last = facts.iter().map(|f| f.application_date).max();

        Self {
            records: n as u64,
            date_span: first.zip(last),
            provinces: volume.len(),
            property_types: types.len(),
            avg_mortgage_value: mean(facts.iter().map(|f| f.mortgage_value).sum(), n),
            avg_property_value: mean(facts.iter().map(|f| f.property_value).sum(), n),
            avg_ltv_ratio: mean(facts.iter().map(|f| f.ltv_ratio).sum(), n),
            avg_interest_rate: (!rates.is_empty()).then(|| mean(rates.iter().sum(), rates.len())),
            approval_rate: approval_rate(approved, n as u64),
            top_provinces: top,
        }
    }
}

impl fmt::Display for QualityOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DATASET OVERVIEW")?;
        writeln!(f, "  Total records:    {}", self.records)?;
        match self.date_span {
            Some((first, last)) => writeln!(f, "  Date range:       {} to {}", first, last)?,
            None => writeln!(f, "  Date range:       n/a")?,
        }
        writeln!(f, "  Provinces:        {}", self.provinces)?;
        writeln!(f, "  Property types:   {}", self.property_types)?;
        writeln!(f)?;
        writeln!(f, "KEY BUSINESS METRICS")?;
        writeln!(f, "  Average mortgage value:  ${:.2}", self.avg_mortgage_value)?;
        writeln!(f, "  Average property value:  ${:.2}", self.avg_property_value)?;
        writeln!(f, "  Average LTV ratio:       {:.2}%", self.avg_ltv_ratio)?;
        match self.avg_interest_rate {
            Some(rate) => writeln!(f, "  Average interest rate:   {:.2}%", rate)?,
            None => writeln!(f, "  Average interest rate:   n/a")?,
        }
        writeln!(f, "  Approval rate:           {:.2}%", self.approval_rate)?;
        writeln!(f)?;
        writeln!(f, "TOP {} PROVINCES BY VOLUME", TOP_PROVINCES)?;
        for (rank, (code, count)) in self.top_provinces.iter().enumerate() {
            writeln!(f, "  {}. {}: {} applications", rank + 1, code, count)?;
        }
        Ok(())
    }
}

/// Full text report: overview, time-series anomalies, then the validation
/// findings. Contains no timestamp so re-runs stay byte-identical.
pub fn render_quality_report(
    facts: &[MortgageApplication],
    anomalies: &AnomalyScan,
    report: &ValidationReport,
) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "MORTGAGE APPLICATIONS - DATA QUALITY REPORT");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);
    let _ = write!(out, "{}", QualityOverview::from_facts(facts));
    let _ = writeln!(out);
    let _ = write!(out, "{}", anomalies);
    let _ = writeln!(out);
    let _ = writeln!(out, "VALIDATION");
    let _ = writeln!(
        out,
        "  Checked {} applications and {} summary rows",
        report.facts_checked, report.summary_rows_checked
    );
    if report.is_clean() {
        let _ = writeln!(out, "  All business rules hold.");
    } else {
        for (rule, finding) in &report.findings {
            let _ = writeln!(
                out,
                "  [{}] {} violation(s): {} (sample: {:?})",
                rule,
                finding.count,
                rule.description(),
                finding.sample_ids
            );
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::fact::{ApprovalStatus, EmploymentType};
    use crate::domain::quality::rules::Rule;

    fn fact(id: u64, province: &str, approved: bool) -> MortgageApplication {
        MortgageApplication {
            id,
            application_date: NaiveDate::from_ymd_opt(2023, 1, id as u32).unwrap(),
            province: province.to_string(),
            property_type: "New".to_string(),
            mortgage_value: 300_000.0,
            property_value: 400_000.0,
            ltv_ratio: 75.0,
            applicant_income: 90_000.0,
            credit_score: 700,
            employment_type: EmploymentType::PartTime,
            down_payment: 100_000.0,
            approval_status: if approved {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Rejected
            },
            interest_rate: approved.then_some(3.5),
            amortization_years: approved.then_some(20),
        }
    }

    #[test]
    fn test_overview_figures() {
        let facts = vec![
            fact(1, "QC", true),
            fact(2, "ON", true),
            fact(3, "QC", false),
            fact(4, "ON", false),
            fact(5, "AB", false),
        ];
        let overview = QualityOverview::from_facts(&facts);
        assert_eq!(overview.records, 5);
        assert_eq!(overview.provinces, 3);
        assert_eq!(overview.approval_rate, 40.0);
        assert_eq!(overview.avg_interest_rate, Some(3.5));
        assert_eq!(
            overview.top_provinces,
            vec![("ON".to_string(), 2), ("QC".to_string(), 2), ("AB".to_string(), 1)]
        );
    }

    #[test]
    fn test_overview_rendering() {
        let facts = vec![
            fact(1, "QC", true),
            fact(2, "ON", true),
            fact(3, "QC", false),
            fact(4, "ON", false),
            fact(5, "AB", false),
        ];
        let text = QualityOverview::from_facts(&facts).to_string();
        insta::assert_snapshot!(text.trim_end(), @r"
        DATASET OVERVIEW
          Total records:    5
          Date range:       2023-01-01 to 2023-01-05
          Provinces:        3
          Property types:   1

        KEY BUSINESS METRICS
          Average mortgage value:  $300000.00
          Average property value:  $400000.00
          Average LTV ratio:       75.00%
          Average interest rate:   3.50%
          Approval rate:           40.00%

        TOP 5 PROVINCES BY VOLUME
          1. ON: 2 applications
          2. QC: 2 applications
          3. AB: 1 applications
        ");
    }

    #[test]
    fn test_report_lists_findings() {
        let mut report = ValidationReport::default();
        report.facts_checked = 1;
        report.record(Rule::LtvOutOfBounds, Some(1));
        let text = render_quality_report(&[fact(1, "NB", false)], &AnomalyScan::default(), &report);
        assert!(text.contains("[ltv_out_of_bounds] 1 violation(s)"));
        assert!(text.contains("Average interest rate:   n/a"));
        assert!(text.contains("2023-01-01 to 2023-01-01"));
    }

    #[test]
    fn test_empty_dataset() {
        let text = render_quality_report(&[], &AnomalyScan::default(), &ValidationReport::default());
        assert!(text.contains("Total records:    0"));
        assert!(text.contains("ANOMALIES\n  None detected."));
        assert!(text.contains("All business rules hold."));
    }
}
