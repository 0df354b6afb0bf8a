// mortgage-core/src/domain/quality/validator.rs

use std::collections::HashSet;

use crate::domain::dimension::ReferenceKeys;
use crate::domain::fact::{
    AMORTIZATION_TERMS, MAX_CREDIT_SCORE, MAX_LTV, MIN_CREDIT_SCORE, MIN_LTV, MortgageApplication,
};
use crate::domain::generator::ApprovalPolicy;
use crate::domain::quality::report::ValidationReport;
use crate::domain::quality::rules::Rule;
use crate::domain::summary::MonthlySummaryRow;
use crate::domain::summary::monthly::approval_rate;

/// Thresholds the rules are checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationPolicy {
    pub min_credit_score: u16,
    /// Allowed drift on rounded derived columns (LTV, down payment, rates).
    pub tolerance: f64,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::from(&ApprovalPolicy::default())
    }
}

impl From<&ApprovalPolicy> for ValidationPolicy {
    fn from(policy: &ApprovalPolicy) -> Self {
        Self {
            min_credit_score: policy.min_credit_score,
            tolerance: 0.01,
        }
    }
}

/// Read-only rule checker over the fact and summary tables.
pub struct Validator<'a> {
    keys: &'a ReferenceKeys,
    policy: &'a ValidationPolicy,
}

impl<'a> Validator<'a> {
    pub fn new(keys: &'a ReferenceKeys, policy: &'a ValidationPolicy) -> Self {
        Self { keys, policy }
    }

    /// Checks both tables. Pass `None` to skip the summary rules.
    pub fn validate(
        &self,
        facts: &[MortgageApplication],
        summary: Option<&[MonthlySummaryRow]>,
    ) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.check_facts(facts, &mut report);
        if let Some(rows) = summary {
            self.check_summary(rows, Some(facts.len() as u64), &mut report);
        }
        report
    }

    pub fn check_facts(&self, facts: &[MortgageApplication], report: &mut ValidationReport) {
        let mut seen: HashSet<u64> = HashSet::with_capacity(facts.len());

        for (position, fact) in facts.iter().enumerate() {
            report.facts_checked += 1;
            for rule in self.fact_violations(fact) {
                report.record(rule, Some(fact.id));
            }

            if !seen.insert(fact.id) {
                report.record(Rule::DuplicateId, Some(fact.id));
            }
            if fact.id != position as u64 + 1 {
                report.record(Rule::NonSequentialId, Some(fact.id));
            }
        }
    }

    /// Row-local rules broken by `fact`.
    pub fn fact_violations(&self, fact: &MortgageApplication) -> Vec<Rule> {
        let mut broken = Vec::new();
        let tol = self.policy.tolerance;

        // 1. Montants
        let amounts = [fact.mortgage_value, fact.property_value, fact.applicant_income];
        if amounts.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            broken.push(Rule::NonPositiveAmount);
        }
        if fact.property_value <= fact.mortgage_value {
            broken.push(Rule::PropertyNotAboveMortgage);
        }

        // 2. LTV
        let ltv_in_bounds = (MIN_LTV..=MAX_LTV).contains(&fact.ltv_ratio);
        if !ltv_in_bounds {
            broken.push(Rule::LtvOutOfBounds);
        }
        let derived = fact.derived_ltv();
        if derived.is_finite() && (fact.ltv_ratio - derived).abs() > tol {
            broken.push(Rule::LtvMismatch);
        }
        if ltv_in_bounds
            && let Some(max_ltv) = self.keys.property_types.get(&fact.property_type)
            && fact.ltv_ratio > *max_ltv
        {
            broken.push(Rule::LtvAbovePropertyTypeMax);
        }
        if (fact.down_payment - (fact.property_value - fact.mortgage_value)).abs() > tol {
            broken.push(Rule::DownPaymentMismatch);
        }

        // 3. Décision
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&fact.credit_score) {
            broken.push(Rule::CreditScoreOutOfRange);
        }
        if fact.is_approved() {
            if fact.credit_score < self.policy.min_credit_score {
                broken.push(Rule::ApprovedBelowCreditFloor);
            }
            if fact.interest_rate.is_none() || fact.amortization_years.is_none() {
                broken.push(Rule::ApprovedTermsMissing);
            }
        } else if fact.interest_rate.is_some() || fact.amortization_years.is_some() {
            broken.push(Rule::RejectedTermsPresent);
        }
        if let Some(years) = fact.amortization_years
            && !AMORTIZATION_TERMS.contains(&years)
        {
            broken.push(Rule::InvalidAmortization);
        }

        // 4. Intégrité référentielle
        if let Some((first, last)) = self.keys.calendar
            && !(first <= fact.application_date && fact.application_date <= last)
        {
            broken.push(Rule::DateOutsideCalendar);
        }
        if !self.keys.provinces.contains(&fact.province) {
            broken.push(Rule::UnknownProvince);
        }
        if !self.keys.property_types.contains_key(&fact.property_type) {
            broken.push(Rule::UnknownPropertyType);
        }

        broken
    }

    /// Summary rules. `fact_count`, when known, is checked against the sum of
    /// `Total_Applications`.
    pub fn check_summary(
        &self,
        rows: &[MonthlySummaryRow],
        fact_count: Option<u64>,
        report: &mut ValidationReport,
    ) {
        let mut total: u64 = 0;

        for (index, row) in rows.iter().enumerate() {
            let row_number = Some(index as u64 + 1);
            report.summary_rows_checked += 1;
            total += row.total_applications;

            if row.approved_applications > row.total_applications {
                report.record(Rule::ApprovedExceedsTotal, row_number);
            }
            let expected = approval_rate(row.approved_applications, row.total_applications);
            if (row.approval_rate - expected).abs() > self.policy.tolerance {
                report.record(Rule::ApprovalRateMismatch, row_number);
            }
            if !self.keys.provinces.contains(&row.province) {
                report.record(Rule::SummaryUnknownProvince, row_number);
            }
            if !self.keys.property_types.contains_key(&row.property_type) {
                report.record(Rule::SummaryUnknownPropertyType, row_number);
            }
        }

        if let Some(expected) = fact_count
            && total != expected
        {
            report.record(Rule::SummaryTotalMismatch, None);
        }
    }
}
