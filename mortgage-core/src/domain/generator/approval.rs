// mortgage-core/src/domain/generator/approval.rs

use crate::domain::error::DomainError;
use crate::domain::fact::{ApprovalStatus, EmploymentType, MAX_CREDIT_SCORE, MAX_LTV, MIN_CREDIT_SCORE, MIN_LTV};
use crate::domain::generator::config::{ApprovalPolicy, ScoreWeights};

/// The inputs the approval rule looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicantProfile {
    pub credit_score: u16,
    pub ltv_ratio: f64,
    pub mortgage_value: f64,
    pub applicant_income: f64,
    pub employment_type: EmploymentType,
}

/// Deterministic approve/reject decision.
///
/// An application is approved when its credit score reaches the floor and its
/// weighted score reaches `threshold`. The threshold is calibrated once per run
/// on a sample drawn from the same distributions as the facts, so the realized
/// approval proportion lands near the configured target.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalRule {
    min_credit_score: u16,
    weights: ScoreWeights,
    threshold: f64,
}

impl ApprovalRule {
    pub fn with_threshold(policy: &ApprovalPolicy, threshold: f64) -> Self {
        Self {
            min_credit_score: policy.min_credit_score,
            weights: policy.weights.clone(),
            threshold,
        }
    }

    /// Picks the threshold so that `target` of `sample` would be approved.
    pub fn calibrate(
        policy: &ApprovalPolicy,
        target: f64,
        sample: &[ApplicantProfile],
    ) -> Result<Self, DomainError> {
        if sample.is_empty() {
            return Err(DomainError::configuration(
                "approval_rate_target",
                "cannot calibrate the approval rule on an empty sample",
            ));
        }

        let mut eligible: Vec<f64> = sample
            .iter()
            .filter(|p| p.credit_score >= policy.min_credit_score)
            .map(|p| score(&policy.weights, p))
            .collect();
        eligible.sort_by(|a, b| b.total_cmp(a));

        let wanted = (target * sample.len() as f64).round() as usize;
        if wanted > eligible.len() {
            return Err(DomainError::configuration(
                "approval_rate_target",
                format!(
                    "{:.2} is unreachable: only {:.1}% of applicants meet min_credit_score {}",
                    target,
                    eligible.len() as f64 / sample.len() as f64 * 100.0,
                    policy.min_credit_score
                ),
            ));
        }

        let threshold = match wanted.checked_sub(1) {
            Some(idx) => eligible[idx],
            None => f64::INFINITY,
        };
        Ok(Self::with_threshold(policy, threshold))
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn decide(&self, profile: &ApplicantProfile) -> ApprovalStatus {
        if profile.credit_score >= self.min_credit_score
            && score(&self.weights, profile) >= self.threshold
        {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Rejected
        }
    }
}

/// Weighted mean of the four components, each scaled to [0, 1].
pub fn score(weights: &ScoreWeights, profile: &ApplicantProfile) -> f64 {
    let credit = (f64::from(profile.credit_score) - f64::from(MIN_CREDIT_SCORE))
        / f64::from(MAX_CREDIT_SCORE - MIN_CREDIT_SCORE);
    let ltv = (MAX_LTV - profile.ltv_ratio) / (MAX_LTV - MIN_LTV);
    // Loan-to-income of 2x or less scores 1, 8x or more scores 0
    let affordability = if profile.applicant_income > 0.0 {
        1.0 - (profile.mortgage_value / profile.applicant_income - 2.0) / 6.0
    } else {
        0.0
    };
    let employment = profile.employment_type.stability();

    let total = weights.credit + weights.ltv + weights.affordability + weights.employment;
    if total <= 0.0 {
        return 0.0;
    }
    (weights.credit * credit.clamp(0.0, 1.0)
        + weights.ltv * ltv.clamp(0.0, 1.0)
        + weights.affordability * affordability.clamp(0.0, 1.0)
        + weights.employment * employment)
        / total
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(credit_score: u16, ltv_ratio: f64) -> ApplicantProfile {
        ApplicantProfile {
            credit_score,
            ltv_ratio,
            mortgage_value: 400_000.0,
            applicant_income: 100_000.0,
            employment_type: EmploymentType::FullTime,
        }
    }

    #[test]
    fn test_score_is_monotonic_in_credit_and_ltv() {
        let w = ScoreWeights::default();
        assert!(score(&w, &profile(800, 80.0)) > score(&w, &profile(650, 80.0)));
        assert!(score(&w, &profile(720, 60.0)) > score(&w, &profile(720, 94.0)));
        let s = score(&w, &profile(850, 50.0));
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn test_never_approves_below_floor() {
        let policy = ApprovalPolicy::default();
        let rule = ApprovalRule::with_threshold(&policy, 0.0);
        assert_eq!(rule.decide(&profile(599, 50.0)), ApprovalStatus::Rejected);
        assert_eq!(rule.decide(&profile(600, 95.0)), ApprovalStatus::Approved);
    }

    #[test]
    fn test_calibration_hits_target_on_its_sample() {
        let policy = ApprovalPolicy::default();
        let sample: Vec<ApplicantProfile> = (0..1_000)
            .map(|i| profile(600 + (i % 250) as u16, 50.0 + (i % 45) as f64))
            .collect();
        let rule = ApprovalRule::calibrate(&policy, 0.6, &sample).unwrap();
        let approved = sample
            .iter()
            .filter(|p| rule.decide(p).is_approved())
            .count();
        // Ties at the threshold can only add approvals
        assert!((600..=630).contains(&approved), "approved {}", approved);
    }

    #[test]
    fn test_unreachable_target_is_a_configuration_error() {
        let policy = ApprovalPolicy::default();
        let mut sample = vec![profile(550, 70.0); 50];
        sample.extend(vec![profile(700, 70.0); 50]);
        let err = ApprovalRule::calibrate(&policy, 0.8, &sample).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { ref parameter, .. } if parameter == "approval_rate_target"));
        assert!(ApprovalRule::calibrate(&policy, 0.5, &sample).is_ok());
    }
}
