// mortgage-core/src/domain/generator/config.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::domain::dimension::DateRange;
use crate::domain::error::DomainError;
use crate::domain::fact::{AMORTIZATION_TERMS, EmploymentType, MAX_LTV, MIN_LTV};
use crate::domain::generator::distribution::ValueDistribution;

/// How application dates are spread over the window.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Seasonality {
    Uniform,
    /// Relative weight of each calendar month, January first.
    Monthly([f64; 12]),
}

impl Default for Seasonality {
    // Printemps / été plus actifs
    fn default() -> Self {
        Self::Monthly([0.9, 0.9, 0.9, 1.2, 1.2, 1.2, 1.2, 1.2, 0.9, 0.9, 0.9, 0.9])
    }
}

impl Seasonality {
    pub fn weight(&self, month: u32) -> f64 {
        match self {
            Self::Uniform => 1.0,
            Self::Monthly(weights) => weights
                .get(month.saturating_sub(1) as usize)
                .copied()
                .unwrap_or(0.0),
        }
    }
}

/// Relative weight of each approval score component.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct ScoreWeights {
    #[validate(range(min = 0.0))]
    pub credit: f64,
    #[validate(range(min = 0.0))]
    pub ltv: f64,
    #[validate(range(min = 0.0))]
    pub affordability: f64,
    #[validate(range(min = 0.0))]
    pub employment: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            credit: 0.45,
            ltv: 0.20,
            affordability: 0.25,
            employment: 0.10,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct ApprovalPolicy {
    /// No application below this score is ever approved.
    #[validate(range(min = 500, max = 850))]
    pub min_credit_score: u16,
    #[validate(nested)]
    pub weights: ScoreWeights,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            min_credit_score: 600,
            weights: ScoreWeights::default(),
        }
    }
}

/// Everything the fact generator needs. Loaded from YAML with every key optional.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct GeneratorConfig {
    #[validate(range(min = 1, message = "at least one application must be generated"))]
    pub record_count: usize,
    pub date_range: DateRange,
    pub random_seed: u64,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub approval_rate_target: f64,
    /// `uniform` or `{ monthly: [..12 weights] }`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub seasonality: Seasonality,

    // --- Property value ---
    pub property_value: ValueDistribution,
    pub min_property_value: f64,
    pub max_property_value: f64,

    // --- Loan ---
    /// Target LTV in percent, clipped to [50, property type max].
    pub ltv_ratio: ValueDistribution,
    pub min_mortgage_value: f64,
    pub max_mortgage_value: f64,

    // --- Applicant ---
    pub applicant_income: ValueDistribution,
    pub min_income: f64,
    pub max_income: f64,
    pub credit_score: ValueDistribution,
    pub employment_mix: BTreeMap<EmploymentType, f64>,

    // --- Decision & terms ---
    #[validate(nested)]
    pub approval: ApprovalPolicy,
    pub min_interest_rate: f64,
    pub max_interest_rate: f64,
    pub amortization_weights: BTreeMap<u32, f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: 50_000,
            date_range: DateRange::default(),
            random_seed: 42,
            approval_rate_target: 0.75,
            seasonality: Seasonality::default(),
            property_value: ValueDistribution::LogNormal {
                median: 450_000.0,
                sigma: 0.45,
            },
            min_property_value: 150_000.0,
            max_property_value: 3_000_000.0,
            ltv_ratio: ValueDistribution::Normal {
                mean: 80.0,
                std_dev: 10.0,
            },
            min_mortgage_value: 75_000.0,
            max_mortgage_value: 2_500_000.0,
            applicant_income: ValueDistribution::LogNormal {
                median: 95_000.0,
                sigma: 0.4,
            },
            min_income: 25_000.0,
            max_income: 750_000.0,
            credit_score: ValueDistribution::Normal {
                mean: 720.0,
                std_dev: 80.0,
            },
            employment_mix: BTreeMap::from([
                (EmploymentType::FullTime, 0.70),
                (EmploymentType::SelfEmployed, 0.12),
                (EmploymentType::Contract, 0.10),
                (EmploymentType::PartTime, 0.08),
            ]),
            approval: ApprovalPolicy::default(),
            min_interest_rate: 2.5,
            max_interest_rate: 6.5,
            amortization_weights: BTreeMap::from([(15, 0.10), (20, 0.20), (25, 0.50), (30, 0.20)]),
        }
    }
}

impl GeneratorConfig {
    /// Fail-fast check run before a single row is drawn.
    pub fn check(&self) -> Result<(), DomainError> {
        // 1. Bornes simples (validator derive)
        self.validate().map_err(|errors| {
            let mut fields: Vec<String> = errors.errors().keys().map(|k| k.to_string()).collect();
            fields.sort();
            DomainError::configuration(fields.join(", "), errors.to_string())
        })?;

        // 2. Cohérence entre champs
        self.date_range.check()?;
        check_range("property_value", self.min_property_value, self.max_property_value)?;
        check_range("mortgage_value", self.min_mortgage_value, self.max_mortgage_value)?;
        check_range("income", self.min_income, self.max_income)?;
        check_range("interest_rate", self.min_interest_rate, self.max_interest_rate)?;

        // Some (property, mortgage) pair must land inside [50, 95] LTV.
        if self.min_mortgage_value >= self.max_property_value * MAX_LTV / 100.0 {
            return Err(DomainError::configuration(
                "min_mortgage_value",
                format!(
                    "{} leaves no mortgage at or below {}% of max_property_value {}",
                    self.min_mortgage_value, MAX_LTV, self.max_property_value
                ),
            ));
        }
        if self.max_mortgage_value < self.min_property_value * MIN_LTV / 100.0 {
            return Err(DomainError::configuration(
                "max_mortgage_value",
                format!(
                    "{} is below {}% of min_property_value {}",
                    self.max_mortgage_value, MIN_LTV, self.min_property_value
                ),
            ));
        }

        if self.employment_mix.values().all(|w| *w <= 0.0) {
            return Err(DomainError::configuration(
                "employment_mix",
                "at least one employment type needs a positive weight",
            ));
        }

        if let Some(term) = self
            .amortization_weights
            .keys()
            .find(|t| !AMORTIZATION_TERMS.contains(t))
        {
            return Err(DomainError::configuration(
                "amortization_weights",
                format!(
                    "{} years is not an offered term (allowed: {:?})",
                    term, AMORTIZATION_TERMS
                ),
            ));
        }

        if let Seasonality::Monthly(weights) = &self.seasonality
            && weights.iter().any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(DomainError::configuration(
                "seasonality",
                "monthly weights must be finite and non-negative",
            ));
        }

        let w = &self.approval.weights;
        if w.credit + w.ltv + w.affordability + w.employment <= 0.0 {
            return Err(DomainError::configuration(
                "approval.weights",
                "at least one score weight must be positive",
            ));
        }

        Ok(())
    }
}

fn check_range(name: &str, min: f64, max: f64) -> Result<(), DomainError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(DomainError::configuration(
            format!("min_{}", name),
            "bounds must be finite numbers",
        ));
    }
    if min <= 0.0 {
        return Err(DomainError::configuration(
            format!("min_{}", name),
            format!("must be positive (got {})", min),
        ));
    }
    if min > max {
        return Err(DomainError::configuration(
            format!("min_{}", name),
            format!("min_{0} {1} is greater than max_{0} {2}", name, min, max),
        ));
    }
    Ok(())
}
