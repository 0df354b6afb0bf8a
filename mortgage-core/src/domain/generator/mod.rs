// mortgage-core/src/domain/generator/mod.rs

pub mod approval;
pub mod config;
pub mod distribution;

pub use approval::{ApplicantProfile, ApprovalRule};
pub use config::{ApprovalPolicy, GeneratorConfig, ScoreWeights, Seasonality};
pub use distribution::{Categorical, ValueDistribution, ValueSampler};

use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::domain::dimension::{Dimensions, PropertyType, Province};
use crate::domain::error::DomainError;
use crate::domain::fact::{EmploymentType, MAX_CREDIT_SCORE, MAX_LTV, MIN_CREDIT_SCORE, MIN_LTV, MortgageApplication};
use crate::domain::table::round2;

/// Retry budget for one record before the run is aborted.
pub const MAX_ATTEMPTS: u32 = 1_000;

/// Size of the sample the approval threshold is calibrated on.
pub const CALIBRATION_SAMPLE: usize = 20_000;

// Keeps the calibration stream independent from the fact stream.
const CALIBRATION_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Everything sampled for one application before the decision.
#[derive(Debug, Clone)]
struct Draft {
    date: NaiveDate,
    province: Province,
    property_type: PropertyType,
    property_value: f64,
    mortgage_value: f64,
    ltv_ratio: f64,
    applicant_income: f64,
    credit_score: u16,
    employment_type: EmploymentType,
}

impl Draft {
    fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            credit_score: self.credit_score,
            ltv_ratio: self.ltv_ratio,
            mortgage_value: self.mortgage_value,
            applicant_income: self.applicant_income,
            employment_type: self.employment_type,
        }
    }
}

/// Synthesises mortgage applications from a checked [`GeneratorConfig`].
///
/// Every random draw comes from an explicitly seeded `StdRng`, so the same
/// configuration and dimensions always produce the same records.
#[derive(Debug, Clone)]
pub struct FactGenerator {
    record_count: usize,
    seed: u64,

    dates: Categorical<NaiveDate>,
    provinces: Categorical<Province>,
    property_types: Categorical<PropertyType>,
    employment: Categorical<EmploymentType>,
    amortization: Categorical<u32>,

    property_value: ValueSampler,
    property_bounds: (f64, f64),
    ltv_ratio: ValueSampler,
    mortgage_bounds: (f64, f64),
    applicant_income: ValueSampler,
    income_bounds: (f64, f64),
    credit_score: ValueSampler,
    interest_rate: Uniform<f64>,

    rule: ApprovalRule,
}

impl FactGenerator {
    /// Checks the configuration, builds every sampler and calibrates the
    /// approval rule. Nothing is generated yet.
    pub fn new(config: &GeneratorConfig, dims: &Dimensions) -> Result<Self, DomainError> {
        config.check()?;

        let dates = Categorical::new(
            "seasonality",
            dims.dates
                .iter()
                .filter(|row| config.date_range.contains(row.date))
                .map(|row| (row.date, config.seasonality.weight(row.date.month()))),
        )?;
        let provinces = Categorical::new(
            "provinces",
            dims.provinces.iter().map(|p| (*p, p.population_weight)),
        )?;
        let property_types = Categorical::new(
            "property_types",
            dims.property_types.iter().map(|t| (*t, t.weight)),
        )?;
        let employment = Categorical::new(
            "employment_mix",
            config.employment_mix.iter().map(|(k, w)| (*k, *w)),
        )?;
        let amortization = Categorical::new(
            "amortization_weights",
            config.amortization_weights.iter().map(|(k, w)| (*k, *w)),
        )?;

        let mut generator = Self {
            record_count: config.record_count,
            seed: config.random_seed,
            dates,
            provinces,
            property_types,
            employment,
            amortization,
            property_value: config.property_value.sampler("property_value")?,
            property_bounds: (config.min_property_value, config.max_property_value),
            ltv_ratio: config.ltv_ratio.sampler("ltv_ratio")?,
            mortgage_bounds: (config.min_mortgage_value, config.max_mortgage_value),
            applicant_income: config.applicant_income.sampler("applicant_income")?,
            income_bounds: (config.min_income, config.max_income),
            credit_score: config.credit_score.sampler("credit_score")?,
            interest_rate: Uniform::new_inclusive(config.min_interest_rate, config.max_interest_rate),
            rule: ApprovalRule::with_threshold(&config.approval, f64::INFINITY),
        };

        // --- CALIBRATION ---
        let mut rng = StdRng::seed_from_u64(config.random_seed ^ CALIBRATION_SALT);
        let sample = (0..CALIBRATION_SAMPLE)
            .map(|_| generator.draw(&mut rng).map(|d| d.profile()))
            .collect::<Result<Vec<_>, _>>()?;
        generator.rule =
            ApprovalRule::calibrate(&config.approval, config.approval_rate_target, &sample)?;

        debug!(
            threshold = generator.rule.threshold(),
            sample = CALIBRATION_SAMPLE,
            "Approval rule calibrated"
        );
        Ok(generator)
    }

    /// Produces `record_count` applications with ids `1..=record_count`.
    pub fn generate(&self) -> Result<Vec<MortgageApplication>, DomainError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut records = Vec::with_capacity(self.record_count);

        for id in 1..=self.record_count as u64 {
            let draft = self.draw(&mut rng)?;
            let status = self.rule.decide(&draft.profile());

            let (interest_rate, amortization_years) = if status.is_approved() {
                (
                    Some(round2(self.interest_rate.sample(&mut rng))),
                    Some(self.amortization.sample(&mut rng)),
                )
            } else {
                (None, None)
            };

            records.push(MortgageApplication {
                id,
                application_date: draft.date,
                province: draft.province.code.to_string(),
                property_type: draft.property_type.name.to_string(),
                mortgage_value: draft.mortgage_value,
                property_value: draft.property_value,
                ltv_ratio: draft.ltv_ratio,
                applicant_income: draft.applicant_income,
                credit_score: draft.credit_score,
                employment_type: draft.employment_type,
                down_payment: round2(draft.property_value - draft.mortgage_value),
                approval_status: status,
                interest_rate,
                amortization_years,
            });
        }

        Ok(records)
    }

    fn draw(&self, rng: &mut StdRng) -> Result<Draft, DomainError> {
        let date = self.dates.sample(rng);
        let province = self.provinces.sample(rng);
        let property_type = self.property_types.sample(rng);
        let (property_value, mortgage_value, ltv_ratio) =
            self.draw_amounts(rng, &province, &property_type)?;

        let (min_income, max_income) = self.income_bounds;
        let applicant_income = round2(self.applicant_income.sample_clipped(rng, min_income, max_income));
        let credit_score = self
            .credit_score
            .sample_clipped(rng, f64::from(MIN_CREDIT_SCORE), f64::from(MAX_CREDIT_SCORE))
            .round() as u16;
        let employment_type = self.employment.sample(rng);

        Ok(Draft {
            date,
            province,
            property_type,
            property_value,
            mortgage_value,
            ltv_ratio,
            applicant_income,
            credit_score,
            employment_type,
        })
    }

    /// Property value, mortgage value and LTV, resampled until
    /// `property > mortgage` and `50 <= ltv <= type max` both hold.
    fn draw_amounts(
        &self,
        rng: &mut StdRng,
        province: &Province,
        property_type: &PropertyType,
    ) -> Result<(f64, f64, f64), DomainError> {
        let (min_property, max_property) = self.property_bounds;
        let (min_mortgage, max_mortgage) = self.mortgage_bounds;
        let max_ltv = MAX_LTV.min(property_type.max_ltv);

        for _ in 0..MAX_ATTEMPTS {
            let property = round2(
                (self.property_value.sample(rng) * province.price_index).clamp(min_property, max_property),
            );
            let target_ltv = self.ltv_ratio.sample_clipped(rng, MIN_LTV, max_ltv);
            let mortgage = round2(property * target_ltv / 100.0).clamp(min_mortgage, max_mortgage);
            let ltv = round2(mortgage / property * 100.0);

            if property > mortgage && (MIN_LTV..=max_ltv).contains(&ltv) {
                return Ok((property, mortgage, ltv));
            }
        }

        Err(DomainError::InvariantViolation {
            rule: format!("ltv_ratio within [{}, {}]", MIN_LTV, max_ltv),
            attempts: MAX_ATTEMPTS,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dimension::{DateRange, PROPERTY_TYPES};
    use crate::domain::fact::AMORTIZATION_TERMS;
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(config: &GeneratorConfig) -> Vec<MortgageApplication> {
        let dims = Dimensions::build(&config.date_range).unwrap();
        FactGenerator::new(config, &dims).unwrap().generate().unwrap()
    }

    fn small(records: usize) -> GeneratorConfig {
        GeneratorConfig {
            record_count: records,
            ..Default::default()
        }
    }

    #[test]
    fn test_january_run_with_seed_42() {
        let config = GeneratorConfig {
            record_count: 100,
            random_seed: 42,
            date_range: DateRange::new(ymd(2020, 1, 1), ymd(2020, 1, 31)).unwrap(),
            ..Default::default()
        };
        let rows = run(&config);

        assert_eq!(rows.len(), 100);
        assert!(rows.iter().all(|r| r.application_date.year() == 2020 && r.application_date.month() == 1));
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=100).collect::<Vec<u64>>());
    }

    #[test]
    fn test_every_row_holds_the_business_rules() {
        let rows = run(&small(5_000));
        let provinces: HashSet<&str> = crate::domain::dimension::PROVINCES.iter().map(|p| p.code).collect();

        for r in &rows {
            assert!(r.property_value > r.mortgage_value, "row {}", r.id);
            assert!((MIN_LTV..=MAX_LTV).contains(&r.ltv_ratio), "row {}", r.id);
            assert!((r.ltv_ratio - r.derived_ltv()).abs() <= 0.01, "row {}", r.id);
            assert!((r.down_payment - (r.property_value - r.mortgage_value)).abs() <= 0.01);
            assert!((MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&r.credit_score));
            assert!(provinces.contains(r.province.as_str()));

            let kind = PROPERTY_TYPES.iter().find(|p| p.name == r.property_type).unwrap();
            assert!(r.ltv_ratio <= kind.max_ltv, "row {} over type max", r.id);

            if r.is_approved() {
                assert!(r.credit_score >= 600);
                let years = r.amortization_years.unwrap();
                assert!(AMORTIZATION_TERMS.contains(&years));
                let rate = r.interest_rate.unwrap();
                assert!((2.5..=6.5).contains(&rate));
            } else {
                assert!(r.interest_rate.is_none() && r.amortization_years.is_none());
            }
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let config = small(500);
        assert_eq!(run(&config), run(&config));

        let other = GeneratorConfig {
            random_seed: 43,
            ..config
        };
        assert_ne!(run(&small(500)), run(&other));
    }

    #[test]
    fn test_approval_rate_converges_to_target() {
        let rows = run(&GeneratorConfig::default());
        assert_eq!(rows.len(), 50_000);
        let approved = rows.iter().filter(|r| r.is_approved()).count();
        let rate = approved as f64 / rows.len() as f64;
        assert!((rate - 0.75).abs() <= 0.02, "realized rate {}", rate);
    }

    #[test]
    fn test_lower_target_lowers_rate() {
        let config = GeneratorConfig {
            approval_rate_target: 0.4,
            ..small(10_000)
        };
        let rows = run(&config);
        let rate = rows.iter().filter(|r| r.is_approved()).count() as f64 / rows.len() as f64;
        assert!((rate - 0.4).abs() <= 0.03, "realized rate {}", rate);
    }

    #[test]
    fn test_invalid_config_fails_before_generation() {
        let config = GeneratorConfig {
            min_property_value: 600_000.0,
            max_property_value: 500_000.0,
            ..small(10)
        };
        let dims = Dimensions::build(&config.date_range).unwrap();
        let err = FactGenerator::new(&config, &dims).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[test]
    fn test_unreachable_approval_target() {
        let config = GeneratorConfig {
            approval_rate_target: 0.99,
            ..small(10)
        };
        let dims = Dimensions::build(&config.date_range).unwrap();
        let err = FactGenerator::new(&config, &dims).unwrap_err();
        assert!(err.to_string().contains("approval_rate_target"));
    }

    #[test]
    fn test_seasonality_shifts_volume() {
        let mut weights = [0.0; 12];
        weights[5] = 1.0;
        let config = GeneratorConfig {
            seasonality: Seasonality::Monthly(weights),
            ..small(300)
        };
        assert!(run(&config).iter().all(|r| r.application_date.month() == 6));
    }

    #[test]
    fn test_narrow_bounds_exhaust_retry_budget() {
        // Every property is pinned at 150k, every mortgage at >= 149k: LTV is always above 95
        let config = GeneratorConfig {
            min_property_value: 150_000.0,
            max_property_value: 160_000.0,
            min_mortgage_value: 149_000.0,
            max_mortgage_value: 2_500_000.0,
            property_value: ValueDistribution::Uniform {
                low: 10_000.0,
                high: 20_000.0,
            },
            ..small(10)
        };
        let dims = Dimensions::build(&config.date_range).unwrap();
        let err = FactGenerator::new(&config, &dims).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation { attempts: MAX_ATTEMPTS, .. }));
    }
}
