// mortgage-core/src/domain/generator/distribution.rs

use rand::Rng;
use rand::distributions::WeightedIndex;
use rand_distr::{Distribution, LogNormal, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Closed set of continuous distributions a generator field can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDistribution {
    Uniform { low: f64, high: f64 },
    Normal { mean: f64, std_dev: f64 },
    /// Parameterised by its median (`exp(mu)`) rather than `mu`.
    LogNormal { median: f64, sigma: f64 },
}

impl ValueDistribution {
    /// Builds the sampler, rejecting parameters the underlying distribution
    /// cannot represent. `parameter` names the config key for the error.
    pub fn sampler(&self, parameter: &str) -> Result<ValueSampler, DomainError> {
        let invalid = |reason: String| DomainError::configuration(parameter, reason);

        match *self {
            Self::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite()) || low >= high {
                    return Err(invalid(format!(
                        "uniform bounds must satisfy low < high (got {} .. {})",
                        low, high
                    )));
                }
                Ok(ValueSampler::Uniform(Uniform::new(low, high)))
            }
            Self::Normal { mean, std_dev } => {
                if !mean.is_finite() || !(std_dev > 0.0) {
                    return Err(invalid(format!(
                        "normal needs a finite mean and std_dev > 0 (got {}, {})",
                        mean, std_dev
                    )));
                }
                Normal::new(mean, std_dev)
                    .map(ValueSampler::Normal)
                    .map_err(|e| invalid(e.to_string()))
            }
            Self::LogNormal { median, sigma } => {
                if !(median > 0.0) || !(sigma > 0.0) {
                    return Err(invalid(format!(
                        "log_normal needs median > 0 and sigma > 0 (got {}, {})",
                        median, sigma
                    )));
                }
                LogNormal::new(median.ln(), sigma)
                    .map(ValueSampler::LogNormal)
                    .map_err(|e| invalid(e.to_string()))
            }
        }
    }
}

/// Ready-to-draw form of a [`ValueDistribution`].
#[derive(Debug, Clone)]
pub enum ValueSampler {
    Uniform(Uniform<f64>),
    Normal(Normal<f64>),
    LogNormal(LogNormal<f64>),
}

impl ValueSampler {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Uniform(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
            Self::LogNormal(d) => d.sample(rng),
        }
    }

    /// Draws then clips into `[min, max]`.
    pub fn sample_clipped<R: Rng + ?Sized>(&self, rng: &mut R, min: f64, max: f64) -> f64 {
        self.sample(rng).clamp(min, max)
    }
}

/// Weighted choice over a fixed list of values.
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    values: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Clone> Categorical<T> {
    pub fn new(
        parameter: &str,
        entries: impl IntoIterator<Item = (T, f64)>,
    ) -> Result<Self, DomainError> {
        let (values, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::configuration(
                parameter,
                "weights must be finite and non-negative",
            ));
        }
        let index = WeightedIndex::new(&weights).map_err(|e| {
            DomainError::configuration(parameter, format!("invalid weights: {}", e))
        })?;
        Ok(Self { values, index })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)].clone()
    }
}
