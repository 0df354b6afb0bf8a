// mortgage-core/src/domain/quality/mod.rs

pub mod anomaly;
pub mod overview;
pub mod report;
pub mod rules;
pub mod validator;

pub use anomaly::{AnomalyScan, IqrFences, MonthlyOutlier, OutlierSeries};
pub use overview::{QualityOverview, render_quality_report};
pub use report::{MAX_SAMPLES, RuleFinding, ValidationReport};
pub use rules::Rule;
pub use validator::{ValidationPolicy, Validator};
