// mortgage-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Configuration Error on '{parameter}': {reason}")]
    #[diagnostic(
        code(mortgage::domain::configuration),
        help("Fix '{parameter}' in mortgage.yaml, the MORTGAGE_* environment or the CLI flags.")
    )]
    Configuration { parameter: String, reason: String },

    // Un bug de logique si ça remonte jusqu'à l'utilisateur.
    #[error("Invariant '{rule}' still violated after {attempts} sampling attempts")]
    #[diagnostic(
        code(mortgage::domain::invariant),
        help("The generator configuration leaves almost no valid sample space for this rule.")
    )]
    InvariantViolation { rule: String, attempts: u32 },

    #[error("Schema Error: table '{table}' is missing required column '{column}'")]
    #[diagnostic(code(mortgage::domain::schema))]
    Schema { table: String, column: String },
}

impl DomainError {
    pub fn configuration(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
