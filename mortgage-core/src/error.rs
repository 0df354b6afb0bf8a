// mortgage-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MortgageError {
    // --- ERREURS DU DOMAINE (Configuration, Invariants, Schéma) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, CSV, YAML) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

impl MortgageError {
    /// True for failures the user caused through parameters (as opposed to IO or data).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Configuration { .. }))
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for MortgageError {
    fn from(err: std::io::Error) -> Self {
        MortgageError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<csv::Error> for MortgageError {
    fn from(err: csv::Error) -> Self {
        MortgageError::Infrastructure(InfrastructureError::Csv(err))
    }
}
