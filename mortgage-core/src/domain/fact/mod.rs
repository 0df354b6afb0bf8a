// mortgage-core/src/domain/fact/mod.rs

pub mod record;

pub use record::{
    AMORTIZATION_TERMS, ApprovalStatus, EmploymentType, MAX_CREDIT_SCORE, MAX_LTV,
    MIN_CREDIT_SCORE, MIN_LTV, MortgageApplication,
};
