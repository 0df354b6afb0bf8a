// mortgage-core/src/domain/mod.rs

pub mod dimension;
pub mod error;
pub mod fact;
pub mod generator;
pub mod quality;
pub mod summary;
pub mod table;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
pub use table::{Table, round2};
