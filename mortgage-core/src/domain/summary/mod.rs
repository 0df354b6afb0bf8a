// mortgage-core/src/domain/summary/mod.rs

pub mod monthly;
pub mod trends;

pub use monthly::{MonthlySummaryRow, aggregate};
pub use trends::{TrendRow, YearlyTrendRow, build_trends, build_yearly_trends};
