// mortgage-core/src/application/validation.rs

use tracing::{info, instrument, warn};

// Imports Hexagonaux
use crate::domain::dimension::{DateKey, PropertyTypeKey, ProvinceKey, ReferenceKeys};
use crate::domain::fact::MortgageApplication;
use crate::domain::quality::{ValidationPolicy, ValidationReport, Validator};
use crate::domain::summary::MonthlySummaryRow;
use crate::error::MortgageError;
use crate::ports::table_store::TableSource;

/// Re-checks an exported dataset against the dimension files found next to it.
///
/// The fact table and the province / property type dimensions are required.
/// The date dimension and the summary are checked when present.
#[instrument(skip_all)]
pub fn validate_exported<S: TableSource>(
    source: &S,
    policy: &ValidationPolicy,
) -> Result<ValidationReport, MortgageError> {
    let provinces: Vec<ProvinceKey> = source.read_table()?;
    let property_types: Vec<PropertyTypeKey> = source.read_table()?;
    let dates: Vec<DateKey> = if source.has_table::<DateKey>() {
        source.read_table()?
    } else {
        warn!("No date dimension found, calendar checks skipped");
        Vec::new()
    };
    let keys = ReferenceKeys::from_exported(&provinces, &property_types, &dates);

    let facts: Vec<MortgageApplication> = source.read_table()?;
    let summary: Option<Vec<MonthlySummaryRow>> = if source.has_table::<MonthlySummaryRow>() {
        Some(source.read_table()?)
    } else {
        None
    };

    let report = Validator::new(&keys, policy).validate(&facts, summary.as_deref());
    info!(
        facts = report.facts_checked,
        summary_rows = report.summary_rows_checked,
        violations = report.total_violations(),
        "Validation finished"
    );
    Ok(report)
}
