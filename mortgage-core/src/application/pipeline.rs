// mortgage-core/src/application/pipeline.rs

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::error::MortgageError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::table_store::TableSink;

// Domain
use crate::domain::dimension::{DateRow, Dimensions, PropertyType, Province};
use crate::domain::fact::MortgageApplication;
use crate::domain::generator::{FactGenerator, GeneratorConfig};
use crate::domain::quality::{
    AnomalyScan, ValidationPolicy, ValidationReport, Validator, render_quality_report,
};
use crate::domain::summary::{
    MonthlySummaryRow, TrendRow, YearlyTrendRow, aggregate, build_trends, build_yearly_trends,
};
use crate::domain::table::Table;

pub const VALIDATION_REPORT_FILE: &str = "validation_report.json";
pub const QUALITY_REPORT_FILE: &str = "data_quality_report.txt";

/// Every file a run writes, in write order.
pub fn output_files() -> Vec<String> {
    vec![
        DateRow::file_name(),
        Province::file_name(),
        PropertyType::file_name(),
        MortgageApplication::file_name(),
        MonthlySummaryRow::file_name(),
        TrendRow::file_name(),
        YearlyTrendRow::file_name(),
        VALIDATION_REPORT_FILE.to_string(),
        QUALITY_REPORT_FILE.to_string(),
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub records: usize,
    pub approved: usize,
    pub summary_rows: usize,
    pub trend_rows: usize,
    pub yearly_rows: usize,
    pub anomalies: AnomalyScan,
    pub report: ValidationReport,
    pub files: Vec<PathBuf>,
}

impl PipelineOutcome {
    pub fn approval_rate(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            self.approved as f64 / self.records as f64
        }
    }
}

/// Full refresh: dimensions, facts, rollups, validation, export.
///
/// The configuration is checked before anything is generated or written.
/// Validation findings never abort the run; they are exported with the data.
#[instrument(skip_all, fields(records = config.record_count, seed = config.random_seed))]
pub fn run_pipeline<S: TableSink>(
    config: &GeneratorConfig,
    sink: &S,
) -> Result<PipelineOutcome, MortgageError> {
    // 1. DIMENSIONS
    let dims = Dimensions::build(&config.date_range)?;
    info!(days = dims.dates.len(), "Dimensions built");

    // 2. FACTS (config checked + approval rule calibrated here)
    let generator = FactGenerator::new(config, &dims)?;
    let facts = generator.generate()?;
    let approved = facts.iter().filter(|f| f.is_approved()).count();
    info!(rows = facts.len(), approved, "Applications generated");

    // 3. ROLLUPS
    let summary = aggregate(&facts);
    let trends = build_trends(&facts);
    let yearly = build_yearly_trends(&facts);
    let anomalies = AnomalyScan::from_trends(&trends);
    if !anomalies.is_empty() {
        warn!(
            missing_months = anomalies.missing_months.len(),
            application_outliers = anomalies.applications.outliers.len(),
            approval_outliers = anomalies.approvals.outliers.len(),
            "Monthly series has anomalies"
        );
    }

    // 4. VALIDATION
    let keys = dims.keys();
    let policy = ValidationPolicy::from(&config.approval);
    let report = Validator::new(&keys, &policy).validate(&facts, Some(&summary));
    if !report.is_clean() {
        warn!(
            violations = report.total_violations(),
            "Generated data breaks business rules"
        );
    }

    // 5. EXPORT
    let text = render_quality_report(&facts, &anomalies, &report);
    let export = Export {
        dims: &dims,
        facts: &facts,
        summary: &summary,
        trends: &trends,
        yearly: &yearly,
        report: &report,
        quality_text: &text,
    };
    let files = match export.write(sink) {
        Ok(files) => files,
        Err(err) => {
            // Jamais un mélange de fichiers de deux runs
            discard_outputs(sink);
            return Err(err);
        }
    };
    info!(files = files.len(), "Export complete");

    Ok(PipelineOutcome {
        records: facts.len(),
        approved,
        summary_rows: summary.len(),
        trend_rows: trends.len(),
        yearly_rows: yearly.len(),
        anomalies,
        report,
        files,
    })
}

struct Export<'a> {
    dims: &'a Dimensions,
    facts: &'a [MortgageApplication],
    summary: &'a [MonthlySummaryRow],
    trends: &'a [TrendRow],
    yearly: &'a [YearlyTrendRow],
    report: &'a ValidationReport,
    quality_text: &'a str,
}

impl Export<'_> {
    /// Writes in `output_files()` order.
    fn write<S: TableSink>(&self, sink: &S) -> Result<Vec<PathBuf>, MortgageError> {
        let mut files = vec![
            sink.write_table(&self.dims.dates)?,
            sink.write_table(&self.dims.provinces)?,
            sink.write_table(&self.dims.property_types)?,
            sink.write_table(self.facts)?,
            sink.write_table(self.summary)?,
            sink.write_table(self.trends)?,
            sink.write_table(self.yearly)?,
        ];
        let json = serde_json::to_vec_pretty(self.report).map_err(InfrastructureError::from)?;
        files.push(sink.write_document(VALIDATION_REPORT_FILE, &json)?);
        files.push(sink.write_document(QUALITY_REPORT_FILE, self.quality_text.as_bytes())?);
        Ok(files)
    }
}

/// Best effort: the write error is the one reported.
fn discard_outputs<S: TableSink>(sink: &S) {
    for name in output_files() {
        if let Err(err) = sink.remove(&name) {
            warn!(file = %name, error = %err, "Could not remove output after a failed export");
        }
    }
}
