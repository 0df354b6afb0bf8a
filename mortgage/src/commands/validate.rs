// mortgage/src/commands/validate.rs
//
// USE CASE: Re-check an exported directory against the business rules.

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};

use mortgage_core::application::validate_exported;
use mortgage_core::domain::quality::{ValidationPolicy, ValidationReport};
use mortgage_core::infrastructure::adapters::CsvDirectory;
use mortgage_core::infrastructure::config::{PipelineConfig, load_pipeline_config};

use crate::cli::ValidateArgs;

pub fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let config = load_pipeline_config(Path::new("."), args.config.as_deref())
        .context("Failed to load configuration")?;
    let (input_dir, policy) = resolve(&config, &args);

    if !input_dir.is_dir() {
        anyhow::bail!(
            "❌ Export directory not found at: {}\n👉 Have you run 'mortgage generate'?",
            input_dir.display()
        );
    }

    println!(
        "🧪 Validating '{}' (credit floor {})...",
        input_dir.display(),
        policy.min_credit_score
    );
    let report = validate_exported(&CsvDirectory::new(&input_dir), &policy)?;

    println!(
        "   Checked {} applications and {} summary rows",
        report.facts_checked, report.summary_rows_checked
    );

    if report.is_clean() {
        println!("✅ All business rules hold.");
        return Ok(());
    }

    println!("{}", findings_table(&report));
    if args.strict {
        anyhow::bail!(
            "{} rule violation(s) found in '{}'",
            report.total_violations(),
            input_dir.display()
        );
    }
    println!("⚠️  {} rule violation(s) found.", report.total_violations());
    Ok(())
}

/// Flags win; otherwise the values the dataset was generated with.
pub fn resolve(config: &PipelineConfig, args: &ValidateArgs) -> (PathBuf, ValidationPolicy) {
    let mut policy = ValidationPolicy::from(&config.generator.approval);
    if let Some(score) = args.min_credit_score {
        policy.min_credit_score = score;
    }
    let input_dir = args
        .input_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    (input_dir, policy)
}

fn findings_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Table", "Rule", "Violations", "Description", "Sample IDs"]);

    for (rule, finding) in &report.findings {
        let samples: Vec<String> = finding.sample_ids.iter().map(|id| id.to_string()).collect();
        let scope = if rule.is_summary_rule() { "monthly_summary" } else { "mortgage_applications" };
        table.add_row(vec![
            scope.to_string(),
            rule.to_string(),
            finding.count.to_string(),
            rule.description().to_string(),
            samples.join(", "),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::domain::quality::Rule;

    use mortgage_core::infrastructure::config::parse_config;

    #[test]
    fn test_credit_floor_follows_config() -> anyhow::Result<()> {
        let config = parse_config("output_dir: exports\napproval:\n  min_credit_score: 650\n")?;

        let (dir, policy) = resolve(&config, &ValidateArgs::default());
        assert_eq!(dir, PathBuf::from("exports"));
        assert_eq!(policy.min_credit_score, 650);

        let args = ValidateArgs {
            input_dir: Some(PathBuf::from("elsewhere")),
            min_credit_score: Some(700),
            ..Default::default()
        };
        let (dir, policy) = resolve(&config, &args);
        assert_eq!(dir, PathBuf::from("elsewhere"));
        assert_eq!(policy.min_credit_score, 700);
        Ok(())
    }

    #[test]
    fn test_findings_table_lists_each_rule() {
        let mut report = ValidationReport::default();
        report.record(Rule::LtvOutOfBounds, Some(17));
        report.record(Rule::DuplicateId, Some(3));

        let rendered = findings_table(&report).to_string();
        assert!(rendered.contains("ltv_out_of_bounds"));
        assert!(rendered.contains("duplicate_id"));
        assert!(rendered.contains("17"));
        assert!(rendered.contains("mortgage_applications"));
        assert!(!rendered.contains("monthly_summary"));
    }
}
