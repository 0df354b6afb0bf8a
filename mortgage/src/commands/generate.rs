// mortgage/src/commands/generate.rs
//
// USE CASE: Generate, validate and export the star schema.

use anyhow::Context;
use std::path::Path;

use mortgage_core::application::run_pipeline;
use mortgage_core::domain::dimension::DateRange;
use mortgage_core::infrastructure::adapters::CsvDirectory;
use mortgage_core::infrastructure::config::{PipelineConfig, load_pipeline_config};

use crate::cli::GenerateArgs;

pub fn execute(args: GenerateArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    // A. Layered config: defaults -> YAML -> ENV -> flags
    println!("⚙️  Loading configuration...");
    let mut config = load_pipeline_config(Path::new("."), args.config.as_deref())
        .context("Failed to load configuration")?;
    apply_flags(&mut config, &args);
    tracing::debug!(?config, "Resolved configuration");

    let gen_config = &config.generator;
    println!(
        "   {} applications | {} → {} | seed {} | target approval {:.0}%",
        gen_config.record_count,
        gen_config.date_range.start,
        gen_config.date_range.end,
        gen_config.random_seed,
        gen_config.approval_rate_target * 100.0
    );

    // B. Config is checked before the directory is touched
    gen_config.check()?;
    let sink = CsvDirectory::create(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory '{}'",
            config.output_dir.display()
        )
    })?;

    // C. Run the Pipeline (Application Layer)
    println!("🏗️  Generating star schema...");
    let outcome = run_pipeline(gen_config, &sink).map_err(|err| {
        // Certaines contraintes ne se voient qu'à la calibration
        if err.is_configuration() {
            anyhow::Error::new(err).context("Generator configuration cannot be satisfied")
        } else {
            anyhow::Error::new(err)
        }
    })?;

    println!(
        "📊 {} applications ({:.1}% approved), {} summary rows, {} monthly / {} yearly trend rows",
        outcome.records,
        outcome.approval_rate() * 100.0,
        outcome.summary_rows,
        outcome.trend_rows,
        outcome.yearly_rows
    );
    for path in &outcome.files {
        println!("   ✅ Exported: {}", path.display());
    }

    if !outcome.anomalies.is_empty() {
        println!("🔎 Time-series anomalies found, see data_quality_report.txt");
    }
    if outcome.report.is_clean() {
        println!("🧪 All business rules hold.");
    } else {
        println!(
            "⚠️  {} rule violation(s), see validation_report.json",
            outcome.report.total_violations()
        );
    }

    println!("✨ Done in {:.2?}", start.elapsed());
    Ok(())
}

/// CLI flags are the last (highest priority) layer.
pub fn apply_flags(config: &mut PipelineConfig, args: &GenerateArgs) {
    let gen_config = &mut config.generator;
    if let Some(records) = args.records {
        gen_config.record_count = records;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(seed) = args.seed {
        gen_config.random_seed = seed;
    }
    if let Some(rate) = args.approval_rate {
        gen_config.approval_rate_target = rate;
    }
    // Une borne seule garde l'autre borne de la config
    let DateRange { start, end } = gen_config.date_range;
    gen_config.date_range = DateRange {
        start: args.start_date.unwrap_or(start),
        end: args.end_date.unwrap_or(end),
    };
}
