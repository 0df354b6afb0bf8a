// mortgage-core/src/application/mod.rs

pub mod clean;
pub mod pipeline;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le CLI fait `use mortgage_core::application::{run_pipeline, clean_outputs};`
// sans connaître la structure interne des fichiers.

pub use clean::clean_outputs;
pub use pipeline::{PipelineOutcome, output_files, run_pipeline};
pub use validation::validate_exported;
