// mortgage-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(mortgage::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Failed to write '{}': {source}", .path.display())]
    #[diagnostic(
        code(mortgage::infra::write),
        help("The previous version of the file (if any) was left untouched.")
    )]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{}': {source}", .path.display())]
    #[diagnostic(
        code(mortgage::infra::read),
        help("Run `mortgage generate` first or point --input-dir at an export directory.")
    )]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- TABULAR FILES ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(mortgage::infra::csv),
        help("Check that the file was produced by `mortgage generate` and not edited by hand.")
    )]
    Csv(#[from] csv::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(mortgage::infra::json))]
    Json(#[from] serde_json::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(mortgage::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration file not found at '{0}'")]
    #[diagnostic(code(mortgage::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid value '{value}' for environment variable {variable}")]
    #[diagnostic(code(mortgage::infra::env))]
    InvalidEnv { variable: String, value: String },
}
