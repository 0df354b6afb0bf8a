// mortgage-core/src/infrastructure/config/settings.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::generator::GeneratorConfig;
use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["mortgage.yaml", "mortgage.yml"];

/// Run-level settings: where to write, plus every generator knob (flat keys).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    #[serde(flatten)]
    pub generator: GeneratorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("csv"),
            generator: GeneratorConfig::default(),
        }
    }
}

// --- LOADER ---

/// Defaults, then the YAML file, then `MORTGAGE_*` variables.
///
/// `explicit` must exist when given; otherwise `mortgage.yaml` / `mortgage.yml`
/// in `project_dir` are picked up if present.
#[instrument(skip(project_dir))]
pub fn load_pipeline_config(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<PipelineConfig, InfrastructureError> {
    let mut config = match find_config_file(project_dir, explicit)? {
        Some(path) => {
            info!(path = ?path, "Loading configuration file");
            let content = fs::read_to_string(&path)?;
            parse_config(&content)?
        }
        None => PipelineConfig::default(),
    };

    // Override via Variables d'Environnement (Pattern 'Layering')
    apply_env_overrides(&mut config)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<PipelineConfig, InfrastructureError> {
    // Un fichier vide est une config par défaut, pas une erreur
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn find_config_file(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<Option<PathBuf>, InfrastructureError> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(InfrastructureError::ConfigNotFound(
            path.display().to_string(),
        ));
    }
    Ok(DEFAULT_CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file()))
}

pub fn apply_env_overrides(config: &mut PipelineConfig) -> Result<(), InfrastructureError> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Same as [`apply_env_overrides`] with an injectable lookup.
pub fn apply_overrides<F>(config: &mut PipelineConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("MORTGAGE_OUTPUT_DIR") {
        info!(old = ?config.output_dir, new = ?val, "Overriding output dir via ENV");
        config.output_dir = PathBuf::from(val);
    }
    if let Some(val) = lookup("MORTGAGE_RECORD_COUNT") {
        config.generator.record_count = parse_env("MORTGAGE_RECORD_COUNT", &val)?;
        info!(records = config.generator.record_count, "Overriding record count via ENV");
    }
    if let Some(val) = lookup("MORTGAGE_SEED") {
        config.generator.random_seed = parse_env("MORTGAGE_SEED", &val)?;
        info!(seed = config.generator.random_seed, "Overriding seed via ENV");
    }
    if let Some(val) = lookup("MORTGAGE_APPROVAL_RATE") {
        config.generator.approval_rate_target = parse_env("MORTGAGE_APPROVAL_RATE", &val)?;
        info!(
            target = config.generator.approval_rate_target,
            "Overriding approval rate via ENV"
        );
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(variable: &str, value: &str) -> Result<T, InfrastructureError> {
    value
        .trim()
        .parse()
        .map_err(|_| InfrastructureError::InvalidEnv {
            variable: variable.to_string(),
            value: value.to_string(),
        })
}
