// mortgage-core/src/infrastructure/config/mod.rs

pub mod settings;

pub use settings::{
    DEFAULT_CONFIG_FILES, PipelineConfig, apply_env_overrides, load_pipeline_config, parse_config,
};
