//! Shared configuration for the `PartnerForge` workspace: env-driven
//! application settings and the seed-target YAML file.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod targets;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use targets::{load_targets, normalize_domain, TargetSeed, TargetsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read targets file {path}: {source}")]
    TargetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse targets file: {0}")]
    TargetsFileParse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
