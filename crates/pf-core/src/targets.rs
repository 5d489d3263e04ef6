use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One seed entry from `config/targets.yaml`: the companies the enrichment
/// pipeline should track. The domain is the sole identity of a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSeed {
    pub domain: String,
    pub name: String,
    pub vertical: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TargetsFile {
    pub targets: Vec<TargetSeed>,
}

/// Canonicalize a domain for use as an upsert key: lowercase, scheme and
/// `www.` prefix stripped, no trailing slash or path.
#[must_use]
pub fn normalize_domain(raw: &str) -> String {
    let mut s = raw.trim().to_lowercase();
    for prefix in ["https://", "http://"] {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.to_string();
            break;
        }
    }
    if let Some(rest) = s.strip_prefix("www.") {
        s = rest.to_string();
    }
    s.split('/').next().unwrap_or_default().to_string()
}

/// Load and validate the seed-target configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_targets(path: &Path) -> Result<TargetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TargetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let targets_file: TargetsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::TargetsFileParse)?;

    validate_targets(&targets_file)?;

    Ok(targets_file)
}

fn validate_targets(targets_file: &TargetsFile) -> Result<(), ConfigError> {
    let mut seen_domains = HashSet::new();

    for target in &targets_file.targets {
        if target.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "target name must be non-empty".to_string(),
            ));
        }

        let domain = normalize_domain(&target.domain);
        if domain.is_empty() {
            return Err(ConfigError::Validation(format!(
                "target '{}' has an empty domain",
                target.name
            )));
        }

        if !seen_domains.insert(domain.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate target domain: '{domain}'"
            )));
        }
    }

    Ok(())
}
