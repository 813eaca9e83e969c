use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::export::EXPORT_SCALE;

const DEFAULT_STORAGE_DIR: &str = ".jobfolio";
const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Resume builder configuration loaded from environment variables.
/// Every field has a default, so a bare environment is valid.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Directory holding the single persisted resume document.
    pub storage_dir: PathBuf,
    /// Maximum number of snapshots kept in the undo history.
    pub history_limit: usize,
    /// Upscaling factor applied when rasterizing for PDF export.
    pub export_scale: f32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            history_limit: DEFAULT_HISTORY_LIMIT,
            export_scale: EXPORT_SCALE,
        }
    }
}

impl BuilderConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();

        let storage_dir = std::env::var("RESUME_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let history_limit = match std::env::var("RESUME_HISTORY_LIMIT") {
            Ok(raw) => raw
                .parse::<usize>()
                .context("RESUME_HISTORY_LIMIT must be a positive integer")?
                .max(1),
            Err(_) => defaults.history_limit,
        };

        let export_scale = match std::env::var("RESUME_EXPORT_SCALE") {
            Ok(raw) => {
                let scale = raw
                    .parse::<f32>()
                    .context("RESUME_EXPORT_SCALE must be a number")?;
                anyhow::ensure!(
                    scale > 0.0 && scale <= 4.0,
                    "RESUME_EXPORT_SCALE must be in (0, 4], got {scale}"
                );
                scale
            }
            Err(_) => defaults.export_scale,
        };

        Ok(Self {
            storage_dir,
            history_limit,
            export_scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_sanity() {
        let config = BuilderConfig::default();
        assert_eq!(config.storage_dir, PathBuf::from(".jobfolio"));
        assert_eq!(config.history_limit, 100);
        assert!((config.export_scale - 2.0).abs() < f32::EPSILON);
    }
}
