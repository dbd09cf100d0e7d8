// feedforge-core/src/infrastructure/config/project.rs

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::merchant::FeedConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["feedforge.yaml", "feedforge.yml"];

/// Loads the merchant configuration.
///
/// An explicit path must exist. Without one, `root` is searched for the
/// default file names and built-in defaults are used when none is found.
/// Environment overrides are applied last, then the result is validated.
#[instrument(skip(explicit, root))]
pub fn load_feed_config(
    explicit: Option<&Path>,
    root: &Path,
) -> Result<FeedConfig, InfrastructureError> {
    let path = match explicit {
        Some(p) if !p.exists() => {
            return Err(InfrastructureError::ConfigNotFound(p.display().to_string()));
        }
        Some(p) => Some(p.to_path_buf()),
        None => find_main_config(root),
    };

    let mut config = match path {
        Some(path) => {
            info!(path = ?path, "Loading feed configuration");
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read feed config at {:?}", path))?;
            serde_yaml::from_str::<FeedConfig>(&content)
                .with_context(|| format!("Failed to parse feed config YAML at {:?}", path))?
        }
        None => {
            info!("No feed configuration found, using defaults");
            FeedConfig::default()
        }
    };

    apply_env_overrides(&mut config);

    config
        .check()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
    Ok(config)
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides(config: &mut FeedConfig) {
    // FEEDFORGE_OUTPUT_DIR=/tmp/feeds feedforge transform catalog.csv
    if let Ok(val) = std::env::var("FEEDFORGE_OUTPUT_DIR") {
        info!(old = ?config.output_dir, new = ?val, "Overriding output dir via ENV");
        config.output_dir = val;
    }
    if let Ok(val) = std::env::var("FEEDFORGE_STORE_NAME") {
        info!(old = ?config.seller.store_name, new = ?val, "Overriding store name via ENV");
        config.seller.store_name = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Env overrides are process-wide; the CLI tests cover them.

    #[test]
    fn test_defaults_when_no_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let config = load_feed_config(None, dir.path())?;
        assert_eq!(config.return_windows.preowned_watch, 7);
        Ok(())
    }

    #[test]
    fn test_discovers_yml_candidate() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("feedforge.yml"),
            "shopping:\n  price_tier: premium\n",
        )?;
        let config = load_feed_config(None, dir.path())?;
        assert_eq!(config.shopping.price_tier, "premium");
        assert_eq!(config.shopping.shipping_weight, "1 lb");
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            load_feed_config(Some(&missing), dir.path()),
            Err(InfrastructureError::ConfigNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_values_fail_validation() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "seller:\n  seller_url: nowhere\n")?;

        let err = load_feed_config(Some(&path), dir.path())
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("seller_url"), "got: {err}");
        Ok(())
    }

    #[test]
    fn test_malformed_yaml_is_reported() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("feedforge.yaml"), "seller: [unclosed")?;
        assert!(load_feed_config(None, dir.path()).is_err());
        Ok(())
    }
}
