//! Startup configuration.
//!
//! Settings are layered: the built-in defaults below, then the user's
//! `config.toml`, then `TOWER__*` environment variables. The gate layout is
//! read once when the pools are seeded and never reloaded.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gates::{GateSeed, PoolSeed, SeedError};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "control-tower";

/// Built-in configuration, also written out by [`ensure_default_config`].
///
/// Terminal keys are lowercase so user files override them in place.
pub const DEFAULT_CONFIG: &str = r#"# Gate layout seeded at startup. List both sets when overriding a terminal.

[gates.a]
occupied = [1, 2, 3, 4, 5, 6, 7, 8]
vacant = [9, 10, 11, 12]

[gates.b]
occupied = [1]
vacant = [2, 3, 4, 5, 6, 7, 8]

[gates.c]
occupied = [1, 2, 3, 4]
vacant = [5, 6, 7, 8, 9, 10]

[gates.international]
occupied = [1, 2, 3]
vacant = [4, 5, 6]

[gates.private]
occupied = [1]
vacant = [2, 3]
"#;

/// Application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial gate lists keyed by terminal label.
    #[serde(default)]
    pub gates: BTreeMap<String, PoolSeed>,
}

impl AppConfig {
    /// Load settings using the user's default config file, if it exists.
    pub fn load() -> Result<Self> {
        Self::load_layered(&config_path(), false, env_source())
    }

    /// Load settings layering `path` over the defaults. The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_layered(path.as_ref(), true, env_source())
    }

    fn load_layered(path: &Path, required: bool, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.to_path_buf()).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Only the built-in defaults.
    pub fn builtin() -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .context("failed to parse built-in configuration")?
            .try_deserialize()
            .context("invalid built-in configuration")
    }

    /// Validated gate layout.
    pub fn seed(&self) -> Result<GateSeed, SeedError> {
        GateSeed::from_layout(&self.gates)
    }
}

/// `TOWER__GATES__A__VACANT=9,10` style overrides.
fn env_source() -> Environment {
    Environment::with_prefix("TOWER")
        .separator("__")
        .list_separator(",")
        .try_parsing(true)
}

/// Location of the user's `config.toml`.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join("config.toml")
}

/// Write the default config to the user's config dir unless one exists.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote default configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{gates::GatePoolManager, terminal::Terminal};
    use tempfile::tempdir;

    #[test]
    fn builtin_layout_is_the_standard_seed() -> Result<()> {
        let config = AppConfig::builtin()?;
        assert_eq!(config.seed()?, GateSeed::standard());
        Ok(())
    }

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        env_source().source(Some(vars))
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config =
            AppConfig::load_layered(&dir.path().join("absent.toml"), false, env_with(&[]))?;
        assert_eq!(config.seed()?, GateSeed::standard());
        Ok(())
    }

    #[test]
    fn explicit_config_file_must_exist() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("typo.toml");
        assert!(AppConfig::load_from(&missing).is_err());
        Ok(())
    }

    #[test]
    fn environment_overrides_single_and_multiple_gates() -> Result<()> {
        let dir = tempdir()?;
        let env = env_with(&[
            ("TOWER__GATES__PRIVATE__OCCUPIED", "1,2"),
            ("TOWER__GATES__PRIVATE__VACANT", "3"),
            ("TOWER__GATES__B__VACANT", "2,3,4"),
        ]);
        let config = AppConfig::load_layered(&dir.path().join("absent.toml"), false, env)?;

        let private = &config.gates["private"];
        assert_eq!(private.occupied, vec![1, 2]);
        assert_eq!(private.vacant, vec![3]);

        let manager = GatePoolManager::new(config.seed()?);
        assert_eq!(manager.available_gate(Terminal::Private), Some(3));
        assert_eq!(
            manager
                .pool(Terminal::B)
                .map(|pool| pool.vacant().collect::<Vec<_>>()),
            Some(vec![2, 3, 4])
        );
        Ok(())
    }

    #[test]
    fn user_file_overrides_a_terminal() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[gates.private]\noccupied = [1, 2, 3]\nvacant = [4]\n",
        )?;

        let config = AppConfig::load_from(&path)?;
        let manager = GatePoolManager::new(config.seed()?);
        assert_eq!(manager.available_gate(Terminal::Private), Some(4));
        assert_eq!(manager.available_gate(Terminal::A), Some(9));
        Ok(())
    }

    #[test]
    fn overlapping_override_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gates.b]\noccupied = [1, 2]\n")?;

        let config = AppConfig::load_from(&path)?;
        assert!(matches!(
            config.seed(),
            Err(SeedError::OverlappingGate {
                terminal: Terminal::B,
                gate: 2
            })
        ));
        Ok(())
    }

    #[test]
    fn default_file_is_written_once() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, DEFAULT_CONFIG);

        fs::write(&path, "[gates]\n")?;
        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "[gates]\n");
        Ok(())
    }
}
