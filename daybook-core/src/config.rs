//! Global daybook configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, DaybookResult};

static DEFAULT_EVENTS_FILE: &str = "~/daybook/events.txt";

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn is_default_events_file(p: &PathBuf) -> bool {
    *p == default_events_file()
}

/// Configuration at ~/.config/daybook/config.toml
///
/// Every key can be overridden with a `DAYBOOK_` environment variable,
/// e.g. `DAYBOOK_EVENTS_FILE`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DaybookConfig {
    #[serde(default = "default_events_file", skip_serializing_if = "is_default_events_file")]
    pub events_file: PathBuf,
}

impl Default for DaybookConfig {
    fn default() -> Self {
        DaybookConfig {
            events_file: default_events_file(),
        }
    }
}

impl DaybookConfig {
    pub fn config_path() -> DaybookResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaybookError::Config("Could not determine config directory".into()))?
            .join("daybook");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, creating a commented default if there is none.
    pub fn load() -> DaybookResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Layer the file at `path` (if present) and `DAYBOOK_*` variables over the defaults.
    pub fn load_from(path: &Path) -> DaybookResult<Self> {
        Self::load_layered(path, Environment::with_prefix("DAYBOOK"))
    }

    fn load_layered(path: &Path, environment: Environment) -> DaybookResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| DaybookError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaybookError::Config(e.to_string()))
    }

    /// The events file with `~` expanded.
    pub fn events_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.events_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Persist to ~/.config/daybook/config.toml
    pub fn save(&self) -> DaybookResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Write the settings that differ from the defaults as TOML to `path`.
    pub fn save_to(&self, path: &Path) -> DaybookResult<()> {
        let settings =
            toml::to_string_pretty(self).map_err(|e| DaybookError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, format!("# daybook configuration\n\n{settings}"))
            .map_err(|e| DaybookError::Config(format!("Could not write {}: {e}", path.display())))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaybookResult<()> {
        let contents = format!(
            "\
# daybook configuration

# Where your events are stored:
# events_file = \"{}\"
",
            DEFAULT_EVENTS_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaybookError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaybookError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daybook").join("config.toml");
        DaybookConfig::create_default_config(&path).unwrap();

        let config = DaybookConfig::load_from(&path).unwrap();
        assert_eq!(config.events_file, default_events_file());
    }

    #[test]
    fn file_overrides_events_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "events_file = \"/tmp/work-events.txt\"\n").unwrap();

        let config = DaybookConfig::load_from(&path).unwrap();
        assert_eq!(config.events_path(), PathBuf::from("/tmp/work-events.txt"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaybookConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.events_file, default_events_file());
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "events_file = \"/tmp/from-file.txt\"\n").unwrap();

        let mut vars = config::Map::new();
        vars.insert("DAYBOOK_EVENTS_FILE".to_string(), "/tmp/from-env.txt".to_string());
        let environment = Environment::with_prefix("DAYBOOK").source(Some(vars));

        let config = DaybookConfig::load_layered(&path, environment).unwrap();
        assert_eq!(config.events_path(), PathBuf::from("/tmp/from-env.txt"));
    }

    #[test]
    fn save_to_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = DaybookConfig {
            events_file: PathBuf::from("/srv/shared/events.txt"),
        };

        config.save_to(&path).unwrap();
        assert_eq!(DaybookConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn default_config_serializes_empty() {
        let content = toml::to_string_pretty(&DaybookConfig::default()).unwrap();
        assert_eq!(content.trim(), "");
    }
}
