//! Application configuration
//!
//! Loaded from ~/.stripboard/config.toml, merged over built-in defaults.
//! A commented example file is written on first run.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use toml_edit::{DocumentMut, Item, Table};

use crate::data::Currency;
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Project name stamped into exported bundles
    pub project_name: String,
    /// Currency used before a preference has been stored
    pub default_currency: Currency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: "My Film Project".to_string(),
            default_currency: Currency::Usd,
        }
    }
}

/// TOML representation of the [project] section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlProjectConfig {
    pub name: Option<String>,
}

/// TOML representation of the [budget] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlBudgetConfig {
    pub default_currency: Option<String>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub project: Option<TomlProjectConfig>,
    pub budget: Option<TomlBudgetConfig>,
}

impl Config {
    /// Load configuration from file, merging with defaults
    pub fn load() -> Self {
        let mut config = Config::default();

        let config_file = config_path();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        if config_file.exists() {
            if let Ok(contents) = fs::read_to_string(&config_file) {
                if let Ok(toml_config) = toml::from_str::<TomlConfig>(&contents) {
                    if let Some(project) = toml_config.project {
                        if let Some(name) = project.name {
                            config.project_name = name;
                        }
                    }
                    if let Some(budget) = toml_config.budget {
                        if let Some(currency) =
                            budget.default_currency.as_deref().and_then(Currency::from_code)
                        {
                            config.default_currency = currency;
                        }
                    }
                }
            }
        }

        config
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &PathBuf) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!("Failed to create config directory: {}", e);
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            eprintln!("Failed to write default config: {}", e);
        }
    }
}

/// Save the project name to the config file.
///
/// This updates the [project] section while preserving all other content.
pub fn save_project_name(name: &str) -> std::io::Result<()> {
    let config_file = config_path();

    // Read existing config or start with empty document
    let contents = if config_file.exists() {
        fs::read_to_string(&config_file)?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = contents
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    if !doc.contains_key("project") {
        doc["project"] = Item::Table(Table::new());
    }
    doc["project"]["name"] = toml_edit::value(name);

    if let Some(parent) = config_file.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&config_file, doc.to_string())?;

    Ok(())
}
