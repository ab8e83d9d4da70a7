//! User configuration: platform override, extra package managers and the
//! application catalog used by `toolbox check`.
//!
//! Configuration is read from a YAML file and layered with `TOOLBOX_*`
//! environment variables (for example `TOOLBOX_PLATFORM=linux`).

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use validator::Validate;

use crate::data::{constants, ManagerCatalog, PackageManagerSpec, Platform};
use crate::errors::{Result, ToolboxError};
use crate::traits::Exportable;

/// An installable application and the install command configured for each platform.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Validate)]
pub struct AppEntry {
    #[validate(length(min = 1, message = "application name must not be empty"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Platform id (`darwin`, `windows`, `linux`) to install command.
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

impl AppEntry {
    pub fn new(name: &str) -> Self {
        AppEntry {
            name: name.to_string(),
            aliases: Vec::new(),
            description: None,
            commands: BTreeMap::new(),
        }
    }

    pub fn alias_refs(&self) -> Vec<&str> {
        self.aliases.iter().map(String::as_str).collect()
    }

    pub fn command_for(&self, platform: &Platform) -> Option<&str> {
        let key = platform.to_string();
        self.commands
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(&key))
            .map(|(_, command)| command.as_str())
    }
}

/// Main configuration structure for toolbox
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Builder, Validate)]
#[builder(setter(into), default)]
pub struct ToolboxConfig {
    /// Overrides the detected platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Managers added to, or replacing entries of, the builtin catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub managers: Vec<PackageManagerSpec>,
    #[serde(default)]
    #[validate(nested)]
    pub apps: Vec<AppEntry>,

    #[serde(skip)]
    pub log_level: u8,
}

impl ToolboxConfig {
    /// The configuration shipped with toolbox.
    pub fn builtin() -> Result<Self> {
        ToolboxConfig::load_from_str(constants::DEFAULT_CONFIG)
    }

    /// Parses a YAML configuration without consulting the environment.
    pub fn load_from_str(yaml_str: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(yaml_str, FileFormat::Yaml))
            .build()?;
        ToolboxConfig::from_settings(settings)
    }

    /// Loads `file`, falling back to the builtin configuration when it does not
    /// exist, then applies `TOOLBOX_*` environment overrides.
    pub fn load_from(file: &Path) -> Result<Self> {
        debug!("Loading config from: {}", file.display());

        let builder = Config::builder();
        let builder = if file.exists() {
            builder.add_source(File::from(file).format(FileFormat::Yaml))
        } else {
            warn!("Can't find config file: {}", file.display());
            warn!("Loading default config");
            builder.add_source(File::from_str(constants::DEFAULT_CONFIG, FileFormat::Yaml))
        };

        let settings = builder
            .add_source(Environment::with_prefix(constants::ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config file: {}", file.display()))?;

        ToolboxConfig::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self> {
        let config: ToolboxConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;
        config.validate_basic()?;
        trace!("{:?}", config);
        Ok(config)
    }

    /// Checks app entries: non-empty names, no duplicate names, known platforms.
    pub fn validate_basic(&self) -> Result<()> {
        self.validate()
            .map_err(|e| ToolboxError::InvalidApp(e.to_string()))?;

        let mut seen = HashSet::new();
        for app in &self.apps {
            if !seen.insert(app.name.to_lowercase()) {
                return Err(ToolboxError::invalid_app(&app.name, "duplicate application name"));
            }
            for platform in app.commands.keys() {
                if !Platform::parse(platform).is_known() {
                    warn!("Application '{}' has a command for unknown platform '{}'", app.name, platform);
                }
            }
        }
        Ok(())
    }

    /// The platform to validate for: `cli_override`, then the configured
    /// platform, then the platform toolbox runs on.
    pub fn effective_platform(&self, cli_override: Option<&str>) -> Platform {
        cli_override
            .or(self.platform.as_deref())
            .map(Platform::parse)
            .unwrap_or_else(Platform::current)
    }

    /// The builtin catalog extended with the configured managers.
    pub fn catalog(&self) -> Result<ManagerCatalog> {
        let mut catalog = ManagerCatalog::builtin().clone();
        if !self.managers.is_empty() {
            debug!("Extending catalog with {} configured managers", self.managers.len());
            catalog.extend(self.managers.iter().cloned())?;
        }
        Ok(catalog)
    }

    pub fn find_app(&self, name: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| {
            app.name.eq_ignore_ascii_case(name)
                || app.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }
}

impl Exportable for ToolboxConfig {}
