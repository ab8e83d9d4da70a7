//! Package manager catalog and platform model.
//!
//! The catalog is plain data: each [`PackageManagerSpec`] describes how a
//! package manager is invoked and which install phrases and options it
//! understands. The validator iterates the catalog generically, so teaching
//! toolbox a new manager only takes a new table entry.

pub mod constants;

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use tracing::{debug, trace};
use validator::Validate;

use crate::errors::{Result, ToolboxError};
use crate::traits::Exportable;

/// Platform identifiers understood by the manager catalog.
#[derive(Serialize_enum_str, Deserialize_enum_str, Debug, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Darwin,
    Windows,
    Linux,
    #[serde(other)]
    Unknown(String),
}

impl Platform {
    /// Parses a platform identifier, ignoring case. `macos` is accepted for darwin.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "darwin" | "macos" => Platform::Darwin,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            other => Platform::Unknown(other.to_string()),
        }
    }

    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if std::env::consts::FAMILY == "windows" {
            return Platform::Windows;
        }
        match std::env::consts::OS {
            "macos" | "ios" => Platform::Darwin,
            "linux" => Platform::Linux,
            other => Platform::Unknown(other.to_string()),
        }
    }

    /// Unknown platforms, including the empty identifier, disable platform filtering.
    pub fn is_known(&self) -> bool {
        !matches!(self, Platform::Unknown(_))
    }

    /// Managers to recommend when a command names none.
    pub fn recommended_managers(&self) -> &'static str {
        match self {
            Platform::Darwin => "brew",
            Platform::Windows => "winget",
            _ => "apt or snap",
        }
    }
}

/// An alternate install action selected when one of its marker tokens is present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
pub struct InstallVariant {
    #[validate(length(min = 1, message = "a variant needs at least one marker"))]
    pub markers: Vec<String>,
    #[validate(length(min = 1, message = "a variant needs an install action"))]
    pub action: String,
}

/// Grammar of a single package manager.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
pub struct PackageManagerSpec {
    #[validate(length(min = 1, message = "manager id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "at least one alias is required"))]
    pub aliases: Vec<String>,
    #[validate(length(min = 1, message = "at least one install command is required"))]
    pub install_commands: Vec<String>,
    #[validate(length(min = 1, message = "at least one install shortcut is required"))]
    pub install_shortcuts: Vec<String>,
    #[serde(default)]
    pub known_options: BTreeMap<String, String>,
    #[validate(length(min = 1, message = "at least one platform is required"))]
    pub platforms: Vec<Platform>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[validate(nested)]
    pub variants: Vec<InstallVariant>,
}

impl PackageManagerSpec {
    /// Whether this manager may be used on `platform`. Unknown platforms accept every manager.
    pub fn supports(&self, platform: &Platform) -> bool {
        !platform.is_known() || self.platforms.contains(platform)
    }

    /// Whether `token` invokes this manager.
    pub fn is_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(token))
    }

    /// The install phrase suggested to users, e.g. `install` or `-S`.
    pub fn primary_install_command(&self) -> &str {
        self.install_commands
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn primary_shortcut(&self) -> &str {
        self.install_shortcuts
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether the tokens starting at `start` spell an install phrase or shortcut.
    pub fn has_install_action_at(&self, tokens: &[&str], start: usize) -> bool {
        self.install_action_len_at(tokens, start).is_some()
    }

    /// Number of tokens taken by the longest install phrase or shortcut at `start`.
    pub fn install_action_len_at(&self, tokens: &[&str], start: usize) -> Option<usize> {
        let rest = tokens.get(start..).unwrap_or_default();

        let full_phrase = self
            .install_commands
            .iter()
            .map(|phrase| phrase.split_whitespace().collect::<Vec<_>>())
            .filter(|words| {
                words.len() <= rest.len()
                    && words
                        .iter()
                        .zip(rest)
                        .all(|(word, token)| word.eq_ignore_ascii_case(token))
            })
            .map(|words| words.len())
            .max();

        let shortcut = rest
            .first()
            .is_some_and(|next| {
                self.install_shortcuts
                    .iter()
                    .any(|shortcut| shortcut.eq_ignore_ascii_case(next))
            })
            .then_some(1);

        trace!(manager = %self.id, ?full_phrase, ?shortcut, "install action check");
        full_phrase.or(shortcut)
    }

    /// Every token that belongs to the manager's own install grammar, lowercased.
    pub fn grammar_tokens(&self) -> HashSet<String> {
        self.install_commands
            .iter()
            .flat_map(|phrase| phrase.split_whitespace())
            .chain(self.install_shortcuts.iter().map(String::as_str))
            .chain(std::iter::once(self.id.as_str()))
            .map(str::to_lowercase)
            .collect()
    }

    /// The install action used for the minimal command, honoring variant markers.
    pub fn action_for(&self, tokens: &[&str]) -> &str {
        self.variants
            .iter()
            .find(|variant| {
                variant
                    .markers
                    .iter()
                    .any(|marker| tokens.iter().any(|t| marker.eq_ignore_ascii_case(t)))
            })
            .map(|variant| variant.action.as_str())
            .unwrap_or_else(|| self.primary_install_command())
    }

    /// The minimal command installing `app` with this manager.
    pub fn minimal_command(&self, action: &str, app: &str) -> String {
        format!("{} {} {}", self.id, action, app)
    }

    /// Looks up an option flag, accepting the `--flag=value` form.
    pub fn describe_option(&self, option: &str) -> Option<&str> {
        self.known_options
            .iter()
            .find(|(flag, _)| {
                option.eq_ignore_ascii_case(flag)
                    || option
                        .split_once('=')
                        .is_some_and(|(key, _)| key.eq_ignore_ascii_case(flag))
            })
            .map(|(_, description)| description.as_str())
    }
}

/// Ordered, read-only table of package managers.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ManagerCatalog {
    managers: Vec<PackageManagerSpec>,
}

/// The catalog shipped with toolbox, parsed on first use.
pub static BUILTIN_CATALOG: LazyLock<ManagerCatalog> = LazyLock::new(|| {
    ManagerCatalog::load_from_str(constants::BUILTIN_MANAGERS)
        .expect("builtin manager catalog must be valid")
});

impl ManagerCatalog {
    /// Builds a catalog from specs, checking every invariant.
    pub fn new(managers: Vec<PackageManagerSpec>) -> Result<Self> {
        let mut catalog = ManagerCatalog::default();
        catalog.extend(managers)?;
        Ok(catalog)
    }

    pub fn builtin() -> &'static ManagerCatalog {
        &BUILTIN_CATALOG
    }

    /// Parses a YAML list of manager specs.
    pub fn load_from_str(yaml_str: &str) -> Result<Self> {
        let managers: Vec<PackageManagerSpec> = serde_yaml::from_str(yaml_str)
            .map_err(|e| ToolboxError::Catalog(format!("failed to parse catalog: {e}")))?;
        debug!("Parsed {} package managers", managers.len());
        ManagerCatalog::new(managers)
    }

    /// Adds managers to the catalog. A spec whose id is already present replaces
    /// the existing entry in place; new ids are appended.
    pub fn extend<I>(&mut self, managers: I) -> Result<()>
    where
        I: IntoIterator<Item = PackageManagerSpec>,
    {
        for spec in managers {
            spec.validate()
                .map_err(|e| ToolboxError::catalog(&spec.id, e.to_string()))?;
            if spec.install_commands.iter().any(|c| c.trim().is_empty()) {
                return Err(ToolboxError::catalog(&spec.id, "install commands must not be blank"));
            }

            match self.managers.iter_mut().find(|m| m.id == spec.id) {
                Some(existing) => {
                    debug!("Replacing package manager {}", spec.id);
                    *existing = spec;
                }
                None => {
                    trace!("Adding package manager {}", spec.id);
                    self.managers.push(spec);
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PackageManagerSpec> {
        self.managers.iter().find(|m| m.id.eq_ignore_ascii_case(id))
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn require(&self, id: &str) -> Result<&PackageManagerSpec> {
        self.get(id)
            .ok_or_else(|| ToolboxError::UnknownManager(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageManagerSpec> {
        self.managers.iter()
    }

    /// Managers usable on `platform`, in catalog order.
    pub fn managers_for<'a>(
        &'a self,
        platform: &'a Platform,
    ) -> impl Iterator<Item = &'a PackageManagerSpec> + 'a {
        self.managers.iter().filter(move |m| m.supports(platform))
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

impl Exportable for ManagerCatalog {}
