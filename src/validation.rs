//! Install-command validation.
//!
//! [`CommandValidator::validate`] classifies a free-form install command
//! against the package manager catalog. It runs an ordered series of gates
//! and returns the verdict of the first gate that fires:
//!
//! 1. empty command
//! 2. normalization (lowercase, single spaces, tokens)
//! 3. dangerous whole-command patterns
//! 4. package manager detection, filtered by platform
//! 5. install action following the manager
//! 6. exact application name or alias
//! 7. extraction of options beyond the minimal command
//! 8. classification of those options
//!
//! Validation never fails: error verdicts are ordinary [`ValidationDetails`]
//! values describing the command, not failures of the validator.
//!
//! ```rust
//! use toolbox::validation::{CommandValidator, ValidationLevel};
//!
//! let validator = CommandValidator::builtin();
//! let verdict = validator.validate("brew install git --verbose", "git", &[], "darwin");
//! assert_eq!(verdict.level, ValidationLevel::SuccessWithOptions);
//! ```

pub mod options;


use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::data::{ManagerCatalog, PackageManagerSpec, Platform};
use crate::traits::Exportable;
use options::OptionReport;

/// Outcome classes of a validation, ordered for display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationLevel {
    Success,
    SuccessWithOptions,
    WarningSyntax,
    WarningOptions,
    ErrorSyntax,
    ErrorName,
    ErrorManager,
    ErrorSecurity,
    /// A validation is still outstanding. Never produced by the validator itself.
    Loading,
}

/// Coarse grouping of levels, used where a tri-state is enough.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValidationBand {
    Success,
    Warning,
    Error,
    Loading,
}

impl ValidationLevel {
    pub const ALL: [ValidationLevel; 9] = [
        ValidationLevel::Success,
        ValidationLevel::SuccessWithOptions,
        ValidationLevel::WarningSyntax,
        ValidationLevel::WarningOptions,
        ValidationLevel::ErrorSyntax,
        ValidationLevel::ErrorName,
        ValidationLevel::ErrorManager,
        ValidationLevel::ErrorSecurity,
        ValidationLevel::Loading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Success => "success",
            ValidationLevel::SuccessWithOptions => "success-with-options",
            ValidationLevel::WarningSyntax => "warning-syntax",
            ValidationLevel::WarningOptions => "warning-options",
            ValidationLevel::ErrorSyntax => "error-syntax",
            ValidationLevel::ErrorName => "error-name",
            ValidationLevel::ErrorManager => "error-manager",
            ValidationLevel::ErrorSecurity => "error-security",
            ValidationLevel::Loading => "loading",
        }
    }

    pub fn band(&self) -> ValidationBand {
        match self {
            ValidationLevel::Success | ValidationLevel::SuccessWithOptions => ValidationBand::Success,
            ValidationLevel::WarningSyntax | ValidationLevel::WarningOptions => ValidationBand::Warning,
            ValidationLevel::ErrorSyntax
            | ValidationLevel::ErrorName
            | ValidationLevel::ErrorManager
            | ValidationLevel::ErrorSecurity => ValidationBand::Error,
            ValidationLevel::Loading => ValidationBand::Loading,
        }
    }

    pub fn is_success(&self) -> bool {
        self.band() == ValidationBand::Success
    }

    pub fn is_error(&self) -> bool {
        self.band() == ValidationBand::Error
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationBand {
    /// The simplified status string: `success`, `warning`, `error` or `loading`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationBand::Success => "success",
            ValidationBand::Warning => "warning",
            ValidationBand::Error => "error",
            ValidationBand::Loading => "loading",
        }
    }
}

impl fmt::Display for ValidationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verdict for one command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    pub level: ValidationLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub explanation: String,
}

impl ValidationDetails {
    pub fn new(
        level: ValidationLevel,
        message: impl Into<String>,
        suggestion: Option<String>,
        explanation: impl Into<String>,
    ) -> Self {
        ValidationDetails {
            level,
            message: message.into(),
            suggestion,
            explanation: explanation.into(),
        }
    }

    /// Placeholder shown while a validation is outstanding.
    pub fn loading() -> Self {
        ValidationDetails::new(
            ValidationLevel::Loading,
            "validating...",
            None,
            "the command has not been validated yet",
        )
    }

    pub fn band(&self) -> ValidationBand {
        self.level.band()
    }
}

impl Exportable for ValidationDetails {}

/// Lowercases the command and collapses every whitespace run into one space.
pub fn normalize(command: &str) -> String {
    command
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classifies install commands against a manager catalog.
///
/// The validator holds nothing but a shared reference to an immutable
/// catalog, so one instance can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct CommandValidator<'c> {
    catalog: &'c ManagerCatalog,
}

impl Default for CommandValidator<'static> {
    fn default() -> Self {
        CommandValidator::builtin()
    }
}

impl<'c> CommandValidator<'c> {
    pub fn new(catalog: &'c ManagerCatalog) -> Self {
        CommandValidator { catalog }
    }

    /// A validator over the catalog shipped with toolbox.
    pub fn builtin() -> CommandValidator<'static> {
        CommandValidator::new(ManagerCatalog::builtin())
    }

    pub fn catalog(&self) -> &'c ManagerCatalog {
        self.catalog
    }

    /// Validates `command` as an install of `app_name` (or one of `app_aliases`)
    /// on `platform`. An empty or unrecognized platform disables platform filtering.
    pub fn validate(
        &self,
        command: &str,
        app_name: &str,
        app_aliases: &[&str],
        platform: &str,
    ) -> ValidationDetails {
        self.validate_on(command, app_name, app_aliases, &Platform::parse(platform))
    }

    pub fn validate_on(
        &self,
        command: &str,
        app_name: &str,
        app_aliases: &[&str],
        platform: &Platform,
    ) -> ValidationDetails {
        if command.trim().is_empty() {
            debug!("empty command");
            return ValidationDetails::new(
                ValidationLevel::ErrorSyntax,
                "command is empty",
                Some("enter a valid install command".to_string()),
                "an install command needs at least a package manager, an install action and the application name",
            );
        }

        let normalized = normalize(command);
        let tokens: Vec<&str> = normalized.split(' ').collect();
        trace!(?tokens, "normalized command");

        if let Some(pattern) = options::find_suspicious_pattern(&normalized) {
            debug!(pattern, "suspicious pattern in command");
            return ValidationDetails::new(
                ValidationLevel::ErrorSecurity,
                "suspicious pattern detected in the command",
                Some("avoid shell metacharacters and destructive system commands".to_string()),
                format!(
                    "the command contains a {pattern}, which could compromise the security of your system"
                ),
            );
        }

        let Some((manager, position)) = self.detect_manager(&tokens, platform) else {
            debug!(%platform, "no package manager detected");
            return ValidationDetails::new(
                ValidationLevel::ErrorManager,
                "no recognized package manager",
                Some(format!(
                    "use a package manager such as {}",
                    platform.recommended_managers()
                )),
                "the command must start with a package manager supported by your operating system",
            );
        };
        debug!(manager = %manager.id, position, "package manager detected");

        let Some(action_len) = manager.install_action_len_at(&tokens, position + 1) else {
            return ValidationDetails::new(
                ValidationLevel::ErrorSyntax,
                "missing or invalid install action",
                Some(format!(
                    "use {} or {} after {}",
                    manager.primary_install_command(),
                    manager.primary_shortcut(),
                    manager.id
                )),
                format!(
                    "valid install actions for {} are: {}, or the shortcuts {}",
                    manager.id,
                    manager.install_commands.join(", "),
                    manager.install_shortcuts.join(", ")
                ),
            );
        };

        let app = app_name.to_lowercase();
        let aliases: Vec<String> = app_aliases.iter().map(|a| a.to_lowercase()).collect();
        let names: HashSet<&str> = std::iter::once(app.as_str())
            .chain(aliases.iter().map(String::as_str))
            .collect();

        // The manager token and the install action never count as the name.
        let grammar_span = position..=position + action_len;
        let name_found = tokens
            .iter()
            .enumerate()
            .any(|(i, token)| !grammar_span.contains(&i) && names.contains(token));
        if !name_found {
            debug!(app = %app, "application name not found");
            let suggestion = if aliases.is_empty() {
                format!("use \"{app}\"")
            } else {
                format!("use \"{app}\" or an official alias: {}", aliases.join(", "))
            };
            return ValidationDetails::new(
                ValidationLevel::ErrorName,
                "the exact application name is required",
                Some(suggestion),
                "variations and abbreviations of the application name are not accepted, only its official aliases",
            );
        }

        let extras = self.extra_options(&tokens, position, manager, &app, &names);
        if extras.is_empty() {
            return ValidationDetails::new(
                ValidationLevel::Success,
                "command is valid",
                None,
                "the command uses a package manager suited to your system, the correct install action and the exact application name",
            );
        }
        trace!(?extras, "extra options");

        let report = OptionReport::analyze(&extras, manager);

        if !report.suspicious.is_empty() {
            return ValidationDetails::new(
                ValidationLevel::ErrorSecurity,
                "potentially dangerous options detected",
                Some(format!(
                    "remove the suspicious options: {}",
                    report.suspicious.join(", ")
                )),
                "these options could compromise the security of your system or cause unwanted behavior",
            );
        }

        if !report.unknown.is_empty() {
            return ValidationDetails::new(
                ValidationLevel::WarningOptions,
                "non-standard options detected",
                Some(format!(
                    "check the {} documentation to confirm these options are appropriate: {}",
                    manager.id,
                    report.unknown.join(", ")
                )),
                "these options are not recognized as standard for this package manager, but do not look dangerous",
            );
        }

        let described: Vec<String> = report
            .known
            .iter()
            .map(|(option, description)| format!("{option} ({description})"))
            .collect();
        ValidationDetails::new(
            ValidationLevel::SuccessWithOptions,
            "command is valid with recognized options",
            None,
            format!("options used: {}", described.join(", ")),
        )
    }

    /// First manager, in catalog order, with an alias among the tokens, and the
    /// index of the first token invoking it.
    fn detect_manager(
        &self,
        tokens: &[&str],
        platform: &Platform,
    ) -> Option<(&'c PackageManagerSpec, usize)> {
        let catalog: &'c ManagerCatalog = self.catalog;
        catalog
            .iter()
            .filter(|manager| manager.supports(platform))
            .find_map(|manager| {
                tokens
                    .iter()
                    .position(|token| manager.is_alias(token))
                    .map(|position| (manager, position))
            })
    }

    /// Tokens beyond the minimal `<manager> <action> <app>` command, in command order.
    fn extra_options<'t>(
        &self,
        tokens: &[&'t str],
        position: usize,
        manager: &PackageManagerSpec,
        app: &str,
        names: &HashSet<&str>,
    ) -> Vec<&'t str> {
        let base = manager
            .minimal_command(manager.action_for(tokens), app)
            .to_lowercase();

        let mut expected = manager.grammar_tokens();
        expected.extend(base.split_whitespace().map(str::to_string));
        expected.insert(tokens[position].to_string());

        tokens
            .iter()
            .copied()
            .filter(|token| !expected.contains(*token) && !names.contains(token))
            .collect()
    }

    /// The minimal install command of `app_name` for every manager usable on `platform`.
    pub fn suggest(&self, app_name: &str, platform: &Platform) -> Vec<String> {
        let app = app_name.to_lowercase();
        self.catalog
            .managers_for(platform)
            .map(|manager| manager.minimal_command(manager.primary_install_command(), &app))
            .collect()
    }
}

/// Validates against the builtin catalog.
pub fn validate(
    command: &str,
    app_name: &str,
    app_aliases: &[&str],
    platform: &str,
) -> ValidationDetails {
    CommandValidator::builtin().validate(command, app_name, app_aliases, platform)
}
