//! Command implementations for the toolbox CLI.
//!
//! - [`validate_command`]: validate one install command
//! - [`managers_command`]: list the package manager catalog
//! - [`suggest_command`]: print minimal install commands for an application
//! - [`check_command`]: validate every configured application
//!
//! The commands print through [`crate::output`]; the pieces they print
//! ([`managers_table`], [`check_apps`]) are plain values so they can be
//! tested without capturing stdout.

use std::collections::HashMap;

use tabular::{Row, Table};
use tracing::{debug, info};

use crate::configuration::{AppEntry, ToolboxConfig};
use crate::data::{ManagerCatalog, Platform};
use crate::errors::Result;
use crate::output;
use crate::traits::Exportable;
use crate::validation::{CommandValidator, ValidationBand, ValidationDetails, ValidationLevel};


/// Validate a single command and print the verdict.
///
/// Returns the verdict's level so the caller can pick an exit code.
pub fn validate_command(
    validator: &CommandValidator<'_>,
    command: &str,
    app: &str,
    aliases: &[String],
    platform: &Platform,
    json: bool,
) -> Result<ValidationLevel> {
    let aliases: Vec<&str> = aliases.iter().map(String::as_str).collect();
    let details = validator.validate_on(command, app, &aliases, platform);
    debug!(level = %details.level, "validated command for {}", app);

    if json {
        println!("{}", details.export_json()?);
    } else {
        output::print_details(&details);
    }
    Ok(details.level)
}

/// Table of managers usable on `platform` (all managers when `None`).
pub fn managers_table(catalog: &ManagerCatalog, platform: Option<&Platform>) -> Table {
    let mut table = Table::new("{:<}  {:<}  {:<}  {:<}  {:<}");
    table.add_row(
        Row::new()
            .with_cell("MANAGER")
            .with_cell("ALIASES")
            .with_cell("PLATFORMS")
            .with_cell("INSTALL")
            .with_cell("ON PATH"),
    );

    for manager in catalog.iter() {
        if platform.is_some_and(|p| !manager.supports(p)) {
            continue;
        }
        let platforms: Vec<String> = manager.platforms.iter().map(|p| p.to_string()).collect();
        let on_path = if which::which(&manager.id).is_ok() { "yes" } else { "no" };
        table.add_row(
            Row::new()
                .with_cell(&manager.id)
                .with_cell(manager.aliases.join(", "))
                .with_cell(platforms.join(", "))
                .with_cell(format!(
                    "{} | {}",
                    manager.primary_install_command(),
                    manager.install_shortcuts.join(", ")
                ))
                .with_cell(on_path),
        );
    }
    table
}

/// List the catalog, or export it as YAML.
pub fn managers_command(
    catalog: &ManagerCatalog,
    platform: Option<&Platform>,
    export: bool,
) -> Result<()> {
    if export {
        print!("{}", catalog.export()?);
    } else {
        println!("{}", managers_table(catalog, platform));
    }
    Ok(())
}

/// Print the minimal install command of `app` for every manager on `platform`.
pub fn suggest_command(
    validator: &CommandValidator<'_>,
    app: &str,
    platform: &Platform,
) -> Result<Vec<String>> {
    let suggestions = validator.suggest(app, platform);
    if suggestions.is_empty() {
        output::warning(&format!("no package manager is known for platform {platform}"));
    }
    for command in &suggestions {
        println!("{command}");
    }
    Ok(suggestions)
}

/// Verdicts per application, in configuration order.
///
/// Entries start as [`ValidationLevel::Loading`] and are replaced once the
/// application's command has been validated.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    entries: Vec<(String, ValidationDetails)>,
}

impl StatusBoard {
    pub fn new() -> Self {
        StatusBoard::default()
    }

    /// Marks `app` as being validated.
    pub fn start(&mut self, app: &str) {
        self.set(app, ValidationDetails::loading());
    }

    pub fn record(&mut self, app: &str, details: ValidationDetails) {
        self.set(app, details);
    }

    fn set(&mut self, app: &str, details: ValidationDetails) {
        match self.entries.iter_mut().find(|(name, _)| name == app) {
            Some((_, existing)) => *existing = details,
            None => self.entries.push((app.to_string(), details)),
        }
    }

    pub fn level(&self, app: &str) -> Option<ValidationLevel> {
        self.entries
            .iter()
            .find(|(name, _)| name == app)
            .map(|(_, details)| details.level)
    }

    pub fn entries(&self) -> &[(String, ValidationDetails)] {
        &self.entries
    }

    /// Number of applications per band.
    pub fn summary(&self) -> HashMap<ValidationBand, usize> {
        let mut counts = HashMap::new();
        for (_, details) in &self.entries {
            *counts.entry(details.band()).or_insert(0) += 1;
        }
        counts
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|(_, details)| details.level.is_error())
    }
}

/// Validate the configured command of every application for `platform`.
///
/// Applications with no command for the platform are left off the board.
pub fn check_apps(
    apps: &[AppEntry],
    validator: &CommandValidator<'_>,
    platform: &Platform,
) -> StatusBoard {
    let mut board = StatusBoard::new();
    for app in apps {
        let Some(command) = app.command_for(platform) else {
            info!("No {} command configured for {}", platform, app.name);
            continue;
        };
        board.start(&app.name);
        let details = validator.validate_on(command, &app.name, &app.alias_refs(), platform);
        board.record(&app.name, details);
    }
    board
}

/// Validate every configured application and print a status board.
pub fn check_command(
    config: &ToolboxConfig,
    validator: &CommandValidator<'_>,
    platform: &Platform,
) -> Result<StatusBoard> {
    let board = check_apps(&config.apps, validator, platform);

    if board.entries().is_empty() {
        output::info(&format!("no application has a command for {platform}"));
        return Ok(board);
    }

    let mut table = Table::new("{:<}  {:<}  {:<}");
    for (app, details) in board.entries() {
        table.add_row(
            Row::new()
                .with_cell(output::level_badge(details.level))
                .with_cell(output::app_name(app))
                .with_cell(&details.message),
        );
    }
    println!("{table}");

    let summary = board.summary();
    let tally = |band: ValidationBand| summary.get(&band).copied().unwrap_or(0);
    println!(
        "{} valid, {} with warnings, {} invalid",
        output::count(tally(ValidationBand::Success)),
        output::count(tally(ValidationBand::Warning)),
        output::count(tally(ValidationBand::Error)),
    );
    Ok(board)
}
