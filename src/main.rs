use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use directories::BaseDirs;
use tracing::{debug, info, trace, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use std::path::{Path, PathBuf};

use toolbox::commands;
use toolbox::data::constants::DEFAULT_CONFIG_FILE_PATH;
use toolbox::{CommandValidator, Platform, ToolboxConfig};


/// Validate package manager install commands before they are shown or run.
#[derive(Parser, Debug)]
#[clap(author, version = clap::crate_version!(), max_term_width = 100, about)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Load ONLY the default config
    #[clap(short, long, global = true)]
    builtin_only: bool,

    /// Increase logging level
    #[clap(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to custom config file
    #[clap(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validates an install command for an application
    Validate {
        /// The full install command, e.g. "brew install git"
        command: String,

        /// Expected application name
        #[clap(short, long)]
        app: String,

        /// Official alias of the application (repeatable)
        #[clap(long = "alias")]
        aliases: Vec<String>,

        /// Target platform (darwin, windows, linux); defaults to the configured one
        #[clap(short, long)]
        platform: Option<String>,

        /// Print the verdict as JSON
        #[clap(long)]
        json: bool,
    },
    /// Lists the known package managers
    Managers {
        /// Only list managers usable on this platform
        #[clap(short, long)]
        platform: Option<String>,

        /// Export the catalog as YAML
        #[clap(long)]
        export: bool,
    },
    /// Prints the minimal install command for each package manager
    Suggest {
        app: String,

        #[clap(short, long)]
        platform: Option<String>,
    },
    /// Validates the install command of every configured application
    Check {
        #[clap(short, long)]
        platform: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn load_config(path: &Path) -> Result<ToolboxConfig, anyhow::Error> {
    let dir = BaseDirs::new().context("Failed to get base directories")?;
    let home_dir = dir.home_dir();
    let config_file = home_dir.join(path);
    let config = ToolboxConfig::load_from(&config_file)?;
    trace!("{:?}", config);
    Ok(config)
}

fn init_logging(verbose: u8) -> Result<(), anyhow::Error> {
    let log_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Runs the CLI and returns the process exit code.
pub fn run() -> Result<i32, anyhow::Error> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "toolbox", &mut std::io::stdout());
        return Ok(0);
    }

    init_logging(cli.verbose)?;
    debug!("Argument parsing complete.");

    let mut config = if cli.builtin_only {
        info!("loading built-in config because of CLI flag.");
        ToolboxConfig::builtin()?
    } else {
        let config_path = cli
            .config
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE_PATH));
        load_config(config_path)?
    };
    config.log_level = cli.verbose;

    let catalog = config.catalog().context("Failed to build package manager catalog")?;
    let validator = CommandValidator::new(&catalog);

    match &cli.command {
        Commands::Validate {
            command,
            app,
            aliases,
            platform,
            json,
        } => {
            let platform = config.effective_platform(platform.as_deref());
            debug!("toolbox validate on {}", platform);
            let level =
                commands::validate_command(&validator, command, app, aliases, &platform, *json)?;
            if level.is_error() {
                return Ok(1);
            }
        }
        Commands::Managers { platform, export } => {
            let platform = platform.as_deref().map(Platform::parse);
            commands::managers_command(&catalog, platform.as_ref(), *export)?;
        }
        Commands::Suggest { app, platform } => {
            let platform = config.effective_platform(platform.as_deref());
            commands::suggest_command(&validator, app, &platform)?;
        }
        Commands::Check { platform } => {
            let platform = config.effective_platform(platform.as_deref());
            let board = commands::check_command(&config, &validator, &platform)?;
            if board.has_errors() {
                return Ok(1);
            }
        }
        Commands::Completions { .. } => {
            unreachable!("Completions should be handled before this point");
        }
    }

    Ok(0)
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
