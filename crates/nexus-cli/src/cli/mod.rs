//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use nexus_core::{config, interrupt};

mod commands;

#[derive(Parser)]
#[command(name = "nexus")]
#[command(version)]
#[command(about = "Terminal front-end for the Nexus developer forum")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the forum (default when no command is given)
    Tui,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect or edit stored preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },

    /// Show or switch the color theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Rate a password the way the signup form does
    Strength {
        #[arg(value_name = "PASSWORD")]
        password: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Set a single config key
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

#[derive(clap::Subcommand)]
enum PrefsCommands {
    /// Print a stored value
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Store a value
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Delete a stored value
    Remove {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Delete every stored value
    Clear,
    /// Show the path to the preferences file
    Path,
}

#[derive(clap::Subcommand)]
enum ThemeCommands {
    /// Print the current theme
    Show,
    /// Switch between dark and light
    Toggle,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    // timers and the clipboard run on this runtime
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let _enter = rt.enter();

    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        return commands::tui::run(&load_config()?);
    };

    match command {
        Commands::Tui => commands::tui::run(&load_config()?),

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::Set { key, value } => commands::config::set(&key, &value),
        },

        Commands::Prefs { command } => match command {
            PrefsCommands::Get { key } => commands::prefs::get(&key),
            PrefsCommands::Set { key, value } => commands::prefs::set(&key, &value),
            PrefsCommands::Remove { key } => commands::prefs::remove(&key),
            PrefsCommands::Clear => commands::prefs::clear(),
            PrefsCommands::Path => {
                commands::prefs::path();
                Ok(())
            }
        },

        Commands::Theme { command } => match command.unwrap_or(ThemeCommands::Show) {
            ThemeCommands::Show => commands::theme::show(),
            ThemeCommands::Toggle => commands::theme::toggle(),
        },

        Commands::Strength { password } => {
            commands::strength::run(&password);
            Ok(())
        }
    }
}

fn load_config() -> Result<config::Config> {
    config::Config::load().context("load config")
}
