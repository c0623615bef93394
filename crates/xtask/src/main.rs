use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Nexus maintainer tasks")]
struct Cli {
    #[command(subcommand)]
    command: Option<CommandName>,
}

#[derive(Debug, Default, Subcommand)]
enum CommandName {
    /// Regenerate default_config.toml from `nexus config generate`.
    #[default]
    UpdateDefaultConfig,
    /// Fail when default_config.toml is out of date.
    CheckDefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        CommandName::UpdateDefaultConfig => update_default_config(),
        CommandName::CheckDefaultConfig => check_default_config(),
    }
}

fn update_default_config() -> Result<()> {
    let dest = default_config_path()?;
    let generated = generate_config()?;

    fs::write(&dest, generated).with_context(|| format!("write config to {}", dest.display()))?;

    println!("Updated {}", dest.display());
    Ok(())
}

fn check_default_config() -> Result<()> {
    let path = default_config_path()?;
    let committed =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let generated = generate_config()?;

    if committed != generated {
        bail!(
            "{} is stale; run `cargo run -p xtask -- update-default-config`",
            path.display()
        );
    }

    println!("{} is up to date", path.display());
    Ok(())
}

/// Runs `nexus config generate` with an empty NEXUS_HOME so the user's own
/// config never leaks into the template.
fn generate_config() -> Result<String> {
    let root = project_root()?;
    let home = tempfile::tempdir().context("create temp dir for NEXUS_HOME")?;

    let output = Command::new("cargo")
        .current_dir(&root)
        .env("NEXUS_HOME", home.path())
        .args(["run", "-q", "-p", "nexus", "--", "config", "generate"])
        .output()
        .context("run `cargo run -p nexus -- config generate`")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("config generate failed: {stderr}");
    }

    String::from_utf8(output.stdout).context("config generate printed invalid UTF-8")
}

fn default_config_path() -> Result<PathBuf> {
    Ok(project_root()?
        .join("crates")
        .join("nexus-core")
        .join("default_config.toml"))
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .ancestors()
        .nth(2)
        .context("locate workspace root from CARGO_MANIFEST_DIR")?;
    Ok(root.to_path_buf())
}
