//! Bootstage CLI - UEFI boot tree stager and QEMU launcher
//!
//! Usage: bootstage <COMMAND>
//!
//! Commands:
//!   build   Stage boot.efi into build/EFI/BOOT and write startup.nsh
//!   run     Boot the staged tree under QEMU with OVMF firmware

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bootstage::cli::{Cli, Commands};
use bootstage::config::StageConfig;
use bootstage::qemu::{self, ProcessSpawner};
use bootstage::stage::{stage, StageOptions, StageReport};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source,
            build_dir,
            dry_run,
        } => cmd_build(source, build_dir, dry_run, cli.json),
        Commands::Run { build_dir } => cmd_run(build_dir, cli.verbose, cli.json),
    }
}

/// Resolve the config for the current workspace and layer CLI overrides on
/// top of it.
fn load_config(source: Option<PathBuf>, build_dir: Option<PathBuf>) -> Result<StageConfig> {
    let workspace = std::env::current_dir().context("could not determine current directory")?;
    let mut config = StageConfig::load(&workspace)?;

    // join() keeps absolute flag values as-is
    if let Some(dir) = build_dir {
        config.build_dir = workspace.join(dir);
    }
    if let Some(artifact) = source {
        config.artifact = workspace.join(artifact);
    }

    Ok(config)
}

fn cmd_build(
    source: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let config = load_config(source, build_dir)?;

    if !json {
        println!("📦 Staging boot tree");
        println!("Source: {}", config.artifact.display());
        println!("Build dir: {}", config.build_dir.display());
        if dry_run {
            println!("Mode: Dry run");
        }
    }

    let report = stage(&config, &StageOptions { dry_run })
        .with_context(|| format!("failed to stage {}", config.build_dir.display()))?;

    render_report(&report, dry_run, json)?;
    Ok(())
}

fn render_report(report: &StageReport, dry_run: bool, json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "event": "build",
            "dry_run": dry_run,
            "written": report.written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "skipped": report.skipped.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("\n📊 Staging Results:");
    if !report.written.is_empty() {
        let verb = if dry_run { "Would write" } else { "Written" };
        println!("  ✓ {}: {} files", verb, report.written.len());
        for path in &report.written {
            println!("    - {}", path.display());
        }
    }
    if !report.skipped.is_empty() {
        println!("  ⚠ Unchanged: {} files", report.skipped.len());
        for path in &report.skipped {
            println!("    - {}", path.display());
        }
    }
    println!();
    Ok(())
}

fn cmd_run(build_dir: Option<PathBuf>, verbose: u8, json: bool) -> Result<()> {
    let config = load_config(None, build_dir)?;

    if !json {
        println!("🚀 Booting {} under QEMU", config.build_dir.display());
    }
    if verbose >= 1 && !json {
        println!(
            "$ {} {}",
            config.qemu_binary(),
            qemu::qemu_args(&config).join(" ")
        );
    }

    qemu::run(&config, &ProcessSpawner)
        .with_context(|| format!("failed to boot {}", config.build_dir.display()))?;

    if json {
        let output = serde_json::json!({
            "event": "run",
            "status": "success",
        });
        println!("{}", serde_json::to_string(&output)?);
    }
    Ok(())
}
