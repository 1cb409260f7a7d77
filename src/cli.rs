use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bootstage - UEFI boot tree stager and QEMU launcher
#[derive(Parser, Debug)]
#[command(name = "bootstage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stage boot.efi into the FAT boot tree QEMU mounts
    Build {
        /// Path to the prebuilt UEFI application
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Staging directory (default: build)
        #[arg(long)]
        build_dir: Option<PathBuf>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Boot the staged tree under QEMU with OVMF firmware
    Run {
        /// Staging directory (default: build)
        #[arg(long)]
        build_dir: Option<PathBuf>,
    },
}
