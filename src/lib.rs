//! Bootstage - UEFI boot tree stager and QEMU launcher
//!
//! Bootstage takes a prebuilt UEFI application (`boot.efi`), installs it
//! into the FAT directory layout OVMF expects (`EFI/BOOT/BootX64.efi` plus
//! a `startup.nsh` boot descriptor), and boots the result under
//! `qemu-system-x86_64` with OVMF firmware.

pub mod cli;
pub mod config;
pub mod error;
pub mod qemu;
pub mod stage;

// Re-exports for convenience
pub use config::StageConfig;
pub use error::{StageError, StageResult};
pub use qemu::{qemu_args, ProcessSpawner, Spawner};
pub use stage::{stage, StageOptions, StageReport, STARTUP_SCRIPT};
