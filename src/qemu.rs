//! QEMU launch.
//!
//! Argument construction is a pure data step, kept separate from process
//! spawning so the flag list is testable without a real emulator. The
//! spawn itself goes through the `Spawner` trait; tests substitute a
//! recording double.

use std::process::Command;

use crate::config::StageConfig;
use crate::error::{StageError, StageResult};

/// Build the fixed QEMU argument vector for a config.
pub fn qemu_args(config: &StageConfig) -> Vec<String> {
    vec![
        // QEMU enables a pile of default devices which slow down boot.
        "-nodefaults".to_string(),
        // Standard VGA for graphics
        "-vga".to_string(),
        "std".to_string(),
        // Modern machine, hardware acceleration when the host offers it
        "-machine".to_string(),
        "q35,accel=kvm:tcg".to_string(),
        "-m".to_string(),
        config.memory.clone(),
        // OVMF: code image read-only, variable store writable
        "-drive".to_string(),
        format!(
            "if=pflash,format=raw,readonly,file={}",
            config.firmware_code.display()
        ),
        "-drive".to_string(),
        format!("if=pflash,format=raw,file={}", config.firmware_vars.display()),
        // The staging directory, mounted as a FAT partition
        "-drive".to_string(),
        format!("format=raw,file=fat:rw:{}", config.build_dir.display()),
        // OVMF connects the UEFI console to this serial port
        "-serial".to_string(),
        "stdio".to_string(),
        "-monitor".to_string(),
        format!("vc:{}", config.monitor_resolution),
    ]
}

/// Process-spawning seam.
pub trait Spawner {
    /// Run `program` with `args`, blocking until it exits. Returns the
    /// exit code (`None` when the child was terminated by a signal).
    fn spawn(&self, program: &str, args: &[String]) -> StageResult<Option<i32>>;
}

/// Spawner backed by `std::process::Command` with inherited stdio, so the
/// guest serial console shares the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&self, program: &str, args: &[String]) -> StageResult<Option<i32>> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| StageError::QemuSpawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;
        Ok(status.code())
    }
}

/// Boot the staged tree under the emulator, blocking until it exits.
///
/// Firmware presence is checked up front so a missing image surfaces as a
/// typed error instead of an emulator-side failure.
pub fn run(config: &StageConfig, spawner: &dyn Spawner) -> StageResult<()> {
    for image in [&config.firmware_code, &config.firmware_vars] {
        if !image.exists() {
            return Err(StageError::FirmwareNotFound {
                path: image.clone(),
            });
        }
    }

    match spawner.spawn(&config.qemu_binary(), &qemu_args(config))? {
        Some(0) => Ok(()),
        code => Err(StageError::QemuExit { code }),
    }
}
