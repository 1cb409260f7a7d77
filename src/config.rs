//! Configuration for staging and launching.
//!
//! Hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Workspace config (`bootstage.toml`)
//! 3. Built-in defaults
//!
//! The resolved `StageConfig` is immutable from the point of view of the
//! stager and the launcher; both receive it by reference and never touch
//! ambient process state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{StageError, StageResult};

/// Workspace config file name
pub const CONFIG_FILE: &str = "bootstage.toml";

/// Resolved configuration handed to the stager and the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    /// CPU architecture string; selects the emulator binary
    pub arch: String,
    /// Workspace root that relative inputs resolve against
    pub workspace: PathBuf,
    /// Staging area mounted into QEMU as a FAT drive
    pub build_dir: PathBuf,
    /// Prebuilt UEFI application to install
    pub artifact: PathBuf,
    /// OVMF code image (read-only pflash)
    pub firmware_code: PathBuf,
    /// OVMF variable store (writable pflash)
    pub firmware_vars: PathBuf,
    /// Guest memory size, QEMU `-m` syntax
    pub memory: String,
    /// Monitor console resolution, QEMU `vc:` syntax
    pub monitor_resolution: String,
}

/// Optional overrides read from `bootstage.toml`.
///
/// Every field is optional; anything absent falls back to the built-in
/// defaults. Relative paths are resolved against the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub arch: Option<String>,

    #[serde(default)]
    pub build_dir: Option<PathBuf>,

    #[serde(default)]
    pub artifact: Option<PathBuf>,

    #[serde(default)]
    pub firmware_code: Option<PathBuf>,

    #[serde(default)]
    pub firmware_vars: Option<PathBuf>,

    #[serde(default)]
    pub memory: Option<String>,

    #[serde(default)]
    pub monitor_resolution: Option<String>,
}

impl StageConfig {
    /// Built-in defaults for a workspace root.
    pub fn for_workspace(workspace: &Path) -> Self {
        Self {
            arch: "x86_64".to_string(),
            workspace: workspace.to_path_buf(),
            build_dir: workspace.join("build"),
            artifact: workspace.join("boot.efi"),
            firmware_code: workspace.join("ovmf").join("OVMF_CODE.fd"),
            firmware_vars: workspace.join("ovmf").join("OVMF_VARS-1024x768.fd"),
            memory: "128M".to_string(),
            monitor_resolution: "1024x768".to_string(),
        }
    }

    /// Load the config for a workspace, layering `bootstage.toml` (if
    /// present) over the defaults. A missing file is not an error; a
    /// malformed one is.
    pub fn load(workspace: &Path) -> StageResult<Self> {
        let mut config = Self::for_workspace(workspace);

        let file = workspace.join(CONFIG_FILE);
        if file.exists() {
            let raw = std::fs::read_to_string(&file)?;
            let overrides: FileConfig =
                toml::from_str(&raw).map_err(|e| StageError::InvalidConfig {
                    file: file.clone(),
                    message: e.to_string(),
                })?;
            config.apply(overrides);
        }

        Ok(config)
    }

    /// Layer file overrides onto this config.
    ///
    /// `PathBuf::join` keeps absolute override paths as-is.
    pub fn apply(&mut self, overrides: FileConfig) {
        if let Some(arch) = overrides.arch {
            self.arch = arch;
        }
        if let Some(dir) = overrides.build_dir {
            self.build_dir = self.workspace.join(dir);
        }
        if let Some(artifact) = overrides.artifact {
            self.artifact = self.workspace.join(artifact);
        }
        if let Some(code) = overrides.firmware_code {
            self.firmware_code = self.workspace.join(code);
        }
        if let Some(vars) = overrides.firmware_vars {
            self.firmware_vars = self.workspace.join(vars);
        }
        if let Some(memory) = overrides.memory {
            self.memory = memory;
        }
        if let Some(resolution) = overrides.monitor_resolution {
            self.monitor_resolution = resolution;
        }
    }

    /// Emulator binary name derived from the architecture string.
    pub fn qemu_binary(&self) -> String {
        format!("qemu-system-{}", self.arch)
    }

    /// Directory the firmware scans for the default boot application.
    pub fn boot_dir(&self) -> PathBuf {
        self.build_dir.join("EFI").join("BOOT")
    }

    /// Destination of the installed application inside the FAT tree.
    pub fn installed_artifact(&self) -> PathBuf {
        self.boot_dir().join("BootX64.efi")
    }

    /// Path of the `startup.nsh` boot descriptor.
    pub fn descriptor_path(&self) -> PathBuf {
        self.build_dir.join("startup.nsh")
    }
}
