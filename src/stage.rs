//! Boot tree staging.
//!
//! Materializes the FAT layout the firmware boots from:
//!
//! ```text
//! <build_dir>/EFI/BOOT/BootX64.efi
//! <build_dir>/startup.nsh
//! ```
//!
//! The artifact copy is skipped when the destination already has identical
//! content, so repeated runs converge without rewriting anything. The
//! descriptor is written atomically (tempfile + rename); a failed write
//! never truncates a previously staged file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::StageConfig;
use crate::error::{StageError, StageResult};

/// Shell path the firmware executes at startup. Backslash-separated: this
/// is EFI shell path syntax, not a host path.
pub const STARTUP_SCRIPT: &str = "\\EFI\\BOOT\\BOOTX64.EFI";

/// Options for a staging pass
#[derive(Debug, Clone, Copy, Default)]
pub struct StageOptions {
    /// Report what would change without touching the filesystem
    pub dry_run: bool,
}

/// Outcome of a staging pass
#[derive(Debug, Default)]
pub struct StageReport {
    /// Files created or overwritten
    pub written: Vec<PathBuf>,
    /// Files left alone because their content already matched
    pub skipped: Vec<PathBuf>,
}

impl StageReport {
    fn record(&mut self, path: PathBuf, unchanged: bool) {
        if unchanged {
            self.skipped.push(path);
        } else {
            self.written.push(path);
        }
    }
}

/// Stage the boot artifact and descriptor into the build directory.
///
/// The artifact must exist before anything is touched; on
/// `ArtifactNotFound` the destination tree is left exactly as it was.
pub fn stage(config: &StageConfig, options: &StageOptions) -> StageResult<StageReport> {
    if !config.artifact.exists() {
        return Err(StageError::ArtifactNotFound {
            path: config.artifact.clone(),
        });
    }

    let installed = config.installed_artifact();
    let descriptor = config.descriptor_path();

    let mut report = StageReport::default();
    let artifact_unchanged =
        installed.exists() && hash_file(&installed)? == hash_file(&config.artifact)?;
    let descriptor_unchanged = descriptor.exists()
        && fs::read(&descriptor).map(|c| c == STARTUP_SCRIPT.as_bytes())?;

    if options.dry_run {
        report.record(installed, artifact_unchanged);
        report.record(descriptor, descriptor_unchanged);
        return Ok(report);
    }

    fs::create_dir_all(config.boot_dir())?;

    if !artifact_unchanged {
        // fs::copy carries permission bits over to the destination
        fs::copy(&config.artifact, &installed)?;
    }
    report.record(installed, artifact_unchanged);

    if !descriptor_unchanged {
        atomic_write(&descriptor, STARTUP_SCRIPT.as_bytes())?;
    }
    report.record(descriptor, descriptor_unchanged);

    Ok(report)
}

/// Compute SHA-256 hash of a file
pub fn hash_file(path: &Path) -> StageResult<String> {
    let content = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

/// Write content to a file atomically via tempfile + rename.
fn atomic_write(path: &Path, content: &[u8]) -> StageResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| StageError::Io(e.error))?;
    Ok(())
}
