//! Error types for bootstage
//!
//! Uses `thiserror` for library errors; the binary renders them through
//! `anyhow` at the CLI boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bootstage operations
pub type StageResult<T> = Result<T, StageError>;

/// Main error type for staging and launch operations
#[derive(Error, Debug)]
pub enum StageError {
    /// Boot artifact missing from the workspace
    #[error("boot artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// Firmware image missing
    #[error("firmware image not found: {path}")]
    FirmwareNotFound { path: PathBuf },

    /// Config file present but malformed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The emulator binary could not be started
    #[error("failed to spawn '{program}': {message}")]
    QemuSpawn { program: String, message: String },

    /// The emulator ran but exited with a failure status
    #[error("qemu exited with non-zero status: {code:?}")]
    QemuExit { code: Option<i32> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_artifact_not_found() {
        let err = StageError::ArtifactNotFound {
            path: PathBuf::from("boot.efi"),
        };
        assert_eq!(err.to_string(), "boot artifact not found: boot.efi");
    }

    #[test]
    fn test_error_display_firmware_not_found() {
        let err = StageError::FirmwareNotFound {
            path: PathBuf::from("ovmf/OVMF_CODE.fd"),
        };
        assert_eq!(
            err.to_string(),
            "firmware image not found: ovmf/OVMF_CODE.fd"
        );
    }

    #[test]
    fn test_error_display_qemu_exit() {
        let err = StageError::QemuExit { code: Some(1) };
        assert_eq!(
            err.to_string(),
            "qemu exited with non-zero status: Some(1)"
        );
    }
}
