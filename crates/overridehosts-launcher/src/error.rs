//! Launcher failures and their exit statuses.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// No `--` separator, or nothing after it.
    #[error("{0}")]
    Usage(&'static str),
    /// Malformed command line or no mappings at all.
    #[error("{0}")]
    ConfigInvalid(String),
    /// The launcher could not determine where its own executable lives.
    #[error("cannot locate own executable: {0}")]
    EnvironmentUnavailable(#[source] io::Error),
    /// The auto-selected shim build is not on disk.
    #[error(
        "preload library not found: {} (expected {} or {}; set OVERRIDEHOSTS_SO to override)",
        .path.display(),
        .glibc.display(),
        .musl.display()
    )]
    InjectionTargetMissing {
        path: PathBuf,
        glibc: PathBuf,
        musl: PathBuf,
    },
    /// Replacing the process image failed.
    #[error("exec {program} failed: {source}")]
    ExecFailed {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// 2 for usage errors, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::Usage(_) => 2,
            _ => 1,
        }
    }
}
