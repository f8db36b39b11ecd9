//! Choosing which shim build to inject.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use overridehosts_core::config::{GLIBC_LIBRARY_NAME, MUSL_LIBRARY_NAME};

use crate::error::LaunchError;

/// Loaders whose presence means the system runs musl.
pub const MUSL_LOADERS: &[&str] = &[
    "/lib/ld-musl-x86_64.so.1",
    "/lib/ld-musl-aarch64.so.1",
    "/lib/ld-musl-armhf.so.1",
    "/lib/ld-musl-i386.so.1",
    "/lib/ld-musl-riscv64.so.1",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Glibc,
    Musl,
}

impl Runtime {
    pub fn detect() -> Self {
        Self::detect_with(|path| path.exists())
    }

    pub fn detect_with(mut exists: impl FnMut(&Path) -> bool) -> Self {
        if MUSL_LOADERS.iter().any(|loader| exists(Path::new(loader))) {
            Runtime::Musl
        } else {
            Runtime::Glibc
        }
    }

    pub fn library_name(self) -> &'static str {
        match self {
            Runtime::Glibc => GLIBC_LIBRARY_NAME,
            Runtime::Musl => MUSL_LIBRARY_NAME,
        }
    }
}

/// Resolve the shim path.
///
/// An explicit path is trusted as given. Otherwise the build matching
/// `runtime` next to the launcher must exist.
pub fn select_library(
    explicit: Option<&OsStr>,
    exe_dir: &Path,
    runtime: Runtime,
    exists: impl Fn(&Path) -> bool,
) -> Result<PathBuf, LaunchError> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let path = exe_dir.join(runtime.library_name());
    if !exists(&path) {
        return Err(LaunchError::InjectionTargetMissing {
            path,
            glibc: exe_dir.join(GLIBC_LIBRARY_NAME),
            musl: exe_dir.join(MUSL_LIBRARY_NAME),
        });
    }
    Ok(path)
}

/// New `LD_PRELOAD` value with `library` in front of any existing entries.
pub fn prepend_preload(library: &Path, existing: Option<&OsStr>) -> OsString {
    let mut value = OsString::from(library.as_os_str());
    if let Some(old) = existing.filter(|old| !old.is_empty()) {
        value.push(" ");
        value.push(old);
    }
    value
}
