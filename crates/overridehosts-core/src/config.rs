//! Environment variables shared by the shim and the launcher.

/// Override list consumed by the shim: `host:addr,host2:addr2`.
pub const OVERRIDES_ENV: &str = "OVERRIDEHOSTS";

/// Explicit path of the shim build to preload. Skips libc detection.
pub const PRELOAD_LIBRARY_ENV: &str = "OVERRIDEHOSTS_SO";

/// `tracing` filter directive; diagnostics stay silent when unset.
pub const LOG_ENV: &str = "OVERRIDEHOSTS_LOG";

/// Dynamic loader pre-load list.
pub const LD_PRELOAD_ENV: &str = "LD_PRELOAD";

/// Shim build names, looked up next to the launcher executable.
pub const GLIBC_LIBRARY_NAME: &str = "liboverridehosts-glibc.so";
pub const MUSL_LIBRARY_NAME: &str = "liboverridehosts-musl.so";

/// Read a variable, treating unset and empty the same way.
pub fn non_empty_var(key: &str) -> Option<String> {
    let value = std::env::var_os(key)?;
    if value.is_empty() {
        return None;
    }
    Some(value.to_string_lossy().into_owned())
}
