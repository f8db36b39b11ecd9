//! Collecting `host:addr` mappings from the environment and the command line.

use std::ffi::{OsStr, OsString};

use crate::error::LaunchError;

/// A plausible mapping: contains a colon and is not an option.
///
/// Anything finer (empty host, bad address) is left to the shim's
/// permissive parser. Non-UTF-8 bytes are accepted as they are.
pub fn looks_like_mapping(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    !bytes.is_empty() && bytes[0] != b'-' && bytes.contains(&b':')
}

/// Mapping tokens from an existing `OVERRIDEHOSTS` value.
///
/// Commas and whitespace both separate tokens; tokens that do not look like
/// mappings are dropped.
pub fn from_env_value(raw: &str) -> Vec<OsString> {
    raw.split(|c: char| matches!(c, ',' | ' ' | '\t' | '\n' | '\r'))
        .map(OsStr::new)
        .filter(|token| looks_like_mapping(token))
        .map(OsStr::to_os_string)
        .collect()
}

/// Merge environment mappings with command-line ones.
///
/// Command-line entries come last, so they win when the shim applies
/// last-write-wins. Every command-line argument must look like a mapping.
pub fn merge(env_value: Option<&str>, cli: &[OsString]) -> Result<Vec<OsString>, LaunchError> {
    let mut merged = env_value.map(from_env_value).unwrap_or_default();
    for arg in cli {
        if !looks_like_mapping(arg) {
            return Err(LaunchError::ConfigInvalid(format!(
                "unexpected argument before '--': {}",
                arg.to_string_lossy()
            )));
        }
        merged.push(arg.clone());
    }
    if merged.is_empty() {
        return Err(LaunchError::ConfigInvalid(String::from(
            "no mappings provided (use args and/or OVERRIDEHOSTS)",
        )));
    }
    Ok(merged)
}

/// `OVERRIDEHOSTS` value for the child: entries joined with `,`.
pub fn join(mappings: &[OsString]) -> OsString {
    let mut value = OsString::new();
    for (i, mapping) in mappings.iter().enumerate() {
        if i > 0 {
            value.push(",");
        }
        value.push(mapping);
    }
    value
}
