//! Resolution failures surfaced by the shim.

use thiserror::Error;

/// Failure of an intercepted lookup.
///
/// The ABI layer reports these through each entry point's own convention:
/// an `EAI_*` code for `getaddrinfo`, a null record for the legacy calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The override address is not a literal of the family the caller asked for.
    #[error("name or service not known")]
    NoSuchName,
    /// Allocation of the synthesized answer failed.
    #[error("memory allocation failure")]
    ResourceExhausted,
    /// No override applies and the real resolver could not be located.
    #[error("real resolver entry point unavailable")]
    LookupUnavailable,
}
