//! Safe core of the overridehosts resolver shim.
//!
//! Everything here is plain Rust with no C types: the ABI crate translates
//! between these types and `<netdb.h>` layouts at the boundary.

pub mod config;
pub mod error;
pub mod synth;
pub mod table;

pub use error::ResolveError;
pub use synth::{AddressFamily, FamilyHint, Hints, SynthesizedAddr, legacy_ipv4, synthesize};
pub use table::{Lookup, OverrideTable};
