//! Preloadable resolver shim.
//!
//! Built as a `cdylib` and injected with `LD_PRELOAD`, this library replaces
//! `getaddrinfo`, `gethostbyname` and `gethostbyname2` in the target process.
//! Names listed in `OVERRIDEHOSTS` resolve to their configured address; all
//! other lookups go to the C library's resolver unchanged.
//!
//! Entry points are exported unmangled in release builds only, so debug and
//! test builds can link this crate without replacing their own resolver.

mod addrinfo;
pub mod context;
mod hostent;
mod logging;
pub mod resolv_abi;
pub mod symbols;

pub use context::{ShimContext, shared};
pub use symbols::{NextObject, RealResolver, SymbolSource};
