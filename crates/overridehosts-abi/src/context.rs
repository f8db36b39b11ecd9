//! Process-wide shim state.
//!
//! A [`ShimContext`] owns the override table, its configuration source, and
//! the cache of real resolver symbols. The exported entry points reach the
//! single process instance through [`shared`]; tests build their own.

use std::ffi::CStr;
use std::sync::OnceLock;

use overridehosts_core::config::{OVERRIDES_ENV, non_empty_var};
use overridehosts_core::{Lookup, OverrideTable};

use crate::logging;
use crate::symbols::{NextObject, RealResolver, SymbolSource};

type ConfigSource = Box<dyn Fn() -> Option<String> + Send + Sync>;

pub struct ShimContext<S = NextObject> {
    config: ConfigSource,
    table: OnceLock<OverrideTable>,
    real: RealResolver<S>,
}

impl ShimContext<NextObject> {
    /// Context reading `OVERRIDEHOSTS` and forwarding through `RTLD_NEXT`.
    pub fn from_env() -> Self {
        Self::new(|| non_empty_var(OVERRIDES_ENV), NextObject)
    }
}

impl<S: SymbolSource> ShimContext<S> {
    /// `config` is called at most once, on the first lookup of a non-empty name.
    pub fn new(config: impl Fn() -> Option<String> + Send + Sync + 'static, source: S) -> Self {
        Self {
            config: Box::new(config),
            table: OnceLock::new(),
            real: RealResolver::new(source),
        }
    }

    /// The override table, parsed on first use.
    ///
    /// Concurrent first callers block until the single parse completes.
    pub fn table(&self) -> &OverrideTable {
        self.table.get_or_init(|| {
            logging::init_from_env();
            let table = match (self.config)() {
                Some(raw) => OverrideTable::parse(&raw),
                None => OverrideTable::new(),
            };
            tracing::debug!(entries = table.len(), "override table ready");
            table
        })
    }

    /// Hit/miss decision for a caller-supplied name.
    ///
    /// Null and empty names miss without building the table.
    pub fn lookup(&self, name: Option<&CStr>) -> Lookup<'_> {
        match name {
            Some(name) if !name.is_empty() => self.table().lookup_bytes(name.to_bytes()),
            _ => Lookup::Miss,
        }
    }

    pub fn real(&self) -> &RealResolver<S> {
        &self.real
    }
}

/// The context behind the exported entry points.
pub fn shared() -> &'static ShimContext {
    static CONTEXT: OnceLock<ShimContext> = OnceLock::new();
    CONTEXT.get_or_init(ShimContext::from_env)
}
