//! Hostname → address override table.
//!
//! The table is parsed once from a `host:addr,host2:addr2` string and never
//! mutated afterwards. Parsing is permissive: malformed items are dropped and
//! the remaining valid ones still apply.

use std::collections::HashMap;

/// Outcome of consulting the table for one name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The name is overridden; carries the configured address text.
    Hit(&'a str),
    /// Not overridden; the caller delegates to the real resolver.
    Miss,
}

impl<'a> Lookup<'a> {
    pub fn address(self) -> Option<&'a str> {
        match self {
            Lookup::Hit(addr) => Some(addr),
            Lookup::Miss => None,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

/// Lower-cased hostname → literal address text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `host:addr` list.
    ///
    /// Each item is split on its first colon, so unbracketed IPv6 addresses
    /// survive (`db:2001:db8::1`). Later items overwrite earlier ones for the
    /// same host.
    pub fn parse(raw: &str) -> Self {
        let mut entries = HashMap::new();
        for item in raw.split(',') {
            if let Some((host, addr)) = parse_item(item) {
                entries.insert(host, addr);
            }
        }
        Self { entries }
    }

    /// Case-insensitive exact match. Empty names never hit.
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        if name.is_empty() {
            return Lookup::Miss;
        }
        let key = name.to_ascii_lowercase();
        match self.entries.get(&key) {
            Some(addr) => Lookup::Hit(addr.as_str()),
            None => Lookup::Miss,
        }
    }

    /// Lookup for a name coming straight from a C string.
    pub fn lookup_bytes(&self, name: &[u8]) -> Lookup<'_> {
        match core::str::from_utf8(name) {
            Ok(text) => self.lookup(text),
            Err(_) => Lookup::Miss,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_item(item: &str) -> Option<(String, String)> {
    let item = trim_c_space(item);
    let (host, addr) = item.split_once(':')?;
    let host = trim_c_space(host);
    let addr = strip_brackets(trim_c_space(addr));
    if host.is_empty() || addr.is_empty() {
        return None;
    }
    Some((host.to_ascii_lowercase(), addr.to_string()))
}

/// `[2001:db8::1]` → `2001:db8::1`. A bare `[]` is kept as written.
fn strip_brackets(addr: &str) -> &str {
    addr.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .filter(|inner| !inner.is_empty())
        .unwrap_or(addr)
}

/// Trim the C `isspace` set, which unlike `char::is_ascii_whitespace`
/// includes vertical tab.
fn trim_c_space(s: &str) -> &str {
    s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r'))
}
