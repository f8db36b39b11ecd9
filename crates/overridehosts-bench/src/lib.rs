//! Shared inputs for the overridehosts benchmarks.

/// `count` mappings alternating IPv4 and bracketed IPv6 addresses.
pub fn synthetic_overrides(count: usize) -> String {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                format!("host-{i}.internal:10.{}.{}.{}", (i >> 16) & 0xff, (i >> 8) & 0xff, i & 0xff)
            } else {
                format!("HOST-{i}.internal:[2001:db8::{:x}]", i)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
