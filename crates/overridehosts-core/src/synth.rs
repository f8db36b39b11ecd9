//! Resolver result synthesis.
//!
//! Given the address text of an override and the caller's hints, decide what
//! the single synthesized answer looks like. No C layout is produced here;
//! the ABI crate packs a [`SynthesizedAddr`] into `addrinfo` or `hostent`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::ResolveError;

/// Address family requested through `ai_family`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyHint {
    #[default]
    Unspecified,
    Ipv4,
    Ipv6,
}

/// Address family of a synthesized answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

/// The subset of `struct addrinfo` hints the shim honors.
///
/// `socktype` and `protocol` are opaque and copied into the answer as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hints {
    pub family: FamilyHint,
    pub socktype: i32,
    pub protocol: i32,
}

/// A one-address resolver answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesizedAddr {
    pub addr: IpAddr,
    pub socktype: i32,
    pub protocol: i32,
}

impl SynthesizedAddr {
    pub fn family(&self) -> AddressFamily {
        match self.addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

/// Classify address text the way `inet_pton` would.
fn classify(text: &str) -> Option<IpAddr> {
    if let Ok(v4) = text.parse::<Ipv4Addr>() {
        return Some(IpAddr::V4(v4));
    }
    text.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
}

/// Build the answer for an overridden name.
///
/// Fails with [`ResolveError::NoSuchName`] when the text is not an IP literal
/// or its family contradicts `hints.family`.
pub fn synthesize(text: &str, hints: &Hints) -> Result<SynthesizedAddr, ResolveError> {
    let addr = classify(text).ok_or(ResolveError::NoSuchName)?;
    match (hints.family, addr) {
        (FamilyHint::Ipv4, IpAddr::V6(_)) | (FamilyHint::Ipv6, IpAddr::V4(_)) => {
            return Err(ResolveError::NoSuchName);
        }
        _ => {}
    }
    Ok(SynthesizedAddr {
        addr,
        socktype: hints.socktype,
        protocol: hints.protocol,
    })
}

/// The IPv4 address a legacy `hostent` answer can carry, if any.
pub fn legacy_ipv4(text: &str) -> Option<Ipv4Addr> {
    text.parse().ok()
}
