//! ABI layer for the intercepted resolver functions (`<netdb.h>`).
//!
//! - `getaddrinfo`: overridden names get a synthesized single-node answer
//! - `gethostbyname`: IPv4 overrides only, everything else forwarded
//! - `gethostbyname2`: as above for `AF_INET`; overrides under any other
//!   family yield null
//!
//! `freeaddrinfo` is not interposed: synthesized nodes are laid out so the
//! C library's own `freeaddrinfo` releases them.

#![allow(clippy::missing_safety_doc)]

use std::ffi::{CStr, c_char, c_int};
use std::ptr;

use overridehosts_core::{FamilyHint, Hints, Lookup, ResolveError, legacy_ipv4, synthesize};

use crate::context::{ShimContext, shared};
use crate::symbols::SymbolSource;
use crate::{addrinfo, hostent};

unsafe fn opt_cstr<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: caller-provided C string pointer.
    Some(unsafe { CStr::from_ptr(ptr) })
}

fn hints_from(hints: Option<&libc::addrinfo>) -> Hints {
    let Some(h) = hints else {
        return Hints::default();
    };
    let family = match h.ai_family {
        libc::AF_INET => FamilyHint::Ipv4,
        libc::AF_INET6 => FamilyHint::Ipv6,
        _ => FamilyHint::Unspecified,
    };
    Hints {
        family,
        socktype: h.ai_socktype,
        protocol: h.ai_protocol,
    }
}

impl<S: SymbolSource> ShimContext<S> {
    /// `getaddrinfo` against this context.
    pub unsafe fn getaddrinfo(
        &self,
        node: *const c_char,
        service: *const c_char,
        hints: *const libc::addrinfo,
        res: *mut *mut libc::addrinfo,
    ) -> c_int {
        // SAFETY: optional C string per getaddrinfo contract.
        let name = unsafe { opt_cstr(node) };
        let Lookup::Hit(addr) = self.lookup(name) else {
            return match self.real().getaddrinfo() {
                // SAFETY: forwarding the caller's arguments unchanged.
                Some(real) => unsafe { real(node, service, hints, res) },
                None => {
                    tracing::warn!("real getaddrinfo unavailable");
                    addrinfo::eai_code(ResolveError::LookupUnavailable)
                }
            };
        };

        if res.is_null() {
            return libc::EAI_FAIL;
        }
        // SAFETY: output pointer is non-null and writable by contract.
        unsafe { *res = ptr::null_mut() };

        // SAFETY: hints pointer is caller-provided and, when non-null, valid.
        let hints = hints_from(unsafe { hints.as_ref() });
        match synthesize(addr, &hints).and_then(|answer| addrinfo::allocate(&answer)) {
            Ok(node) => {
                tracing::debug!(name = ?name, addr, "getaddrinfo override");
                // SAFETY: checked non-null above.
                unsafe { *res = node };
                0
            }
            Err(err) => {
                tracing::debug!(name = ?name, addr, %err, "getaddrinfo override rejected");
                addrinfo::eai_code(err)
            }
        }
    }

    /// `gethostbyname` against this context.
    pub unsafe fn gethostbyname(&self, name: *const c_char) -> *mut libc::hostent {
        // SAFETY: optional C string per gethostbyname contract.
        let name_cstr = unsafe { opt_cstr(name) };
        if let Some(query) = name_cstr
            && let Lookup::Hit(addr) = self.lookup(name_cstr)
            && let Some(ip) = legacy_ipv4(addr)
        {
            tracing::debug!(name = ?query, addr, "gethostbyname override");
            return hostent::populate(query, ip);
        }
        match self.real().gethostbyname() {
            // SAFETY: forwarding the caller's argument unchanged.
            Some(real) => unsafe { real(name) },
            None => {
                tracing::warn!("real gethostbyname unavailable");
                ptr::null_mut()
            }
        }
    }

    /// `gethostbyname2` against this context.
    pub unsafe fn gethostbyname2(&self, name: *const c_char, af: c_int) -> *mut libc::hostent {
        // SAFETY: optional C string per gethostbyname2 contract.
        let name_cstr = unsafe { opt_cstr(name) };
        if let Some(query) = name_cstr
            && let Lookup::Hit(addr) = self.lookup(name_cstr)
        {
            if af != libc::AF_INET {
                // Only AF_INET records are built; other families use getaddrinfo.
                tracing::debug!(name = ?query, addr, af, "no hostent for override family");
                return ptr::null_mut();
            }
            if let Some(ip) = legacy_ipv4(addr) {
                tracing::debug!(name = ?query, addr, "gethostbyname2 override");
                return hostent::populate(query, ip);
            }
        }
        match self.real().gethostbyname2() {
            // SAFETY: forwarding the caller's arguments unchanged.
            Some(real) => unsafe { real(name, af) },
            None => {
                tracing::warn!("real gethostbyname2 unavailable");
                ptr::null_mut()
            }
        }
    }
}

/// POSIX `getaddrinfo`.
///
/// On an override hit `service` is ignored and the port is left at 0.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn getaddrinfo(
    node: *const c_char,
    service: *const c_char,
    hints: *const libc::addrinfo,
    res: *mut *mut libc::addrinfo,
) -> c_int {
    // SAFETY: arguments passed through from the C caller.
    unsafe { shared().getaddrinfo(node, service, hints, res) }
}

/// Legacy `gethostbyname`. The result lives in thread-local storage.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn gethostbyname(name: *const c_char) -> *mut libc::hostent {
    // SAFETY: argument passed through from the C caller.
    unsafe { shared().gethostbyname(name) }
}

/// GNU `gethostbyname2`. The result lives in thread-local storage.
#[cfg_attr(not(debug_assertions), unsafe(no_mangle))]
pub unsafe extern "C" fn gethostbyname2(name: *const c_char, af: c_int) -> *mut libc::hostent {
    // SAFETY: arguments passed through from the C caller.
    unsafe { shared().gethostbyname2(name, af) }
}
