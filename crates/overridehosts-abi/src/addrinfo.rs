//! Packing a synthesized answer into `struct addrinfo`.
//!
//! Callers release our answers with the host C library's own `freeaddrinfo`,
//! so the node is allocated the way that library allocates its nodes: one
//! `calloc` block holding the `addrinfo` followed by its socket address. On
//! musl the block also carries the `aibuf` bookkeeping words that musl's
//! `freeaddrinfo` reads back from the node pointer.

use std::ffi::c_int;
use std::mem::size_of;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ptr::{self, addr_of_mut};

use overridehosts_core::{ResolveError, SynthesizedAddr};

#[repr(C)]
#[derive(Clone, Copy)]
union SockaddrSlot {
    v4: libc::sockaddr_in,
    v6: libc::sockaddr_in6,
}

#[repr(C)]
#[cfg_attr(target_env = "musl", allow(dead_code))]
struct AddrinfoBlock {
    ai: libc::addrinfo,
    sa: SockaddrSlot,
    #[cfg(target_env = "musl")]
    lock: [c_int; 1],
    #[cfg(target_env = "musl")]
    slot: i16,
    #[cfg(target_env = "musl")]
    refcount: i16,
}

fn sockaddr_v4(ip: Ipv4Addr) -> libc::sockaddr_in {
    libc::sockaddr_in {
        sin_family: libc::AF_INET as libc::sa_family_t,
        // The service argument is ignored on a hit; callers set the port.
        sin_port: 0,
        sin_addr: libc::in_addr {
            s_addr: u32::from_ne_bytes(ip.octets()),
        },
        sin_zero: [0; 8],
    }
}

fn sockaddr_v6(ip: Ipv6Addr) -> libc::sockaddr_in6 {
    libc::sockaddr_in6 {
        sin6_family: libc::AF_INET6 as libc::sa_family_t,
        sin6_port: 0,
        sin6_flowinfo: 0,
        sin6_addr: libc::in6_addr {
            s6_addr: ip.octets(),
        },
        sin6_scope_id: 0,
    }
}

/// Allocate a single-node `addrinfo` list for `answer`.
///
/// The returned node is owned by the caller and must be released with
/// `freeaddrinfo`.
pub(crate) fn allocate(answer: &SynthesizedAddr) -> Result<*mut libc::addrinfo, ResolveError> {
    // SAFETY: plain zeroed allocation; checked for null below.
    let block = unsafe { libc::calloc(1, size_of::<AddrinfoBlock>()) }.cast::<AddrinfoBlock>();
    if block.is_null() {
        return Err(ResolveError::ResourceExhausted);
    }

    let (family, addrlen) = match answer.addr {
        IpAddr::V4(ip) => {
            // SAFETY: `block` is a live, suitably aligned allocation of AddrinfoBlock.
            unsafe { addr_of_mut!((*block).sa.v4).write(sockaddr_v4(ip)) };
            (libc::AF_INET, size_of::<libc::sockaddr_in>())
        }
        IpAddr::V6(ip) => {
            // SAFETY: as above.
            unsafe { addr_of_mut!((*block).sa.v6).write(sockaddr_v6(ip)) };
            (libc::AF_INET6, size_of::<libc::sockaddr_in6>())
        }
    };

    // SAFETY: as above; `sa` lives in the same block and outlives the node.
    unsafe {
        let sa = addr_of_mut!((*block).sa).cast::<libc::sockaddr>();
        addr_of_mut!((*block).ai).write(libc::addrinfo {
            ai_flags: 0,
            ai_family: family,
            ai_socktype: answer.socktype,
            ai_protocol: answer.protocol,
            ai_addrlen: addrlen as libc::socklen_t,
            ai_addr: sa,
            ai_canonname: ptr::null_mut(),
            ai_next: ptr::null_mut(),
        });
        #[cfg(target_env = "musl")]
        {
            (*block).slot = 0;
            (*block).refcount = 1;
        }
    }

    Ok(block.cast::<libc::addrinfo>())
}

/// `EAI_*` code for a failed modern lookup.
pub(crate) fn eai_code(err: ResolveError) -> c_int {
    match err {
        ResolveError::NoSuchName => libc::EAI_NONAME,
        ResolveError::ResourceExhausted => libc::EAI_MEMORY,
        ResolveError::LookupUnavailable => libc::EAI_FAIL,
    }
}
