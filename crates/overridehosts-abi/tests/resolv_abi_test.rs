//! Exported entry points against the process-wide context.
//!
//! Every test installs the same `OVERRIDEHOSTS` value before its first call,
//! so whichever test runs first builds the table from it. Misses are
//! forwarded to the host C library; they only use numeric names so no
//! network lookup happens.

use std::ffi::{CStr, CString};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ptr;
use std::sync::{Arc, Barrier, Once};

use overridehosts::resolv_abi;

const OVERRIDES: &str = "db:10.0.0.10, redis:10.0.0.11, v6only:[2001:db8::1], \
                         Mixed.Case:192.0.2.55, alias:db.internal, garbage";

fn install_overrides() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        // SAFETY: runs once, before any test in this binary reads the environment.
        unsafe { std::env::set_var("OVERRIDEHOSTS", OVERRIDES) };
    });
}

fn hints(family: i32, socktype: i32) -> libc::addrinfo {
    // SAFETY: all-zero addrinfo is a valid "no hints" value.
    let mut h: libc::addrinfo = unsafe { std::mem::zeroed() };
    h.ai_family = family;
    h.ai_socktype = socktype;
    h
}

unsafe fn sockaddr_v4(ai: *const libc::addrinfo) -> (Ipv4Addr, u16) {
    // SAFETY: caller passes an AF_INET node.
    let sin = unsafe { &*(*ai).ai_addr.cast::<libc::sockaddr_in>() };
    (
        Ipv4Addr::from(sin.sin_addr.s_addr.to_ne_bytes()),
        u16::from_be(sin.sin_port),
    )
}

unsafe fn first_hostent_addr(he: *const libc::hostent) -> Ipv4Addr {
    // SAFETY: caller passes a non-null AF_INET hostent.
    unsafe {
        let first = *(*he).h_addr_list;
        let octets = std::slice::from_raw_parts(first.cast::<u8>(), 4);
        Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3])
    }
}

#[test]
fn getaddrinfo_override_ipv4_ignores_service() {
    install_overrides();
    let node = CString::new("DB").unwrap();
    let service = CString::new("5432").unwrap();
    let h = hints(libc::AF_UNSPEC, libc::SOCK_STREAM);
    let mut res: *mut libc::addrinfo = ptr::null_mut();

    let rc = unsafe { resolv_abi::getaddrinfo(node.as_ptr(), service.as_ptr(), &h, &mut res) };
    assert_eq!(rc, 0);
    assert!(!res.is_null());
    unsafe {
        assert_eq!((*res).ai_family, libc::AF_INET);
        assert_eq!((*res).ai_socktype, libc::SOCK_STREAM);
        assert_eq!((*res).ai_protocol, 0);
        assert!((*res).ai_next.is_null());
        assert!((*res).ai_canonname.is_null());
        assert_eq!(sockaddr_v4(res), (Ipv4Addr::new(10, 0, 0, 10), 0));
        libc::freeaddrinfo(res);
    }
}

#[test]
fn getaddrinfo_override_without_hints() {
    install_overrides();
    let node = CString::new("mixed.case").unwrap();
    let mut res: *mut libc::addrinfo = ptr::null_mut();

    let rc = unsafe { resolv_abi::getaddrinfo(node.as_ptr(), ptr::null(), ptr::null(), &mut res) };
    assert_eq!(rc, 0);
    unsafe {
        assert_eq!(sockaddr_v4(res).0, Ipv4Addr::new(192, 0, 2, 55));
        assert_eq!((*res).ai_socktype, 0);
        libc::freeaddrinfo(res);
    }
}

#[test]
fn getaddrinfo_ipv6_override_rejects_inet_hint() {
    install_overrides();
    let node = CString::new("v6only").unwrap();
    let h = hints(libc::AF_INET, 0);
    let mut res: *mut libc::addrinfo = ptr::null_mut();

    let rc = unsafe { resolv_abi::getaddrinfo(node.as_ptr(), ptr::null(), &h, &mut res) };
    assert_eq!(rc, libc::EAI_NONAME);
    assert!(res.is_null());
}

#[test]
fn getaddrinfo_ipv6_override_with_unspec_and_inet6_hints() {
    install_overrides();
    let node = CString::new("V6ONLY").unwrap();
    for family in [libc::AF_UNSPEC, libc::AF_INET6] {
        let h = hints(family, libc::SOCK_DGRAM);
        let mut res: *mut libc::addrinfo = ptr::null_mut();
        let rc = unsafe { resolv_abi::getaddrinfo(node.as_ptr(), ptr::null(), &h, &mut res) };
        assert_eq!(rc, 0, "family {family}");
        unsafe {
            assert_eq!((*res).ai_family, libc::AF_INET6);
            assert_eq!((*res).ai_socktype, libc::SOCK_DGRAM);
            assert!((*res).ai_next.is_null());
            let sin6 = &*(*res).ai_addr.cast::<libc::sockaddr_in6>();
            assert_eq!(
                Ipv6Addr::from(sin6.sin6_addr.s6_addr),
                "2001:db8::1".parse::<Ipv6Addr>().unwrap()
            );
            libc::freeaddrinfo(res);
        }
    }
}

#[test]
fn getaddrinfo_non_literal_override_is_noname() {
    install_overrides();
    let node = CString::new("alias").unwrap();
    let mut res: *mut libc::addrinfo = ptr::null_mut();
    let rc = unsafe { resolv_abi::getaddrinfo(node.as_ptr(), ptr::null(), ptr::null(), &mut res) };
    assert_eq!(rc, libc::EAI_NONAME);
    assert!(res.is_null());
}

#[test]
fn getaddrinfo_override_with_null_result_slot_fails() {
    install_overrides();
    let node = CString::new("db").unwrap();
    let rc = unsafe {
        resolv_abi::getaddrinfo(node.as_ptr(), ptr::null(), ptr::null(), ptr::null_mut())
    };
    assert_eq!(rc, libc::EAI_FAIL);
}

#[test]
fn getaddrinfo_miss_is_forwarded_to_host_resolver() {
    install_overrides();
    let node = CString::new("127.0.0.1").unwrap();
    let service = CString::new("8080").unwrap();
    let mut h = hints(libc::AF_INET, libc::SOCK_STREAM);
    h.ai_flags = libc::AI_NUMERICHOST;
    let mut res: *mut libc::addrinfo = ptr::null_mut();

    let rc = unsafe { resolv_abi::getaddrinfo(node.as_ptr(), service.as_ptr(), &h, &mut res) };
    assert_eq!(rc, 0);
    unsafe {
        // The host resolver honors the service, which the override path never does.
        assert_eq!(sockaddr_v4(res), (Ipv4Addr::LOCALHOST, 8080));
        libc::freeaddrinfo(res);
    }
}

#[test]
fn getaddrinfo_absent_host_misses_after_hits() {
    install_overrides();
    let hit = CString::new("redis").unwrap();
    for _ in 0..8 {
        let mut res: *mut libc::addrinfo = ptr::null_mut();
        let rc = unsafe { resolv_abi::getaddrinfo(hit.as_ptr(), ptr::null(), ptr::null(), &mut res) };
        assert_eq!(rc, 0);
        unsafe { libc::freeaddrinfo(res) };
    }

    // Numeric-only so the forwarded lookup cannot touch the network.
    let miss = CString::new("cache").unwrap();
    let mut h = hints(libc::AF_UNSPEC, 0);
    h.ai_flags = libc::AI_NUMERICHOST;
    let mut res: *mut libc::addrinfo = ptr::null_mut();
    let rc = unsafe { resolv_abi::getaddrinfo(miss.as_ptr(), ptr::null(), &h, &mut res) };
    assert_eq!(rc, libc::EAI_NONAME);
}

#[test]
fn gethostbyname_override_keeps_queried_name() {
    install_overrides();
    let name = CString::new("Redis").unwrap();
    let he = unsafe { resolv_abi::gethostbyname(name.as_ptr()) };
    assert!(!he.is_null());
    unsafe {
        assert_eq!(CStr::from_ptr((*he).h_name), c"Redis");
        assert_eq!((*he).h_addrtype, libc::AF_INET);
        assert_eq!((*he).h_length, 4);
        assert_eq!(first_hostent_addr(he), Ipv4Addr::new(10, 0, 0, 11));
        assert!((*(*he).h_addr_list.add(1)).is_null());
    }
}

#[test]
fn gethostbyname_miss_is_forwarded() {
    install_overrides();
    let name = CString::new("127.0.0.1").unwrap();
    let he = unsafe { resolv_abi::gethostbyname(name.as_ptr()) };
    assert!(!he.is_null());
    unsafe { assert_eq!(first_hostent_addr(he), Ipv4Addr::LOCALHOST) };
}

#[test]
fn gethostbyname2_inet6_override_yields_null() {
    install_overrides();
    let name = CString::new("db").unwrap();
    let he = unsafe { resolv_abi::gethostbyname2(name.as_ptr(), libc::AF_INET6) };
    assert!(he.is_null());
}

#[test]
fn gethostbyname2_inet_override() {
    install_overrides();
    let name = CString::new("db").unwrap();
    let he = unsafe { resolv_abi::gethostbyname2(name.as_ptr(), libc::AF_INET) };
    assert!(!he.is_null());
    unsafe { assert_eq!(first_hostent_addr(he), Ipv4Addr::new(10, 0, 0, 10)) };
}

#[test]
fn concurrent_legacy_lookups_keep_per_thread_results() {
    install_overrides();
    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles = (0..threads)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                let (query, expected) = if i % 2 == 0 {
                    ("db", Ipv4Addr::new(10, 0, 0, 10))
                } else {
                    ("REDIS", Ipv4Addr::new(10, 0, 0, 11))
                };
                let name = CString::new(query).unwrap();
                barrier.wait();
                for _ in 0..64 {
                    let he = unsafe { resolv_abi::gethostbyname(name.as_ptr()) };
                    assert!(!he.is_null());
                    unsafe {
                        assert_eq!(CStr::from_ptr((*he).h_name), name.as_c_str());
                        assert_eq!(first_hostent_addr(he), expected);
                    }
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().expect("lookup thread should not panic");
    }
}
