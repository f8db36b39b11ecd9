//! Per-thread storage behind the legacy `gethostbyname*` answers.
//!
//! Like the C library's own implementation, a returned `hostent` points into
//! storage owned by the calling thread and stays valid only until that
//! thread's next legacy lookup. Threads never share the storage.

use std::cell::RefCell;
use std::ffi::{CStr, c_char};
use std::net::Ipv4Addr;
use std::ptr;

pub(crate) struct HostentScratch {
    name: Vec<u8>,
    addr: [u8; 4],
    aliases: [*mut c_char; 1],
    addr_list: [*mut c_char; 2],
    hostent: libc::hostent,
}

impl HostentScratch {
    fn new() -> Self {
        Self {
            name: Vec::new(),
            addr: [0; 4],
            aliases: [ptr::null_mut(); 1],
            addr_list: [ptr::null_mut(); 2],
            hostent: libc::hostent {
                h_name: ptr::null_mut(),
                h_aliases: ptr::null_mut(),
                h_addrtype: 0,
                h_length: 0,
                h_addr_list: ptr::null_mut(),
            },
        }
    }

    /// Overwrite the record with `name` → `ip` and return a pointer to it.
    fn fill(&mut self, name: &CStr, ip: Ipv4Addr) -> *mut libc::hostent {
        self.name.clear();
        self.name.extend_from_slice(name.to_bytes_with_nul());
        self.addr = ip.octets();
        self.aliases[0] = ptr::null_mut();
        self.addr_list[0] = self.addr.as_mut_ptr().cast::<c_char>();
        self.addr_list[1] = ptr::null_mut();
        self.hostent = libc::hostent {
            h_name: self.name.as_mut_ptr().cast::<c_char>(),
            h_aliases: self.aliases.as_mut_ptr(),
            h_addrtype: libc::AF_INET,
            h_length: 4,
            h_addr_list: self.addr_list.as_mut_ptr(),
        };
        &mut self.hostent
    }
}

thread_local! {
    static HOSTENT_SCRATCH: RefCell<HostentScratch> = RefCell::new(HostentScratch::new());
}

/// Build the legacy answer in this thread's scratch storage.
///
/// Returns null when called during thread teardown, after the storage is gone.
pub(crate) fn populate(name: &CStr, ip: Ipv4Addr) -> *mut libc::hostent {
    HOSTENT_SCRATCH
        .try_with(|cell| cell.borrow_mut().fill(name, ip))
        .unwrap_or(ptr::null_mut())
}
