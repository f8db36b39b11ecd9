//! Lookup of the genuine resolver entry points.
//!
//! The shim never reimplements resolution for names it does not override. It
//! asks the dynamic loader for the next definition of each symbol after
//! itself and caches the answer for the life of the process.

use std::ffi::{CStr, c_char, c_int, c_void};
use std::sync::OnceLock;

pub type GetaddrinfoFn = unsafe extern "C" fn(
    *const c_char,
    *const c_char,
    *const libc::addrinfo,
    *mut *mut libc::addrinfo,
) -> c_int;
pub type GethostbynameFn = unsafe extern "C" fn(*const c_char) -> *mut libc::hostent;
pub type Gethostbyname2Fn = unsafe extern "C" fn(*const c_char, c_int) -> *mut libc::hostent;

/// Resolves a symbol name to an address, or null when it is not found.
pub trait SymbolSource: Send + Sync {
    fn lookup(&self, symbol: &CStr) -> *mut c_void;
}

/// `dlsym(RTLD_NEXT, ..)`: the definition that would have been used had the
/// shim not been preloaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NextObject;

impl SymbolSource for NextObject {
    fn lookup(&self, symbol: &CStr) -> *mut c_void {
        // SAFETY: `symbol` is NUL-terminated; RTLD_NEXT is a valid pseudo-handle.
        unsafe { libc::dlsym(libc::RTLD_NEXT, symbol.as_ptr()) }
    }
}

/// Per-symbol cache over a [`SymbolSource`].
///
/// Each symbol is looked up at most once; a failed lookup is cached too.
pub struct RealResolver<S> {
    source: S,
    getaddrinfo: OnceLock<Option<GetaddrinfoFn>>,
    gethostbyname: OnceLock<Option<GethostbynameFn>>,
    gethostbyname2: OnceLock<Option<Gethostbyname2Fn>>,
}

impl<S: SymbolSource> RealResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            getaddrinfo: OnceLock::new(),
            gethostbyname: OnceLock::new(),
            gethostbyname2: OnceLock::new(),
        }
    }

    pub fn getaddrinfo(&self) -> Option<GetaddrinfoFn> {
        *self.getaddrinfo.get_or_init(|| {
            let ptr = self.source.lookup(c"getaddrinfo");
            // SAFETY: the loader's `getaddrinfo` has the `<netdb.h>` signature.
            (!ptr.is_null())
                .then(|| unsafe { std::mem::transmute::<*mut c_void, GetaddrinfoFn>(ptr) })
        })
    }

    pub fn gethostbyname(&self) -> Option<GethostbynameFn> {
        *self.gethostbyname.get_or_init(|| {
            let ptr = self.source.lookup(c"gethostbyname");
            // SAFETY: the loader's `gethostbyname` has the `<netdb.h>` signature.
            (!ptr.is_null())
                .then(|| unsafe { std::mem::transmute::<*mut c_void, GethostbynameFn>(ptr) })
        })
    }

    pub fn gethostbyname2(&self) -> Option<Gethostbyname2Fn> {
        *self.gethostbyname2.get_or_init(|| {
            let ptr = self.source.lookup(c"gethostbyname2");
            // SAFETY: the loader's `gethostbyname2` has the `<netdb.h>` signature.
            (!ptr.is_null())
                .then(|| unsafe { std::mem::transmute::<*mut c_void, Gethostbyname2Fn>(ptr) })
        })
    }
}
