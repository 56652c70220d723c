//! Ownership transfer between the engine side and the foreign caller.
//!
//! Every object the C surface hands out is either an *owned handle* or a
//! *borrowed reference*:
//!
//! - An owned handle is produced by [`into_owned`], which detaches the value
//!   onto the heap and hands the caller sole ownership of the raw pointer.
//!   The caller must pass it back to the matching release function exactly
//!   once; [`release`] reclaims it. Releasing null is a no-op so callers can
//!   unconditionally release results of fallible factories.
//! - A borrowed reference is converted back with [`borrow`]/[`borrow_mut`]
//!   for the duration of a single call and confers no ownership.
//!
//! Debug builds additionally keep a live-handle counter so test harnesses
//! (and embedders) can assert that allocations and releases balance. The
//! counter is bookkeeping only; it does not make double-release safe.

#[cfg(debug_assertions)]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(debug_assertions)]
static LIVE_OWNED: AtomicUsize = AtomicUsize::new(0);

/// Detach `value` into an owned handle for the foreign caller.
pub fn into_owned<T>(value: T) -> *mut T {
    #[cfg(debug_assertions)]
    LIVE_OWNED.fetch_add(1, Ordering::Relaxed);
    Box::into_raw(Box::new(value))
}

/// Reclaim an owned handle previously produced by [`into_owned`].
///
/// # Safety
/// `ptr` must be null or a pointer returned by [`into_owned`] that has not
/// been released before and is not referenced by any outstanding borrow.
pub unsafe fn release<T>(ptr: *mut T) {
    if ptr.is_null() {
        return;
    }
    #[cfg(debug_assertions)]
    LIVE_OWNED.fetch_sub(1, Ordering::Relaxed);
    drop(unsafe { Box::from_raw(ptr) });
}

/// Borrow a handle for the duration of the current call.
///
/// # Safety
/// `ptr` must be null or valid for reads for the duration of the call.
pub unsafe fn borrow<'a, T>(ptr: *const T) -> Option<&'a T> {
    unsafe { ptr.as_ref() }
}

/// Mutably borrow a handle for the duration of the current call.
///
/// # Safety
/// `ptr` must be null or valid and not aliased for the duration of the call.
pub unsafe fn borrow_mut<'a, T>(ptr: *mut T) -> Option<&'a mut T> {
    unsafe { ptr.as_mut() }
}

/// Number of owned handles currently alive. Always zero in release builds,
/// where the counter is compiled out.
pub fn live_owned() -> usize {
    #[cfg(debug_assertions)]
    {
        LIVE_OWNED.load(Ordering::Relaxed)
    }
    #[cfg(not(debug_assertions))]
    {
        0
    }
}

/// An owned, self-contained byte buffer (e.g. an encoded PNG) handed to the
/// caller as a single handle with pointer/length accessors.
pub struct OwnedBytes {
    bytes: Vec<u8>,
}

impl OwnedBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test: the counter is process-global and concurrent tests would
    // race the equality checks.
    #[test]
    fn ownership_protocol_round_trips() {
        let before = live_owned();

        let h = into_owned(vec![1u8, 2, 3]);
        assert!(!h.is_null());
        assert_eq!(live_owned(), before + 1);
        unsafe { release(h) };
        assert_eq!(live_owned(), before);

        unsafe { release::<u32>(std::ptr::null_mut()) };
        assert_eq!(live_owned(), before);

        let h = into_owned(7u32);
        unsafe {
            assert_eq!(*borrow(h).unwrap(), 7);
            assert_eq!(*borrow(h).unwrap(), 7);
            assert!(borrow::<u32>(std::ptr::null()).is_none());
            assert!(borrow_mut::<u32>(std::ptr::null_mut()).is_none());
            release(h);
        }
        assert_eq!(live_owned(), before);
    }
}
