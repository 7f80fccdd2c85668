//! Handle creation, destruction, and timeline queries.

use crate::state::Microstructure;

/// Creates an empty microstructure handle and returns an opaque pointer.
///
/// # Safety
/// The returned pointer must eventually be freed with `pc_destroy()`.
#[no_mangle]
pub extern "C" fn pc_create() -> *mut Microstructure {
    Box::into_raw(Box::new(Microstructure::new()))
}

/// Destroys a handle and frees its grid and timeline.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `pc_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn pc_destroy(ptr: *mut Microstructure) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Number of cycles recorded with `pc_record_cycle`.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// The entry count, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pc_timeline_len(ptr: *const Microstructure) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).timeline.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        unsafe {
            let handle = pc_create();
            assert!(!handle.is_null());
            assert!((*handle).grid.is_none());

            // Should not crash
            pc_destroy(handle);
        }
    }

    #[test]
    fn test_initial_timeline_empty() {
        unsafe {
            let handle = pc_create();
            assert_eq!(pc_timeline_len(handle), 0);
            pc_destroy(handle);
        }
    }

    #[test]
    fn test_null_handles() {
        unsafe {
            // Should not crash
            pc_destroy(ptr::null_mut());
            assert_eq!(pc_timeline_len(ptr::null()), 0);
        }
    }
}
