// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data type definitions
//!
//! This module defines the basic data types that are used throughout the
//! disk layer.

use core::ffi::c_void;
use core::ptr::NonNull;

/// Opaque handle to a firmware entity (a disk, a partition, an image...).
///
/// The disk layer never owns or dereferences handles; it only stores them
/// and passes them back to the [`Firmware`].
///
/// [`Firmware`]: crate::firmware::Firmware
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Handle(NonNull<c_void>);

impl Handle {
    /// Creates a new [`Handle`] from a raw address.
    ///
    /// Returns `None` if `ptr` is null.
    ///
    /// # Safety
    /// The caller must be sure that the pointer is a handle understood by
    /// the [`Firmware`] the handle will be passed to.
    ///
    /// [`Firmware`]: crate::firmware::Firmware
    pub unsafe fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        // shorthand for "|ptr| Self(ptr)"
        NonNull::new(ptr).map(Self)
    }

    /// Get the underlying raw pointer.
    #[must_use]
    pub const fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_pointer() {
        let raw = 0x1000 as *mut c_void;
        let handle = unsafe { Handle::from_ptr(raw) }.unwrap();
        assert_eq!(handle.as_ptr(), raw);
        assert!(unsafe { Handle::from_ptr(core::ptr::null_mut()) }.is_none());
    }
}
