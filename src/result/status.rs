// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Error, Result};

pub use uefi_raw::Status;

/// Extension trait which provides some convenience methods for [`Status`].
///
/// Firmware bindings usually report a bare [`Status`]; implementations of
/// [`DiskIo`] and [`Firmware`] use these helpers to turn it into a
/// [`Result`].
///
/// [`DiskIo`]: crate::media::DiskIo
/// [`Firmware`]: crate::firmware::Firmware
pub trait StatusExt {
    /// Converts this status code into a [`Result`].
    ///
    /// If the status does not indicate success, the status representing the
    /// specific error code is embedded into the `Err` variant.
    fn to_result(self) -> Result;

    /// Converts this status code into a [`Result`] with a given `Ok` value.
    fn to_result_with_val<T>(self, val: impl FnOnce() -> T) -> Result<T, ()>;
}

impl StatusExt for Status {
    #[inline]
    fn to_result(self) -> Result {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.into())
        }
    }

    #[inline]
    fn to_result_with_val<T>(self, val: impl FnOnce() -> T) -> Result<T, ()> {
        if self.is_success() {
            Ok(val())
        } else {
            Err(Error::from(self))
        }
    }
}
