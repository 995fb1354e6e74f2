// SPDX-License-Identifier: MIT OR Apache-2.0

//! Facilities for dealing with operation results.
//!
//! The disk layer keeps the firmware's binary success/failure model: an
//! operation either succeeds or fails with a [`Status`] naming the
//! category of failure.
//!
//! | Failure                  | Status                          |
//! |--------------------------|---------------------------------|
//! | No such drive/handle     | [`Status::NOT_FOUND`]           |
//! | Memory exhausted         | [`Status::OUT_OF_RESOURCES`]    |
//! | Transfer failed          | status reported by the firmware |
//! | Unknown operation code   | [`Status::INVALID_PARAMETER`]   |
//! | Buffer too short         | [`Status::BAD_BUFFER_SIZE`]     |

use core::fmt::Debug;

/// The error type that we use, essentially a status code + optional additional data
mod error;
pub use self::error::Error;

/// Definition of UEFI's standard status codes
mod status;
pub use self::status::{Status, StatusExt};

/// Return type of most operations. Both success and error payloads are optional.
///
/// [`Status::SUCCESS`] maps to the `Ok` variant (with optional `Output`
/// data); every other status, warnings included, maps to the `Err`
/// variant (with optional `ErrData`).
pub type Result<Output = (), ErrData = ()> = core::result::Result<Output, Error<ErrData>>;

/// Extension trait which provides some convenience methods for [`Result`].
pub trait ResultExt<Output, ErrData: Debug> {
    /// Extract the status from this result
    fn status(&self) -> Status;
}

impl<Output, ErrData: Debug> ResultExt<Output, ErrData> for Result<Output, ErrData> {
    fn status(&self) -> Status {
        match self {
            Ok(_) => Status::SUCCESS,
            Err(e) => e.status(),
        }
    }
}
