// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Status;
use core::fmt::{Debug, Display};

/// An error with a status code and optional additional data.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error<Data: Debug = ()> {
    status: Status,
    data: Data,
}

impl<Data: Debug> Error<Data> {
    /// Create an `Error`.
    ///
    /// # Panics
    ///
    /// Panics if `status` is [`Status::SUCCESS`].
    pub fn new(status: Status, data: Data) -> Self {
        assert_ne!(status, Status::SUCCESS);
        Self { status, data }
    }

    /// Get error `Status`.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Get error data.
    #[must_use]
    pub const fn data(&self) -> &Data {
        &self.data
    }

    /// Split this error into its inner status and error data
    #[allow(clippy::missing_const_for_fn)]
    pub fn split(self) -> (Status, Data) {
        (self.status, self.data)
    }
}

// Errors without error data can be autogenerated from statuses

impl From<Status> for Error<()> {
    fn from(status: Status) -> Self {
        Self::new(status, ())
    }
}

impl<Data: Debug> Display for Error<Data> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "disk error: status={:?}, data={:?}", self.status, self.data)
    }
}

impl<Data: Debug> core::error::Error for Error<Data> {}
