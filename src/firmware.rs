// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interfaces to the platform firmware and the partition table walker.
//!
//! The disk layer does not talk to boot services itself. Instead it is
//! handed a [`Firmware`] implementation, which on a real machine is a thin
//! wrapper around `LocateHandleBuffer`, `OpenProtocol` and the device path,
//! Block I/O and Disk I/O protocols. Partition tables are read by a
//! [`PartitionWalker`], which knows MBR and GPT; this crate does not.
//!
//! All calls are synchronous. The firmware runs on the single boot thread
//! and nothing here may be called concurrently.

use crate::media::{BlockIoMedia, DiskIo};
use crate::partition::{PartitionCursor, PartitionEntry};
use crate::{Handle, Result};
use alloc::vec::Vec;
use uguid::Guid;

/// GUID of the Disk I/O protocol.
pub const DISK_IO_GUID: Guid = uefi_raw::protocol::disk::DiskIoProtocol::GUID;

/// Handle enumeration and protocol binding.
pub trait Firmware {
    /// Disk I/O protocol instance returned by [`open_disk_io`](Self::open_disk_io).
    type DiskIo: DiskIo;

    /// Return every handle that supports `protocol`.
    ///
    /// # Errors
    /// * [`Status::NOT_FOUND`](crate::Status::NOT_FOUND) No handle supports the protocol.
    /// * [`Status::OUT_OF_RESOURCES`](crate::Status::OUT_OF_RESOURCES) The handle buffer
    ///   could not be allocated.
    fn locate_handles(&self, protocol: &Guid) -> Result<Vec<Handle>>;

    /// Raw bytes of the device path installed on `handle`.
    ///
    /// The returned slice must cover at least the whole path; it may extend
    /// beyond the end-entire node. Returns `None` if the handle has no
    /// device path.
    fn device_path(&self, handle: Handle) -> Option<&[u8]>;

    /// Open the Block I/O protocol on `handle` and return its current
    /// media information.
    fn open_block_io(&self, handle: Handle) -> Option<BlockIoMedia>;

    /// Open the Disk I/O protocol on `handle`.
    fn open_disk_io(&self, handle: Handle) -> Option<Self::DiskIo>;
}

/// Iterator over the partition tables of a legacy drive.
pub trait PartitionWalker {
    /// Advance `cursor` to the next partition of `drive` and return it, or
    /// return `Ok(None)` once the tables are exhausted.
    ///
    /// A fresh [`PartitionCursor`] starts at the first partition. Unused
    /// table slots may be reported with a partition type of zero.
    ///
    /// # Errors
    /// Failures reading the tables, such as
    /// [`Status::DEVICE_ERROR`](crate::Status::DEVICE_ERROR).
    fn next_partition(
        &mut self,
        drive: u32,
        cursor: &mut PartitionCursor,
    ) -> Result<Option<PartitionEntry>>;
}
