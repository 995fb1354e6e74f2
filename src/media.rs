// SPDX-License-Identifier: MIT OR Apache-2.0

//! Block I/O media parameters and the Disk I/O transfer interface.

use crate::Result;

pub use uefi_raw::protocol::block::Lba;

/// Media information reported by a Block I/O protocol.
///
/// The disk layer takes a snapshot of the media when a device is
/// discovered; geometry and byte offsets are derived from that snapshot.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BlockIoMedia(uefi_raw::protocol::block::BlockIoMedia);

impl BlockIoMedia {
    /// Wrap the raw media structure.
    #[must_use]
    pub const fn new(raw: uefi_raw::protocol::block::BlockIoMedia) -> Self {
        Self(raw)
    }

    /// The current media ID.
    #[must_use]
    pub const fn media_id(&self) -> u32 {
        self.0.media_id
    }

    /// True if the media is marked read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.0.read_only.into()
    }

    /// The intrinsic block size of the device.
    ///
    /// Returns the number of bytes per logical block.
    #[must_use]
    pub const fn block_size(&self) -> u32 {
        self.0.block_size
    }

    /// The last LBA on the device.
    ///
    /// This is the highest valid block index, not a block count.
    #[must_use]
    pub const fn last_block(&self) -> Lba {
        self.0.last_block
    }

    /// Number of blocks on the device.
    #[must_use]
    pub const fn total_blocks(&self) -> u64 {
        self.0.last_block.wrapping_add(1)
    }
}

impl From<uefi_raw::protocol::block::BlockIoMedia> for BlockIoMedia {
    fn from(raw: uefi_raw::protocol::block::BlockIoMedia) -> Self {
        Self(raw)
    }
}

/// The disk I/O protocol.
///
/// This protocol abstracts the block accesses of the block I/O protocol to
/// a more general offset-length protocol. Implementations forward to the
/// firmware's `EFI_DISK_IO_PROTOCOL` (or, in tests, to an in-memory disk).
pub trait DiskIo {
    /// Reads bytes from the disk device.
    ///
    /// # Arguments:
    /// * `media_id` - ID of the medium to be read.
    /// * `offset` - Starting byte offset on the logical block I/O device to read from.
    /// * `buffer` - Buffer to read into; its length is the transfer size.
    ///
    /// # Errors:
    /// * [`Status::INVALID_PARAMETER`] The read request contains device addresses that
    ///   are not valid for the device.
    /// * [`Status::DEVICE_ERROR`] The device reported an error while performing
    ///   the read operation.
    /// * [`Status::NO_MEDIA`] There is no medium in the device.
    /// * [`Status::MEDIA_CHANGED`] `media_id` is not for the current medium.
    ///
    /// [`Status::INVALID_PARAMETER`]: crate::Status::INVALID_PARAMETER
    /// [`Status::DEVICE_ERROR`]: crate::Status::DEVICE_ERROR
    /// [`Status::NO_MEDIA`]: crate::Status::NO_MEDIA
    /// [`Status::MEDIA_CHANGED`]: crate::Status::MEDIA_CHANGED
    fn read_disk(&self, media_id: u32, offset: u64, buffer: &mut [u8]) -> Result;

    /// Writes bytes to the disk device.
    ///
    /// # Arguments:
    /// * `media_id` - ID of the medium to be written.
    /// * `offset` - Starting byte offset on the logical block I/O device to write to.
    /// * `buffer` - Buffer to write from; its length is the transfer size.
    ///
    /// # Errors:
    /// Same as [`read_disk`](Self::read_disk), plus
    /// [`Status::WRITE_PROTECTED`](crate::Status::WRITE_PROTECTED) if the
    /// device cannot be written to.
    fn write_disk(&mut self, media_id: u32, offset: u64, buffer: &[u8]) -> Result;
}
