// SPDX-License-Identifier: MIT OR Apache-2.0

//! Legacy drive numbers, geometry and sector I/O.

use crate::classify::DriveClass;
use crate::device::DiskDevice;
use crate::media::{BlockIoMedia, DiskIo};
use crate::{Config, Result, Status};
use bitflags::bitflags;
use log::debug;

/// Drive number that never names a drive.
pub const INVALID_DRIVE: u32 = 0xFFFF_FFFF;

/// Drive number reserved for network boot. It never names a disk.
pub const NETWORK_DRIVE: u32 = 0x20;

/// Drive number of the first hard disk. Drive numbers with this bit set
/// are hard disks.
pub const HARD_DISK_BASE: u32 = 0x80;

/// Partition number meaning "the whole disk, no partition".
pub const WHOLE_DISK: u32 = 0x00FF_FFFF;

/// Conventional sector size in bytes.
pub const SECTOR_SIZE: u32 = 512;

/// Sectors per track of the synthetic geometry.
pub const SECTORS_PER_TRACK: u32 = 63;

/// Head count of the synthetic geometry of larger disks.
pub const MAX_HEADS: u32 = 255;

/// The drive list and the position within it that `drive` refers to.
///
/// The reserved numbers resolve to nothing. The configured CD-ROM number
/// is checked before the hard disk bit, and only ever names the first
/// optical drive.
#[must_use]
pub fn drive_slot(drive: u32, config: &Config) -> Option<(DriveClass, usize)> {
    if drive == INVALID_DRIVE || drive == NETWORK_DRIVE {
        return None;
    }
    if drive == config.cdrom_drive() {
        return Some((DriveClass::Cdrom, 0));
    }
    let (class, index) = if drive & HARD_DISK_BASE != 0 {
        (DriveClass::HardDisk, drive - HARD_DISK_BASE)
    } else {
        (DriveClass::Floppy, drive)
    };
    Some((class, usize::try_from(index).ok()?))
}

/// The drive number of the device at `index` in the list of `class`.
///
/// Returns `None` if the position has no drive number: floppies past
/// the hard disk range and optical drives other than the first.
#[must_use]
pub fn drive_number(class: DriveClass, index: usize, config: &Config) -> Option<u32> {
    let index = u32::try_from(index).ok()?;
    match class {
        DriveClass::Floppy => (index < HARD_DISK_BASE).then_some(index),
        DriveClass::HardDisk => HARD_DISK_BASE.checked_add(index),
        DriveClass::Cdrom => (index == 0).then_some(config.cdrom_drive()),
    }
}

bitflags! {
    /// Capabilities reported alongside a drive's [`Geometry`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    #[repr(transparent)]
    pub struct GeometryFlags: u32 {
        /// The drive is addressed by LBA rather than CHS.
        const LBA_EXTENSION = 0x1;
        /// The drive is a CD-ROM.
        const CDROM = 0x2;
    }
}

/// Drive geometry in the shape legacy callers expect.
///
/// Only `total_sectors` and `sector_size` are real. The CHS triple is made
/// up from the disk size so that `cylinders * heads * sectors` never
/// exceeds it; it has nothing to do with the physical layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Geometry {
    /// Number of addressable sectors.
    pub total_sectors: u64,
    /// Bytes per sector.
    pub sector_size: u32,
    /// Cylinder count.
    pub cylinders: u64,
    /// Heads per cylinder, either 1 or [`MAX_HEADS`].
    pub heads: u32,
    /// Sectors per track, always [`SECTORS_PER_TRACK`].
    pub sectors: u32,
    /// Drive capabilities.
    pub flags: GeometryFlags,
}

impl Geometry {
    /// Geometry of a drive with the given media.
    #[must_use]
    pub const fn from_media(media: &BlockIoMedia, flags: GeometryFlags) -> Self {
        let total_sectors = media.total_blocks();
        let tracks = total_sectors / SECTORS_PER_TRACK as u64;
        let heads = if tracks < MAX_HEADS as u64 { 1 } else { MAX_HEADS };
        Self {
            total_sectors,
            sector_size: media.block_size(),
            cylinders: tracks / heads as u64,
            heads,
            sectors: SECTORS_PER_TRACK,
            flags,
        }
    }
}

newtype_enum! {
/// Operation code of a legacy disk request.
pub enum BiosDiskOp: u32 => {
    /// Read sectors into the buffer.
    READ = 0,
    /// Write sectors from the buffer.
    WRITE = 1,
}}

/// Byte offset and length of the transfer of `count` sectors starting at
/// `sector`, checked against a buffer of `buffer_len` bytes.
fn byte_range(media: &BlockIoMedia, sector: u64, count: u32, buffer_len: usize) -> Result<(u64, usize)> {
    let block_size = u64::from(media.block_size());
    let offset = sector
        .checked_mul(block_size)
        .ok_or(Status::INVALID_PARAMETER)?;
    let len = u64::from(count)
        .checked_mul(block_size)
        .and_then(|len| usize::try_from(len).ok())
        .ok_or(Status::INVALID_PARAMETER)?;
    if buffer_len < len {
        return Err(Status::BAD_BUFFER_SIZE.into());
    }
    Ok((offset, len))
}

impl<D: DiskIo> DiskDevice<D> {
    /// Read `count` sectors starting at `sector` into the start of
    /// `buffer`.
    ///
    /// Sectors are the device's own blocks, not [`SECTOR_SIZE`] units.
    ///
    /// # Errors
    ///
    /// * [`Status::INVALID_PARAMETER`] The byte offset or length overflows.
    /// * [`Status::BAD_BUFFER_SIZE`] `buffer` is too short for `count` sectors.
    /// * Any error of [`DiskIo::read_disk`], unchanged.
    pub fn read_sectors(&self, sector: u64, count: u32, buffer: &mut [u8]) -> Result {
        let (offset, len) = byte_range(self.media(), sector, count, buffer.len())?;
        self.disk_io()
            .read_disk(self.media().media_id(), offset, &mut buffer[..len])
    }

    /// Write `count` sectors starting at `sector` from the start of
    /// `buffer`.
    ///
    /// # Errors
    ///
    /// Same as [`read_sectors`](Self::read_sectors), with the errors of
    /// [`DiskIo::write_disk`].
    pub fn write_sectors(&mut self, sector: u64, count: u32, buffer: &[u8]) -> Result {
        let (offset, len) = byte_range(self.media(), sector, count, buffer.len())?;
        debug!("writing {count} sectors at sector {sector}");
        let media_id = self.media().media_id();
        self.disk_io_mut()
            .write_disk(media_id, offset, &buffer[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(block_size: u32, last_block: u64) -> BlockIoMedia {
        BlockIoMedia::new(uefi_raw::protocol::block::BlockIoMedia {
            media_id: 7,
            removable_media: false.into(),
            media_present: true.into(),
            logical_partition: false.into(),
            read_only: false.into(),
            write_caching: false.into(),
            block_size,
            io_align: 0,
            last_block,
            lowest_aligned_lba: 0,
            logical_blocks_per_physical_block: 1,
            optimal_transfer_length_granularity: 0,
        })
    }

    #[test]
    fn test_geometry_large_disk() {
        let geometry = Geometry::from_media(&media(512, 999_999), GeometryFlags::LBA_EXTENSION);
        assert_eq!(geometry.total_sectors, 1_000_000);
        assert_eq!(geometry.sector_size, 512);
        assert_eq!(geometry.sectors, 63);
        assert_eq!(geometry.heads, 255);
        assert_eq!(geometry.cylinders, 62);
        assert_eq!(geometry.flags, GeometryFlags::LBA_EXTENSION);
    }

    #[test]
    fn test_geometry_small_disk() {
        let geometry = Geometry::from_media(&media(2048, 9_999), GeometryFlags::all());
        assert_eq!(geometry.total_sectors, 10_000);
        assert_eq!(geometry.sector_size, 2048);
        assert_eq!(geometry.heads, 1);
        assert_eq!(geometry.cylinders, 158);
        assert!(geometry.flags.contains(GeometryFlags::CDROM));
    }

    #[test]
    fn test_geometry_head_threshold() {
        // 254 full tracks still use a single head, 255 do not.
        let geometry = Geometry::from_media(&media(512, 254 * 63 + 61), GeometryFlags::empty());
        assert_eq!((geometry.heads, geometry.cylinders), (1, 254));
        let geometry = Geometry::from_media(&media(512, 255 * 63 - 1), GeometryFlags::empty());
        assert_eq!((geometry.heads, geometry.cylinders), (255, 1));
    }

    #[test]
    fn test_byte_range() {
        let media = media(512, 1 << 20);
        assert_eq!(byte_range(&media, 10, 4, 4096), Ok((5120, 2048)));
        assert_eq!(byte_range(&media, 0, 0, 0), Ok((0, 0)));
        assert_eq!(
            byte_range(&media, 10, 4, 2047).map_err(|err| err.status()),
            Err(Status::BAD_BUFFER_SIZE)
        );
        assert_eq!(
            byte_range(&media, u64::MAX, 1, 512).map_err(|err| err.status()),
            Err(Status::INVALID_PARAMETER)
        );
    }

    #[test]
    fn test_drive_slots() {
        let config = Config::default();
        assert_eq!(drive_slot(0, &config), Some((DriveClass::Floppy, 0)));
        assert_eq!(drive_slot(1, &config), Some((DriveClass::Floppy, 1)));
        assert_eq!(drive_slot(0x80, &config), Some((DriveClass::HardDisk, 0)));
        assert_eq!(drive_slot(0x83, &config), Some((DriveClass::HardDisk, 3)));
        assert_eq!(drive_slot(0xE0, &config), Some((DriveClass::Cdrom, 0)));
        assert_eq!(drive_slot(INVALID_DRIVE, &config), None);
        assert_eq!(drive_slot(NETWORK_DRIVE, &config), None);

        let config = Config::new().with_cdrom_drive(0x81);
        assert_eq!(drive_slot(0x81, &config), Some((DriveClass::Cdrom, 0)));
        assert_eq!(drive_slot(0xE0, &config), Some((DriveClass::HardDisk, 0x60)));
    }

    #[test]
    fn test_drive_numbers() {
        let config = Config::default();
        for index in 0..0x80 {
            let drive = drive_number(DriveClass::HardDisk, index, &config).unwrap();
            assert!(drive >= HARD_DISK_BASE);
            let drive = drive_number(DriveClass::Floppy, index, &config).unwrap();
            assert!(drive < HARD_DISK_BASE);
        }
        assert_eq!(drive_number(DriveClass::Floppy, 0x80, &config), None);
        assert_eq!(drive_number(DriveClass::Cdrom, 0, &config), Some(0xE0));
        assert_eq!(drive_number(DriveClass::Cdrom, 1, &config), None);
    }

    #[test]
    fn test_bios_disk_op_debug() {
        assert_eq!(alloc::format!("{:?}", BiosDiskOp::WRITE), "WRITE");
        assert_eq!(alloc::format!("{:?}", BiosDiskOp(9)), "BiosDiskOp(0x9)");
    }
}
