// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sorting devices into floppy, hard disk and CD-ROM drives.
//!
//! The class of a device is guessed from the type of its leaf node:
//!
//! * a messaging leaf (ATAPI, SATA, USB, NVMe...) is a hard disk, unless
//!   the media is read-only and uses blocks larger than
//!   [`SECTOR_SIZE`], in which case it is a CD-ROM;
//! * an ACPI leaf is a floppy;
//! * every other leaf, media nodes in particular, is not a drive. Such
//!   devices are usually partitions and are reached through their parent
//!   disk instead.

use crate::device::DiskDevice;
use crate::device_path::{DevicePathNode, DeviceType};
use crate::drive::SECTOR_SIZE;
use crate::list::DeviceList;
use crate::media::BlockIoMedia;
use crate::Result;
use log::trace;

/// The drive class of a device.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DriveClass {
    /// Floppy drive, numbered from 0.
    Floppy,
    /// Hard disk, numbered from [`HARD_DISK_BASE`](crate::drive::HARD_DISK_BASE).
    HardDisk,
    /// Optical drive, reported under the configured CD-ROM number.
    Cdrom,
}

/// Class of a device with the given leaf node and media, or `None` if it
/// is not a drive.
#[must_use]
pub fn classify(leaf: &DevicePathNode, media: &BlockIoMedia) -> Option<DriveClass> {
    match leaf.device_type() {
        DeviceType::MESSAGING => {
            if media.is_read_only() && media.block_size() > SECTOR_SIZE {
                Some(DriveClass::Cdrom)
            } else {
                Some(DriveClass::HardDisk)
            }
        }
        DeviceType::ACPI => Some(DriveClass::Floppy),
        _ => None,
    }
}

/// One [`DeviceList`] per [`DriveClass`].
#[derive(Debug)]
pub struct DriveLists<D> {
    /// Floppy drives.
    pub floppies: DeviceList<D>,
    /// Hard disks.
    pub hard_disks: DeviceList<D>,
    /// Optical drives.
    pub cdroms: DeviceList<D>,
}

impl<D> DriveLists<D> {
    /// Three empty lists.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            floppies: DeviceList::new(),
            hard_disks: DeviceList::new(),
            cdroms: DeviceList::new(),
        }
    }

    /// The list holding drives of class `class`.
    #[must_use]
    pub const fn list(&self, class: DriveClass) -> &DeviceList<D> {
        match class {
            DriveClass::Floppy => &self.floppies,
            DriveClass::HardDisk => &self.hard_disks,
            DriveClass::Cdrom => &self.cdroms,
        }
    }

    /// The list holding drives of class `class`, mutably.
    #[must_use]
    pub fn list_mut(&mut self, class: DriveClass) -> &mut DeviceList<D> {
        match class {
            DriveClass::Floppy => &mut self.floppies,
            DriveClass::HardDisk => &mut self.hard_disks,
            DriveClass::Cdrom => &mut self.cdroms,
        }
    }

    /// Classify each of `devices` and insert it into the matching list.
    ///
    /// Devices that are not drives, and devices whose path is already in
    /// their list, are dropped.
    ///
    /// # Errors
    ///
    /// * [`Status::OUT_OF_RESOURCES`](crate::Status::OUT_OF_RESOURCES) A list could not
    ///   grow. Devices inserted before the failure stay in their lists.
    pub fn name_devices(&mut self, devices: impl IntoIterator<Item = DiskDevice<D>>) -> Result {
        for device in devices {
            let Some(class) = classify(device.leaf(), device.media()) else {
                trace!("{:?}: not a drive", device.handle());
                continue;
            };
            let handle = device.handle();
            if !self.list_mut(class).insert(device)? {
                trace!("{handle:?}: duplicate {class:?}");
            }
        }
        Ok(())
    }
}

impl<D> Default for DriveLists<D> {
    fn default() -> Self {
        Self::new()
    }
}
