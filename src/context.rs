// SPDX-License-Identifier: MIT OR Apache-2.0

//! The disk layer's state and its legacy-style entry points.

use crate::classify::{DriveClass, DriveLists};
use crate::device::{self, DiskDevice};
use crate::device_path::DevicePath;
use crate::drive::{drive_slot, BiosDiskOp, Geometry, GeometryFlags};
use crate::firmware::{Firmware, PartitionWalker};
use crate::list::DeviceList;
use crate::{resolve, Config, Handle, Result, Status};
use core::fmt::{self, Debug, Formatter};
use log::{debug, info, warn};

/// The drives found at startup, with the firmware they were found on.
///
/// A context is created once with [`init`](Self::init). Drive numbers
/// handed out by it stay valid until it is dropped or
/// [torn down](Self::teardown); a new context may number the same disks
/// differently.
///
/// ```
/// # use efidisk::firmware::Firmware;
/// # use efidisk::drive::{BiosDiskOp, HARD_DISK_BASE};
/// # use efidisk::{Config, DiskContext};
/// fn read_boot_sector<F: Firmware>(firmware: F) -> efidisk::Result<[u8; 512]> {
///     let mut context = DiskContext::init(firmware, Config::default());
///     let mut sector = [0; 512];
///     context.dispatch(BiosDiskOp::READ, HARD_DISK_BASE, 0, 1, &mut sector)?;
///     Ok(sector)
/// }
/// ```
pub struct DiskContext<F: Firmware> {
    firmware: F,
    config: Config,
    lists: DriveLists<F::DiskIo>,
}

impl<F: Firmware> DiskContext<F> {
    /// Enumerate the firmware's disk devices and number them.
    ///
    /// This never fails. If the firmware has no disks, or memory runs out
    /// while naming them, the context holds whatever drives were numbered
    /// so far, possibly none.
    pub fn init(firmware: F, config: Config) -> Self {
        let mut lists = DriveLists::new();
        match device::enumerate(&firmware) {
            Ok(devices) => {
                if let Err(err) = lists.name_devices(devices) {
                    warn!("failed to name disk devices: {err}");
                }
            }
            Err(err) if err.status() == Status::NOT_FOUND => {}
            Err(err) => warn!("failed to enumerate disk devices: {err}"),
        }
        info!(
            "found {} floppy, {} hard disk and {} CD-ROM drives",
            lists.floppies.len(),
            lists.hard_disks.len(),
            lists.cdroms.len()
        );
        Self {
            firmware,
            config,
            lists,
        }
    }

    /// Release every drive and give the firmware back.
    pub fn teardown(self) -> F {
        debug!("releasing disk devices");
        self.firmware
    }

    /// The configuration the context was created with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The firmware the drives were found on.
    #[must_use]
    pub const fn firmware(&self) -> &F {
        &self.firmware
    }

    /// Floppy drives, in drive number order.
    #[must_use]
    pub const fn floppies(&self) -> &DeviceList<F::DiskIo> {
        &self.lists.floppies
    }

    /// Hard disks, in drive number order.
    #[must_use]
    pub const fn hard_disks(&self) -> &DeviceList<F::DiskIo> {
        &self.lists.hard_disks
    }

    /// Optical drives. Only the first one has a drive number.
    #[must_use]
    pub const fn cdroms(&self) -> &DeviceList<F::DiskIo> {
        &self.lists.cdroms
    }

    /// The device behind drive number `drive`.
    #[must_use]
    pub fn device(&self, drive: u32) -> Option<&DiskDevice<F::DiskIo>> {
        let (class, index) = drive_slot(drive, &self.config)?;
        self.lists.list(class).get(index)
    }

    /// The device behind drive number `drive`, mutably.
    #[must_use]
    pub fn device_mut(&mut self, drive: u32) -> Option<&mut DiskDevice<F::DiskIo>> {
        let (class, index) = drive_slot(drive, &self.config)?;
        self.lists.list_mut(class).get_mut(index)
    }

    /// Geometry of drive `drive`.
    ///
    /// # Errors
    ///
    /// * [`Status::NOT_FOUND`] No such drive.
    pub fn geometry(&self, drive: u32) -> Result<Geometry> {
        let device = self.device(drive).ok_or(Status::NOT_FOUND)?;
        let mut flags = GeometryFlags::LBA_EXTENSION;
        if matches!(drive_slot(drive, &self.config), Some((DriveClass::Cdrom, _))) {
            flags |= GeometryFlags::CDROM;
        }
        Ok(Geometry::from_media(device.media(), flags))
    }

    /// Carry out a legacy disk request.
    ///
    /// `buffer` is read into for [`BiosDiskOp::READ`] and written from
    /// for [`BiosDiskOp::WRITE`].
    ///
    /// # Errors
    ///
    /// * [`Status::INVALID_PARAMETER`] `op` is neither a read nor a write.
    /// * Any error of [`read`](Self::read) or [`write`](Self::write).
    pub fn dispatch(
        &mut self,
        op: BiosDiskOp,
        drive: u32,
        sector: u64,
        count: u32,
        buffer: &mut [u8],
    ) -> Result {
        match op {
            BiosDiskOp::READ => self.read(drive, sector, count, buffer),
            BiosDiskOp::WRITE => self.write(drive, sector, count, buffer),
            _ => Err(Status::INVALID_PARAMETER.into()),
        }
    }

    /// Read `count` sectors of drive `drive`, starting at `sector`.
    ///
    /// # Errors
    ///
    /// * [`Status::NOT_FOUND`] No such drive.
    /// * Any error of [`DiskDevice::read_sectors`].
    pub fn read(&self, drive: u32, sector: u64, count: u32, buffer: &mut [u8]) -> Result {
        self.device(drive)
            .ok_or(Status::NOT_FOUND)?
            .read_sectors(sector, count, buffer)
    }

    /// Write `count` sectors of drive `drive`, starting at `sector`.
    ///
    /// # Errors
    ///
    /// * [`Status::NOT_FOUND`] No such drive.
    /// * Any error of [`DiskDevice::write_sectors`].
    pub fn write(&mut self, drive: u32, sector: u64, count: u32, buffer: &[u8]) -> Result {
        self.device_mut(drive)
            .ok_or(Status::NOT_FOUND)?
            .write_sectors(sector, count, buffer)
    }

    /// The firmware handle of partition `partition` of drive `drive`.
    ///
    /// See [`resolve::handle_for_drive_partition`].
    pub fn handle_for_drive_partition<W: PartitionWalker + ?Sized>(
        &self,
        drive: u32,
        partition: u32,
        walker: &mut W,
    ) -> Result<Handle> {
        resolve::handle_for_drive_partition(
            &self.firmware,
            &self.lists,
            &self.config,
            walker,
            drive,
            partition,
        )
    }

    /// The `(drive, partition)` pair naming `handle`.
    ///
    /// # Errors
    ///
    /// * [`Status::NOT_FOUND`] `handle` has no device path, or names
    ///   neither a drive nor a known partition.
    /// * [`Status::INVALID_PARAMETER`] The device path of `handle` is
    ///   malformed.
    /// * Any error of [`resolve::drive_partition_for_path`].
    pub fn drive_partition_for_handle<W: PartitionWalker + ?Sized>(
        &self,
        handle: Handle,
        walker: &mut W,
    ) -> Result<(u32, u32)> {
        let raw_path = self
            .firmware
            .device_path(handle)
            .ok_or(Status::NOT_FOUND)?;
        let path = DevicePath::from_bytes(raw_path)?;
        resolve::drive_partition_for_path(&self.firmware, &self.lists, &self.config, walker, path)
    }
}

impl<F: Firmware> Debug for DiskContext<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskContext")
            .field("config", &self.config)
            .field("floppies", &self.lists.floppies.len())
            .field("hard_disks", &self.lists.hard_disks.len())
            .field("cdroms", &self.lists.cdroms.len())
            .finish_non_exhaustive()
    }
}
