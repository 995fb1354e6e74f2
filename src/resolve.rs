// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation between firmware handles and `(drive, partition)` pairs.
//!
//! Whole drives are found in the drive lists directly. Partitions are not
//! drives and are never listed; they are found by enumerating the
//! firmware's devices again and looking for *children* of a listed hard
//! disk. The device path of a partition is the path of its disk plus one
//! hard drive node, which carries the partition's start and size. Those
//! are matched against the [`PartitionWalker`] to get from a child device
//! to a legacy partition number and back.
//!
//! Every enumeration made here lives only for the duration of the call.

use crate::classify::{DriveClass, DriveLists};
use crate::device::{self, DiskDevice};
use crate::device_path::compare::paths_equal;
use crate::device_path::{DevicePath, DeviceSubType, DeviceType, HEADER_SIZE};
use crate::drive::{drive_number, drive_slot, WHOLE_DISK};
use crate::firmware::{Firmware, PartitionWalker};
use crate::partition::{self, PartitionDescriptor};
use crate::{Config, Handle, Result, Status};
use log::debug;

/// True if `candidate`'s path is `parent`'s path plus exactly one node.
///
/// This is the same as cutting the leaf off `candidate`'s path and
/// comparing the result with `parent`'s path, without the copy.
#[must_use]
pub fn is_child<P, C>(parent: &DiskDevice<P>, candidate: &DiskDevice<C>) -> bool {
    let parent = parent.path().as_bytes();
    let prefix = &candidate.path().as_bytes()[..candidate.leaf_offset()];
    prefix == &parent[..parent.len() - HEADER_SIZE]
}

/// The first child of `parent` among `devices` for which `predicate`
/// holds.
pub fn find_child_matching<'a, P, C>(
    devices: &'a [DiskDevice<C>],
    parent: &DiskDevice<P>,
    mut predicate: impl FnMut(&DiskDevice<C>) -> bool,
) -> Option<&'a DiskDevice<C>> {
    devices
        .iter()
        .filter(|candidate| is_child(parent, *candidate))
        .find(|child| predicate(*child))
}

/// The `(drive, partition)` pair naming the device with path `path`.
///
/// `path` is cut at its first CD-ROM media node, so an El Torito boot
/// image resolves to the optical drive it lives on. A path naming a whole
/// drive resolves with partition [`WHOLE_DISK`].
///
/// # Errors
///
/// * [`Status::NOT_FOUND`] `path` is neither a drive nor a partition of a
///   hard disk known to the walker.
/// * Any error of [`device::enumerate`] or of the walker.
pub fn drive_partition_for_path<F, W>(
    firmware: &F,
    lists: &DriveLists<F::DiskIo>,
    config: &Config,
    walker: &mut W,
    path: &DevicePath,
) -> Result<(u32, u32)>
where
    F: Firmware,
    W: PartitionWalker + ?Sized,
{
    let target = path.truncate_at((DeviceType::MEDIA, DeviceSubType::MEDIA_CD_ROM))?;

    if let Some(cdrom) = lists.cdroms.get(0) {
        if paths_equal(cdrom.path(), &target) {
            return Ok((config.cdrom_drive(), WHOLE_DISK));
        }
    }
    for class in [DriveClass::HardDisk, DriveClass::Floppy] {
        if let Some(index) = lists.list(class).position_of(&target) {
            let drive = drive_number(class, index, config).ok_or(Status::NOT_FOUND)?;
            return Ok((drive, WHOLE_DISK));
        }
    }

    let (index, descriptor) = {
        let devices = device::enumerate(firmware)?;
        lists
            .hard_disks
            .iter()
            .enumerate()
            .find_map(|(index, disk)| {
                let child = find_child_matching(&devices, disk, |child| {
                    paths_equal(child.path(), &target)
                        && child.leaf().as_hard_drive().is_some()
                })?;
                Some((index, PartitionDescriptor::from_node(child.leaf())?))
            })
            .ok_or(Status::NOT_FOUND)?
    };

    let drive = drive_number(DriveClass::HardDisk, index, config).ok_or(Status::NOT_FOUND)?;
    let entry = partition::partition_by_descriptor(walker, drive, &descriptor)?
        .ok_or(Status::NOT_FOUND)?;
    debug!("{descriptor:?} is partition {} of drive {drive:#x}", entry.index);
    Ok((drive, entry.index))
}

/// The handle of partition `partition` of drive `drive`.
///
/// For floppies and the CD-ROM the drive's own handle is returned whatever
/// `partition` is; so is a hard disk's for [`WHOLE_DISK`].
///
/// # Errors
///
/// * [`Status::NOT_FOUND`] No such drive, or the walker or the firmware do
///   not know the partition.
/// * Any error of [`device::enumerate`] or of the walker.
pub fn handle_for_drive_partition<F, W>(
    firmware: &F,
    lists: &DriveLists<F::DiskIo>,
    config: &Config,
    walker: &mut W,
    drive: u32,
    partition: u32,
) -> Result<Handle>
where
    F: Firmware,
    W: PartitionWalker + ?Sized,
{
    let (class, index) = drive_slot(drive, config).ok_or(Status::NOT_FOUND)?;
    let disk = lists.list(class).get(index).ok_or(Status::NOT_FOUND)?;
    if class != DriveClass::HardDisk || partition == WHOLE_DISK {
        return Ok(disk.handle());
    }

    let target = partition::partition_by_index(walker, drive, partition)?
        .ok_or(Status::NOT_FOUND)?
        .descriptor();
    let devices = device::enumerate(firmware)?;
    find_child_matching(&devices, disk, |child| {
        PartitionDescriptor::from_node(child.leaf()) == Some(target)
    })
    .map(DiskDevice::handle)
    .ok_or_else(|| Status::NOT_FOUND.into())
}
