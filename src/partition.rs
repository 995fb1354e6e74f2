// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partitions as seen by the partition table walker.
//!
//! Firmware describes a partition by a hard drive node in its device path;
//! legacy callers describe it by a drive number and a partition number.
//! The two are tied together by the partition's `(start, length)`, which
//! both the node and the [`PartitionWalker`] report.

use crate::device_path::DevicePathNode;
use crate::drive::WHOLE_DISK;
use crate::firmware::PartitionWalker;
use crate::Result;

/// Position and size of a partition, in blocks of its disk.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct PartitionDescriptor {
    /// First block of the partition.
    pub start: u64,
    /// Number of blocks in the partition.
    pub length: u64,
}

impl PartitionDescriptor {
    /// The descriptor stored in a hard drive node, or `None` if `node` is
    /// not a hard drive node.
    #[must_use]
    pub fn from_node(node: &DevicePathNode) -> Option<Self> {
        let hard_drive = node.as_hard_drive()?;
        Some(Self {
            start: hard_drive.partition_start(),
            length: hard_drive.partition_size(),
        })
    }
}

/// A partition reported by a [`PartitionWalker`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PartitionEntry {
    /// Legacy partition number.
    pub index: u32,
    /// Partition type. Zero marks an unused table slot.
    pub partition_type: u32,
    /// First block of the partition.
    pub start: u64,
    /// Number of blocks in the partition.
    pub length: u64,
}

impl PartitionEntry {
    /// Position and size of the partition.
    #[must_use]
    pub const fn descriptor(&self) -> PartitionDescriptor {
        PartitionDescriptor {
            start: self.start,
            length: self.length,
        }
    }

    /// True if the entry is a used slot describing `descriptor`.
    #[must_use]
    pub fn matches(&self, descriptor: &PartitionDescriptor) -> bool {
        self.partition_type != 0 && self.descriptor() == *descriptor
    }
}

/// Where a [`PartitionWalker`] stands within a drive's partition tables.
///
/// A fresh cursor starts before the first partition. Walkers own the
/// meaning of every field but `partition`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PartitionCursor {
    /// Number of the last partition returned, [`WHOLE_DISK`] before the
    /// first one.
    pub partition: u32,
    /// Sector of the table holding the last entry.
    pub table_offset: u64,
    /// Slot of the last entry within its table.
    pub entry: Option<u32>,
    /// Sector of the first extended partition table, if any.
    pub extended_offset: u64,
}

impl PartitionCursor {
    /// A cursor positioned before the first partition.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            partition: WHOLE_DISK,
            table_offset: 0,
            entry: None,
            extended_offset: 0,
        }
    }
}

impl Default for PartitionCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk the partitions of `drive` from the start and return the first one
/// for which `predicate` holds.
///
/// # Errors
///
/// Any error of [`PartitionWalker::next_partition`], unchanged.
pub fn find_partition<W: PartitionWalker + ?Sized>(
    walker: &mut W,
    drive: u32,
    mut predicate: impl FnMut(&PartitionEntry) -> bool,
) -> Result<Option<PartitionEntry>> {
    let mut cursor = PartitionCursor::new();
    while let Some(entry) = walker.next_partition(drive, &mut cursor)? {
        if predicate(&entry) {
            return Ok(Some(entry));
        }
    }
    Ok(None)
}

/// The used partition of `drive` numbered `index`.
pub fn partition_by_index<W: PartitionWalker + ?Sized>(
    walker: &mut W,
    drive: u32,
    index: u32,
) -> Result<Option<PartitionEntry>> {
    find_partition(walker, drive, |entry| {
        entry.partition_type != 0 && entry.index == index
    })
}

/// The first used partition of `drive` at the position and with the size
/// given by `descriptor`.
pub fn partition_by_descriptor<W: PartitionWalker + ?Sized>(
    walker: &mut W,
    drive: u32,
    descriptor: &PartitionDescriptor,
) -> Result<Option<PartitionEntry>> {
    find_partition(walker, drive, |entry| entry.matches(descriptor))
}
