// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory firmware used by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::rc::Rc;

use efidisk::device_path::build::{self, BuildNode, DevicePathBuilder};
use efidisk::device_path::{DevicePath, DevicePathBuf};
use efidisk::firmware::{Firmware, PartitionWalker, DISK_IO_GUID};
use efidisk::media::{BlockIoMedia, DiskIo};
use efidisk::partition::{PartitionCursor, PartitionEntry};
use efidisk::{Guid, Handle, Result, Status};

/// A disk backed by a shared byte vector.
///
/// Clones share the same bytes, failure switch and call counters, so a
/// test can keep a clone to inspect what the disk layer did.
#[derive(Clone, Debug)]
pub struct MemoryDisk {
    pub media_id: u32,
    pub bytes: Rc<RefCell<Vec<u8>>>,
    pub failure: Rc<Cell<Option<Status>>>,
    pub reads: Rc<Cell<usize>>,
    pub writes: Rc<Cell<usize>>,
}

impl MemoryDisk {
    /// A disk of `size` bytes where byte `i` holds `i % 251`.
    pub fn new(media_id: u32, size: usize) -> Self {
        Self {
            media_id,
            bytes: Rc::new(RefCell::new((0..size).map(|i| (i % 251) as u8).collect())),
            failure: Rc::new(Cell::new(None)),
            reads: Rc::new(Cell::new(0)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    fn range(&self, media_id: u32, offset: u64, len: usize) -> Result<std::ops::Range<usize>> {
        if let Some(status) = self.failure.get() {
            return Err(status.into());
        }
        if media_id != self.media_id {
            return Err(Status::MEDIA_CHANGED.into());
        }
        let start = usize::try_from(offset).map_err(|_| Status::INVALID_PARAMETER)?;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.bytes.borrow().len())
            .ok_or(Status::INVALID_PARAMETER)?;
        Ok(start..end)
    }
}

impl DiskIo for MemoryDisk {
    fn read_disk(&self, media_id: u32, offset: u64, buffer: &mut [u8]) -> Result {
        self.reads.set(self.reads.get() + 1);
        let range = self.range(media_id, offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes.borrow()[range]);
        Ok(())
    }

    fn write_disk(&mut self, media_id: u32, offset: u64, buffer: &[u8]) -> Result {
        self.writes.set(self.writes.get() + 1);
        let range = self.range(media_id, offset, buffer.len())?;
        self.bytes.borrow_mut()[range].copy_from_slice(buffer);
        Ok(())
    }
}

/// Everything installed on one mock handle.
#[derive(Debug)]
pub struct MockHandle {
    pub handle: Handle,
    pub path: Option<Vec<u8>>,
    pub media: Option<BlockIoMedia>,
    pub disk: Option<MemoryDisk>,
}

/// Firmware whose handles all claim to support Disk I/O.
#[derive(Debug, Default)]
pub struct MockFirmware {
    pub handles: Vec<MockHandle>,
}

impl MockFirmware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a handle with the given protocols and return it.
    pub fn add_raw(
        &mut self,
        path: Option<Vec<u8>>,
        media: Option<BlockIoMedia>,
        disk: Option<MemoryDisk>,
    ) -> Handle {
        let handle = handle(0x1000 + 0x10 * self.handles.len());
        self.handles.push(MockHandle {
            handle,
            path,
            media,
            disk,
        });
        handle
    }

    /// Install a working disk at `path`, backed by `disk`.
    pub fn add_disk(&mut self, path: &DevicePath, media: BlockIoMedia, disk: &MemoryDisk) -> Handle {
        self.add_raw(Some(path.as_bytes().to_vec()), Some(media), Some(disk.clone()))
    }

    fn find(&self, handle: Handle) -> Option<&MockHandle> {
        self.handles.iter().find(|entry| entry.handle == handle)
    }
}

impl Firmware for MockFirmware {
    type DiskIo = MemoryDisk;

    fn locate_handles(&self, protocol: &Guid) -> Result<Vec<Handle>> {
        assert_eq!(*protocol, DISK_IO_GUID);
        if self.handles.is_empty() {
            return Err(Status::NOT_FOUND.into());
        }
        Ok(self.handles.iter().map(|entry| entry.handle).collect())
    }

    fn device_path(&self, handle: Handle) -> Option<&[u8]> {
        self.find(handle)?.path.as_deref()
    }

    fn open_block_io(&self, handle: Handle) -> Option<BlockIoMedia> {
        self.find(handle)?.media
    }

    fn open_disk_io(&self, handle: Handle) -> Option<MemoryDisk> {
        self.find(handle)?.disk.clone()
    }
}

/// Partition tables keyed by drive number.
#[derive(Debug, Default)]
pub struct MockWalker {
    pub tables: Vec<(u32, Vec<PartitionEntry>)>,
    pub calls: usize,
}

impl MockWalker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, drive: u32, entries: &[PartitionEntry]) -> Self {
        self.tables.push((drive, entries.to_vec()));
        self
    }
}

impl PartitionWalker for MockWalker {
    fn next_partition(
        &mut self,
        drive: u32,
        cursor: &mut PartitionCursor,
    ) -> Result<Option<PartitionEntry>> {
        self.calls += 1;
        let Some((_, entries)) = self.tables.iter().find(|(d, _)| *d == drive) else {
            return Ok(None);
        };
        let slot = cursor.entry.map_or(0, |entry| entry + 1);
        let Some(entry) = entries.get(slot as usize) else {
            return Ok(None);
        };
        cursor.entry = Some(slot);
        cursor.partition = entry.index;
        Ok(Some(*entry))
    }
}

pub fn handle(value: usize) -> Handle {
    unsafe { Handle::from_ptr(value as *mut c_void) }.unwrap()
}

pub fn media(media_id: u32, block_size: u32, blocks: u64, read_only: bool) -> BlockIoMedia {
    BlockIoMedia::new(uefi_raw::protocol::block::BlockIoMedia {
        media_id,
        removable_media: read_only.into(),
        media_present: true.into(),
        logical_partition: false.into(),
        read_only: read_only.into(),
        write_caching: false.into(),
        block_size,
        io_align: 0,
        last_block: blocks - 1,
        lowest_aligned_lba: 0,
        logical_blocks_per_physical_block: 1,
        optimal_transfer_length_granularity: 0,
    })
}

pub fn path(nodes: &[&dyn BuildNode]) -> DevicePathBuf {
    nodes
        .iter()
        .fold(DevicePathBuilder::new(), |builder, node| {
            builder.push(*node).unwrap()
        })
        .finalize()
        .unwrap()
}

pub fn extend(parent: &DevicePath, node: &dyn BuildNode) -> DevicePathBuf {
    parent.to_builder().unwrap().push(node).unwrap().finalize().unwrap()
}

pub const ROOT: build::acpi::Acpi = build::acpi::Acpi {
    hid: 0x0a03_41d0,
    uid: 0,
};

pub fn pci(device: u8) -> build::hardware::Pci {
    build::hardware::Pci {
        function: 0,
        device,
    }
}

/// A SATA disk on port `port` of the controller at PCI device 0x1f.
pub fn sata_disk_path(port: u16) -> DevicePathBuf {
    path(&[
        &ROOT,
        &pci(0x1f),
        &build::messaging::Sata {
            hba_port_number: port,
            port_multiplier_port_number: 0xffff,
            logical_unit_number: 0,
        },
    ])
}

/// An ATAPI drive on the secondary channel of PCI device 1.
pub fn atapi_path() -> DevicePathBuf {
    path(&[
        &ROOT,
        &pci(1),
        &build::messaging::Atapi {
            primary_secondary: 1,
            master_slave: 0,
            logical_unit_number: 0,
        },
    ])
}

/// A floppy behind the ISA bridge.
pub fn floppy_path(uid: u32) -> DevicePathBuf {
    path(&[
        &ROOT,
        &pci(0x1f),
        &build::acpi::Acpi {
            hid: 0x0604_41d0,
            uid,
        },
    ])
}

pub fn hard_drive_node(number: u32, start: u64, size: u64) -> build::media::HardDrive {
    build::media::HardDrive {
        partition_number: number,
        partition_start: start,
        partition_size: size,
        partition_signature: [0x5a; 16],
        partition_format: 1,
        signature_type: 1,
    }
}

pub fn partition_entry(index: u32, partition_type: u32, start: u64, length: u64) -> PartitionEntry {
    PartitionEntry {
        index,
        partition_type,
        start,
        length,
    }
}
