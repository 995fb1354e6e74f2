// SPDX-License-Identifier: MIT OR Apache-2.0

//! Disk devices and their enumeration.

use crate::device_path::{DevicePath, DevicePathBuf, DevicePathNode, HEADER_SIZE};
use crate::firmware::{Firmware, DISK_IO_GUID};
use crate::media::BlockIoMedia;
use crate::{Handle, Result, Status};
use alloc::vec::Vec;
use log::{debug, warn};

/// A handle supporting Disk I/O, together with everything the disk layer
/// needs to know about it.
///
/// The device owns a copy of its device path. The leaf node is stored as a
/// byte offset into that copy, so it can never outlive the path.
#[derive(Debug)]
pub struct DiskDevice<D> {
    handle: Handle,
    path: DevicePathBuf,
    leaf_offset: usize,
    media: BlockIoMedia,
    disk_io: D,
}

impl<D> DiskDevice<D> {
    /// Create a device record. Returns `None` if `path` is empty, since
    /// a device without a leaf node cannot be classified or matched.
    #[must_use]
    pub fn new(handle: Handle, path: DevicePathBuf, media: BlockIoMedia, disk_io: D) -> Option<Self> {
        let leaf_offset = path.leaf_offset()?;
        Some(Self {
            handle,
            path,
            leaf_offset,
            media,
            disk_io,
        })
    }

    /// The firmware handle of the device.
    #[must_use]
    pub const fn handle(&self) -> Handle {
        self.handle
    }

    /// The device's full path.
    #[must_use]
    pub fn path(&self) -> &DevicePath {
        &self.path
    }

    /// Byte offset of the leaf node within [`path`](Self::path).
    #[must_use]
    pub const fn leaf_offset(&self) -> usize {
        self.leaf_offset
    }

    /// The leaf node.
    #[must_use]
    pub fn leaf(&self) -> &DevicePathNode {
        // The leaf is always directly followed by the end-entire node.
        let bytes = self.path.as_bytes();
        DevicePathNode::from_checked_bytes(&bytes[self.leaf_offset..bytes.len() - HEADER_SIZE])
    }

    /// The leaf node followed by the end-entire node, as a path of its own.
    #[must_use]
    pub fn leaf_path(&self) -> &DevicePath {
        DevicePath::from_checked_bytes(&self.path.as_bytes()[self.leaf_offset..])
    }

    /// Media parameters captured when the device was enumerated.
    #[must_use]
    pub const fn media(&self) -> &BlockIoMedia {
        &self.media
    }

    /// The device's Disk I/O protocol.
    #[must_use]
    pub const fn disk_io(&self) -> &D {
        &self.disk_io
    }

    /// The device's Disk I/O protocol, mutably.
    #[must_use]
    pub fn disk_io_mut(&mut self) -> &mut D {
        &mut self.disk_io
    }
}

/// Build a [`DiskDevice`] for every handle that supports Disk I/O.
///
/// Handles are visited in reverse of the order the firmware reported them
/// in, so the last reported handle comes first in the result. Handles
/// without a usable device path, or on which Block I/O or Disk I/O cannot
/// be opened, are skipped with a warning.
///
/// # Errors
///
/// * [`Status::NOT_FOUND`] No handle supports Disk I/O.
/// * [`Status::OUT_OF_RESOURCES`] A device record or path copy could not be
///   allocated. Everything built so far is released.
pub fn enumerate<F: Firmware>(firmware: &F) -> Result<Vec<DiskDevice<F::DiskIo>>> {
    let handles = firmware.locate_handles(&DISK_IO_GUID)?;

    let mut devices = Vec::new();
    devices
        .try_reserve_exact(handles.len())
        .map_err(|_| Status::OUT_OF_RESOURCES)?;

    for handle in handles.into_iter().rev() {
        let Some(raw_path) = firmware.device_path(handle) else {
            warn!("{handle:?}: no device path");
            continue;
        };
        let path = match DevicePath::from_bytes(raw_path) {
            Ok(path) => path,
            Err(err) => {
                warn!("{handle:?}: {err}");
                continue;
            }
        };
        if path.is_empty() {
            warn!("{handle:?}: empty device path");
            continue;
        }
        let Some(media) = firmware.open_block_io(handle) else {
            warn!("{handle:?}: cannot open block I/O");
            continue;
        };
        let Some(disk_io) = firmware.open_disk_io(handle) else {
            warn!("{handle:?}: cannot open disk I/O");
            continue;
        };

        let Some(device) = DiskDevice::new(handle, path.duplicate()?, media, disk_io) else {
            continue;
        };
        debug!(
            "{handle:?}: leaf {:?}, block size {}, last block {}, read-only: {}",
            device.leaf().full_type(),
            media.block_size(),
            media.last_block(),
            media.is_read_only()
        );
        devices.push(device);
    }

    Ok(devices)
}
