// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sorted, duplicate-free lists of disk devices.
//!
//! A drive number is a position in one of these lists, so the order in
//! which devices are kept must not depend on the order the firmware
//! reports them in. Devices are ordered by their leaf node first and by
//! their full path second, both under [`compare`].

use crate::device::DiskDevice;
use crate::device_path::compare::compare;
use crate::device_path::DevicePath;
use crate::{Result, Status};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::slice;

/// Order of two devices within a [`DeviceList`].
///
/// Returns [`Ordering::Equal`] only if the full paths are equal.
#[must_use]
pub fn device_order<A, B>(a: &DiskDevice<A>, b: &DiskDevice<B>) -> Ordering {
    compare(a.leaf_path(), b.leaf_path()).then_with(|| compare(a.path(), b.path()))
}

/// A list of devices sorted by [`device_order`], holding at most one
/// device per path.
#[derive(Debug)]
pub struct DeviceList<D> {
    devices: Vec<DiskDevice<D>>,
}

impl<D> DeviceList<D> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Insert `device` at its sorted position.
    ///
    /// Returns `Ok(false)` and drops `device` if a device with the same
    /// path is already in the list.
    ///
    /// # Errors
    ///
    /// * [`Status::OUT_OF_RESOURCES`] The list could not grow.
    pub fn insert(&mut self, device: DiskDevice<D>) -> Result<bool> {
        let index = self
            .devices
            .iter()
            .position(|existing| device_order(existing, &device) != Ordering::Less)
            .unwrap_or(self.devices.len());

        if let Some(existing) = self.devices.get(index) {
            if device_order(existing, &device) == Ordering::Equal {
                return Ok(false);
            }
        }

        self.devices
            .try_reserve(1)
            .map_err(|_| Status::OUT_OF_RESOURCES)?;
        self.devices.insert(index, device);
        Ok(true)
    }

    /// The device at position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DiskDevice<D>> {
        self.devices.get(index)
    }

    /// The device at position `index`, mutably.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut DiskDevice<D>> {
        self.devices.get_mut(index)
    }

    /// Position of the device whose full path equals `path`.
    #[must_use]
    pub fn position_of(&self, path: &DevicePath) -> Option<usize> {
        self.devices
            .iter()
            .position(|device| compare(device.path(), path) == Ordering::Equal)
    }

    /// Number of devices in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True if the list holds no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterate over the devices in order.
    pub fn iter(&self) -> slice::Iter<'_, DiskDevice<D>> {
        self.devices.iter()
    }
}

impl<D> Default for DeviceList<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, D> IntoIterator for &'a DeviceList<D> {
    type Item = &'a DiskDevice<D>;
    type IntoIter = slice::Iter<'a, DiskDevice<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
