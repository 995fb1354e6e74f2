// SPDX-License-Identifier: MIT OR Apache-2.0

//! Utilities for creating new [`DevicePaths`].
//!
//! This module contains [`DevicePathBuilder`], as well as submodules
//! containing types for building the node types the disk layer cares
//! about.
//!
//! [`DevicePaths`]: DevicePath

use super::{DevicePath, DevicePathBuf, DevicePathError, DevicePathHeader, DevicePathNode};
use super::{DeviceSubType, DeviceType, HEADER_SIZE};
use alloc::vec::Vec;

/// A builder for [`DevicePaths`].
///
/// Nodes are added via the [`push`] method. To construct a node, use one
/// of the structs in these submodules:
/// * [`acpi`]
/// * [`hardware`]
/// * [`media`]
/// * [`messaging`]
///
/// A node can also be constructed by copying a node from an existing
/// device path.
///
/// To complete a path, call the [`finalize`] method. This adds an
/// [`END_ENTIRE`] node and returns the owned [`DevicePathBuf`].
///
/// [`DevicePaths`]: DevicePath
/// [`END_ENTIRE`]: DeviceSubType::END_ENTIRE
/// [`finalize`]: DevicePathBuilder::finalize
/// [`push`]: DevicePathBuilder::push
///
/// # Examples
///
/// ```
/// use efidisk::device_path::build;
///
/// # fn main() -> Result<(), efidisk::device_path::DevicePathError> {
/// let path = build::DevicePathBuilder::new()
///     .push(&build::acpi::Acpi {
///         hid: 0x41d0_0a03,
///         uid: 0x0000_0000,
///     })?
///     .push(&build::hardware::Pci {
///         function: 0x00,
///         device: 0x1f,
///     })?
///     .push(&build::messaging::Sata {
///         hba_port_number: 0,
///         port_multiplier_port_number: 0xffff,
///         logical_unit_number: 0,
///     })?
///     .finalize()?;
///
/// assert_eq!(path.node_iter().count(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct DevicePathBuilder {
    data: Vec<u8>,
}

impl DevicePathBuilder {
    /// Create an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a builder with room for `capacity` bytes of nodes.
    pub fn with_capacity(capacity: usize) -> Result<Self, DevicePathError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| DevicePathError::OutOfResources)?;
        Ok(Self { data })
    }

    /// Add a node to the device path.
    ///
    /// An error will be returned if an [`END_ENTIRE`] node is passed to
    /// this function, as that node will be added when `finalize` is
    /// called.
    ///
    /// [`END_ENTIRE`]: DeviceSubType::END_ENTIRE
    pub fn push(mut self, node: &dyn BuildNode) -> Result<Self, DevicePathError> {
        let (device_type, sub_type) = node.full_type();
        if (device_type, sub_type) == (DeviceType::END, DeviceSubType::END_ENTIRE) {
            return Err(DevicePathError::UnexpectedEnd);
        }
        self.push_unchecked(node)?;
        Ok(self)
    }

    fn push_unchecked(&mut self, node: &dyn BuildNode) -> Result<(), DevicePathError> {
        let (device_type, sub_type) = node.full_type();
        let node_size = HEADER_SIZE + node.payload_size();
        let length = u16::try_from(node_size).map_err(|_| DevicePathError::NodeTooLarge)?;

        self.data
            .try_reserve(node_size)
            .map_err(|_| DevicePathError::OutOfResources)?;
        let header = DevicePathHeader {
            device_type,
            sub_type,
            length,
        };
        self.data.extend_from_slice(&header.to_bytes());
        node.write_payload(&mut self.data);
        Ok(())
    }

    /// Add an [`END_ENTIRE`] node and return the resulting [`DevicePathBuf`].
    ///
    /// This method consumes the builder.
    ///
    /// [`END_ENTIRE`]: DeviceSubType::END_ENTIRE
    pub fn finalize(mut self) -> Result<DevicePathBuf, DevicePathError> {
        self.push_unchecked(&end::Entire)?;
        Ok(DevicePathBuf::from_validated(self.data.into_boxed_slice()))
    }
}

/// Trait that is implemented for all node types that can be pushed to a
/// [`DevicePathBuilder`].
pub trait BuildNode {
    /// Type and sub-type written to the node header.
    fn full_type(&self) -> (DeviceType, DeviceSubType);

    /// Size in bytes of the node data following the header.
    fn payload_size(&self) -> usize;

    /// Append exactly [`payload_size`](Self::payload_size) bytes to `out`.
    fn write_payload(&self, out: &mut Vec<u8>);
}

impl BuildNode for &DevicePathNode {
    fn full_type(&self) -> (DeviceType, DeviceSubType) {
        DevicePathNode::full_type(self)
    }

    fn payload_size(&self) -> usize {
        self.payload().len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.payload());
    }
}

impl DevicePath {
    /// Start a [`DevicePathBuilder`] pre-filled with the nodes of `self`.
    pub fn to_builder(&self) -> Result<DevicePathBuilder, DevicePathError> {
        let mut builder = DevicePathBuilder::with_capacity(self.len())?;
        for node in self.node_iter() {
            builder = builder.push(&node)?;
        }
        Ok(builder)
    }
}

/// Device path nodes for [`DeviceType::END`].
pub mod end {
    use super::*;

    /// Node marking the end of the entire path.
    #[derive(Clone, Copy, Debug)]
    pub struct Entire;

    impl BuildNode for Entire {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::END, DeviceSubType::END_ENTIRE)
        }

        fn payload_size(&self) -> usize {
            0
        }

        fn write_payload(&self, _out: &mut Vec<u8>) {}
    }
}

/// Device path nodes for [`DeviceType::ACPI`].
pub mod acpi {
    use super::*;

    /// ACPI device.
    #[derive(Clone, Copy, Debug)]
    pub struct Acpi {
        /// Device's PnP hardware ID stored in a numeric 32-bit compressed
        /// EISA-type ID.
        pub hid: u32,
        /// Unique ID that is required by ACPI if two devices have the same
        /// HID.
        pub uid: u32,
    }

    impl BuildNode for Acpi {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::ACPI, DeviceSubType::ACPI)
        }

        fn payload_size(&self) -> usize {
            8
        }

        fn write_payload(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.hid.to_le_bytes());
            out.extend_from_slice(&self.uid.to_le_bytes());
        }
    }
}

/// Device path nodes for [`DeviceType::HARDWARE`].
pub mod hardware {
    use super::*;

    /// PCI hardware device.
    #[derive(Clone, Copy, Debug)]
    pub struct Pci {
        /// PCI function number.
        pub function: u8,
        /// PCI device number.
        pub device: u8,
    }

    impl BuildNode for Pci {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::HARDWARE, DeviceSubType::HARDWARE_PCI)
        }

        fn payload_size(&self) -> usize {
            2
        }

        fn write_payload(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&[self.function, self.device]);
        }
    }
}

/// Device path nodes for [`DeviceType::MESSAGING`].
pub mod messaging {
    use super::*;

    /// ATAPI messaging device.
    #[derive(Clone, Copy, Debug)]
    pub struct Atapi {
        /// 0 for the primary channel, 1 for the secondary channel.
        pub primary_secondary: u8,
        /// 0 for the master device, 1 for the slave device.
        pub master_slave: u8,
        /// Logical Unit Number (LUN).
        pub logical_unit_number: u16,
    }

    impl BuildNode for Atapi {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::MESSAGING, DeviceSubType::MESSAGING_ATAPI)
        }

        fn payload_size(&self) -> usize {
            4
        }

        fn write_payload(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&[self.primary_secondary, self.master_slave]);
            out.extend_from_slice(&self.logical_unit_number.to_le_bytes());
        }
    }

    /// SATA messaging device.
    #[derive(Clone, Copy, Debug)]
    pub struct Sata {
        /// The HBA port number that facilitates the connection to the
        /// device or a port multiplier.
        pub hba_port_number: u16,
        /// The port multiplier port number, or `0xffff` if the device is
        /// directly connected to the HBA.
        pub port_multiplier_port_number: u16,
        /// Logical Unit Number (LUN).
        pub logical_unit_number: u16,
    }

    impl BuildNode for Sata {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::MESSAGING, DeviceSubType::MESSAGING_SATA)
        }

        fn payload_size(&self) -> usize {
            6
        }

        fn write_payload(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.hba_port_number.to_le_bytes());
            out.extend_from_slice(&self.port_multiplier_port_number.to_le_bytes());
            out.extend_from_slice(&self.logical_unit_number.to_le_bytes());
        }
    }
}

/// Device path nodes for [`DeviceType::MEDIA`].
pub mod media {
    use super::*;
    use crate::device_path::media::{CD_ROM_NODE_LENGTH, HARD_DRIVE_NODE_LENGTH};

    /// Hard drive partition.
    #[derive(Clone, Copy, Debug)]
    pub struct HardDrive {
        /// Index of the partition, starting from 1.
        pub partition_number: u32,
        /// Starting LBA of the partition.
        pub partition_start: u64,
        /// Size of the partition in blocks.
        pub partition_size: u64,
        /// Partition signature; its interpretation depends on
        /// `signature_type`.
        pub partition_signature: [u8; 16],
        /// 0x01 for MBR, 0x02 for GPT.
        pub partition_format: u8,
        /// 0x00 for none, 0x01 for an MBR signature, 0x02 for a GUID.
        pub signature_type: u8,
    }

    impl BuildNode for HardDrive {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::MEDIA, DeviceSubType::MEDIA_HARD_DRIVE)
        }

        fn payload_size(&self) -> usize {
            usize::from(HARD_DRIVE_NODE_LENGTH) - HEADER_SIZE
        }

        fn write_payload(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.partition_number.to_le_bytes());
            out.extend_from_slice(&self.partition_start.to_le_bytes());
            out.extend_from_slice(&self.partition_size.to_le_bytes());
            out.extend_from_slice(&self.partition_signature);
            out.extend_from_slice(&[self.partition_format, self.signature_type]);
        }
    }

    /// El Torito boot image on a CD-ROM.
    #[derive(Clone, Copy, Debug)]
    pub struct CdRom {
        /// Boot entry number from the boot catalog.
        pub boot_entry: u32,
        /// Starting RBA of the image.
        pub partition_start: u64,
        /// Size of the image in blocks.
        pub partition_size: u64,
    }

    impl BuildNode for CdRom {
        fn full_type(&self) -> (DeviceType, DeviceSubType) {
            (DeviceType::MEDIA, DeviceSubType::MEDIA_CD_ROM)
        }

        fn payload_size(&self) -> usize {
            usize::from(CD_ROM_NODE_LENGTH) - HEADER_SIZE
        }

        fn write_payload(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.boot_entry.to_le_bytes());
            out.extend_from_slice(&self.partition_start.to_le_bytes());
            out.extend_from_slice(&self.partition_size.to_le_bytes());
        }
    }
}
