// SPDX-License-Identifier: MIT OR Apache-2.0

//! Views of [`DeviceType::MEDIA`] nodes.
//!
//! Only the fields the disk layer matches on are decoded; the node data
//! is read in place, little-endian, from its fixed offsets.

use super::{DevicePathNode, DeviceSubType, DeviceType};

/// Length of a hard drive media node, header included.
pub const HARD_DRIVE_NODE_LENGTH: u16 = 42;

/// Length of a CD-ROM media node, header included.
pub const CD_ROM_NODE_LENGTH: u16 = 24;

fn read_u32(node: &DevicePathNode, offset: usize) -> u32 {
    let mut bytes = [0; 4];
    bytes.copy_from_slice(&node.as_bytes()[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn read_u64(node: &DevicePathNode, offset: usize) -> u64 {
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&node.as_bytes()[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

/// Hard drive partition node, the leaf of every partition's path.
#[derive(Clone, Copy, Debug)]
pub struct HardDrive<'a>(&'a DevicePathNode);

impl<'a> HardDrive<'a> {
    pub(super) fn try_from_node(node: &'a DevicePathNode) -> Option<Self> {
        (node.full_type() == (DeviceType::MEDIA, DeviceSubType::MEDIA_HARD_DRIVE)
            && node.length() == HARD_DRIVE_NODE_LENGTH)
            .then_some(Self(node))
    }

    /// Index of the partition, starting from 1.
    #[must_use]
    pub fn partition_number(&self) -> u32 {
        read_u32(self.0, 4)
    }

    /// Starting LBA of the partition.
    #[must_use]
    pub fn partition_start(&self) -> u64 {
        read_u64(self.0, 8)
    }

    /// Size of the partition in blocks.
    #[must_use]
    pub fn partition_size(&self) -> u64 {
        read_u64(self.0, 16)
    }

    /// Raw partition signature.
    #[must_use]
    pub fn partition_signature(&self) -> &'a [u8] {
        &self.0.as_bytes()[24..40]
    }

    /// 0x01 for MBR, 0x02 for GPT.
    #[must_use]
    pub fn partition_format(&self) -> u8 {
        self.0.as_bytes()[40]
    }

    /// 0x00 for none, 0x01 for an MBR signature, 0x02 for a GUID.
    #[must_use]
    pub fn signature_type(&self) -> u8 {
        self.0.as_bytes()[41]
    }
}

/// El Torito boot image node.
#[derive(Clone, Copy, Debug)]
pub struct CdRom<'a>(&'a DevicePathNode);

impl<'a> CdRom<'a> {
    pub(super) fn try_from_node(node: &'a DevicePathNode) -> Option<Self> {
        (node.full_type() == (DeviceType::MEDIA, DeviceSubType::MEDIA_CD_ROM)
            && node.length() == CD_ROM_NODE_LENGTH)
            .then_some(Self(node))
    }

    /// Boot entry number from the boot catalog.
    #[must_use]
    pub fn boot_entry(&self) -> u32 {
        read_u32(self.0, 4)
    }

    /// Starting RBA of the image.
    #[must_use]
    pub fn partition_start(&self) -> u64 {
        read_u64(self.0, 8)
    }

    /// Size of the image in blocks.
    #[must_use]
    pub fn partition_size(&self) -> u64 {
        read_u64(self.0, 16)
    }
}
