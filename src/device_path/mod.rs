// SPDX-License-Identifier: MIT OR Apache-2.0

//! Device paths.
//!
//! A UEFI device path is a flexible structure for encoding a programmatic
//! path to a device such as a hard drive or one of its partitions.
//!
//! A device path is made up of a packed list of variable-length nodes of
//! various types. The entire device path is terminated with an
//! [`END_ENTIRE`] node. The node right before the terminator is the
//! *leaf* of the path; for disks it usually names the transport (SATA,
//! NVMe, USB...) and for partitions it is a [`media::HardDrive`] node.
//!
//! ```text
//! ┌──────┬─────┬──────┬────────────┬────────────┐
//! │ ACPI │ PCI │ SATA │ HARD_DRIVE │ END_ENTIRE │
//! └──────┴─────┴──────┴────────────┴────────────┘
//!                       ↑
//!                       └── leaf
//! ```
//!
//! # Types
//!
//! * [`DevicePath`] is a borrowed, validated device path. It can only be
//!   obtained through [`DevicePath::from_bytes`], which checks every
//!   node's declared length against the buffer it came from, or from a
//!   [`DevicePathBuf`].
//!
//! * [`DevicePathBuf`] is an owned copy of a device path, see
//!   [`DevicePath::duplicate`]. Paths handed out by the firmware are not
//!   guaranteed to outlive the call that returned them, so the disk layer
//!   keeps its own copies.
//!
//! * [`DevicePathNode`] is a single node within a path. The node's
//!   [`device_type`] and [`sub_type`] must be examined to determine what
//!   kind of data it contains.
//!
//! * [`DevicePathHeader`] is the four byte header present at the start of
//!   every node.
//!
//! Paths are compared with the functions in [`compare`] and built with the
//! [`build::DevicePathBuilder`].
//!
//! [`END_ENTIRE`]: DeviceSubType::END_ENTIRE
//! [`device_type`]: DevicePathNode::device_type
//! [`sub_type`]: DevicePathNode::sub_type

pub mod build;
pub mod compare;
pub mod media;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter};
use core::ops::Deref;

use crate::{Error, Status};

/// Size in bytes of a [`DevicePathHeader`].
pub const HEADER_SIZE: usize = 4;

/// Header that appears at the start of every [`DevicePathNode`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DevicePathHeader {
    /// Type of device
    pub device_type: DeviceType,
    /// Sub type of device
    pub sub_type: DeviceSubType,
    /// Size (in bytes) of the [`DevicePathNode`], including this header.
    pub length: u16,
}

impl DevicePathHeader {
    /// Header of an [`END_ENTIRE`](DeviceSubType::END_ENTIRE) node.
    pub const END_ENTIRE: Self = Self {
        device_type: DeviceType::END,
        sub_type: DeviceSubType::END_ENTIRE,
        length: HEADER_SIZE as u16,
    };

    /// Decode a header from the first four bytes of `bytes`.
    fn read(bytes: &[u8]) -> Option<Self> {
        match *bytes {
            [device_type, sub_type, len_lo, len_hi, ..] => Some(Self {
                device_type: DeviceType(device_type),
                sub_type: DeviceSubType(sub_type),
                length: u16::from_le_bytes([len_lo, len_hi]),
            }),
            _ => None,
        }
    }

    /// Encode the header in its on-disk (little-endian) form.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; HEADER_SIZE] {
        let [len_lo, len_hi] = self.length.to_le_bytes();
        [self.device_type.0, self.sub_type.0, len_lo, len_hi]
    }
}

/// A single node within a [`DevicePath`].
///
/// Each node starts with a [`DevicePathHeader`]. The rest of the data in
/// the node depends on the type of node. A node reference always covers
/// exactly [`length`](Self::length) bytes.
#[repr(transparent)]
pub struct DevicePathNode {
    data: [u8],
}

impl DevicePathNode {
    /// Reinterpret `bytes` as a node.
    ///
    /// The caller must have checked that `bytes` starts with a header whose
    /// length is exactly `bytes.len()`.
    pub(crate) fn from_checked_bytes(bytes: &[u8]) -> &Self {
        // SAFETY: `DevicePathNode` is a `repr(transparent)` wrapper around
        // `[u8]`, so the fat pointer metadata carries over unchanged.
        unsafe { &*(bytes as *const [u8] as *const Self) }
    }

    /// The node's header.
    #[must_use]
    pub fn header(&self) -> DevicePathHeader {
        DevicePathHeader {
            device_type: self.device_type(),
            sub_type: self.sub_type(),
            length: self.length(),
        }
    }

    /// Type of device
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        DeviceType(self.data[0])
    }

    /// Sub type of device
    #[must_use]
    pub fn sub_type(&self) -> DeviceSubType {
        DeviceSubType(self.data[1])
    }

    /// Tuple of the node's type and subtype.
    #[must_use]
    pub fn full_type(&self) -> (DeviceType, DeviceSubType) {
        (self.device_type(), self.sub_type())
    }

    /// Size (in bytes) of the full [`DevicePathNode`], including the header.
    #[must_use]
    pub fn length(&self) -> u16 {
        u16::from_le_bytes([self.data[2], self.data[3]])
    }

    /// True if this node ends an entire [`DevicePath`].
    #[must_use]
    pub fn is_end_entire(&self) -> bool {
        self.full_type() == (DeviceType::END, DeviceSubType::END_ENTIRE)
    }

    /// The node data following the header.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.data[HEADER_SIZE..]
    }

    /// The whole node, header included.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// View this node as a [`media::HardDrive`] node, if it is one.
    #[must_use]
    pub fn as_hard_drive(&self) -> Option<media::HardDrive<'_>> {
        media::HardDrive::try_from_node(self)
    }

    /// View this node as a [`media::CdRom`] node, if it is one.
    #[must_use]
    pub fn as_cd_rom(&self) -> Option<media::CdRom<'_>> {
        media::CdRom::try_from_node(self)
    }
}

impl PartialEq for DevicePathNode {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for DevicePathNode {}

impl Debug for DevicePathNode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("DevicePathNode")
            .field("header", &self.header())
            .field("data", &self.payload())
            .finish()
    }
}

/// A validated device path, ending with an [`END_ENTIRE`] node.
///
/// See the [module-level documentation] for more details.
///
/// [module-level documentation]: crate::device_path
/// [`END_ENTIRE`]: DeviceSubType::END_ENTIRE
#[repr(transparent)]
pub struct DevicePath {
    data: [u8],
}

impl DevicePath {
    /// Validate the device path at the start of `bytes`.
    ///
    /// Nodes are walked from the start of the buffer. Each node's declared
    /// length must cover at least its header and must not run past the end
    /// of `bytes`. The walk stops at the first [`END_ENTIRE`] node, which
    /// must be a bare header; any trailing bytes after it are not part of
    /// the returned path.
    ///
    /// [`END_ENTIRE`]: DeviceSubType::END_ENTIRE
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self, DevicePathError> {
        let size = Self::size_in_bytes(bytes)?;
        Ok(Self::from_checked_bytes(&bytes[..size]))
    }

    /// Walk the nodes of `bytes` and return the size of the path including
    /// the end-entire node.
    fn size_in_bytes(bytes: &[u8]) -> Result<usize, DevicePathError> {
        let mut offset = 0;
        loop {
            let header = DevicePathHeader::read(&bytes[offset..])
                .ok_or(DevicePathError::TruncatedHeader { offset })?;
            let length = header.length;
            let node_size = usize::from(length);
            if node_size < HEADER_SIZE {
                return Err(DevicePathError::LengthTooSmall { offset, length });
            }
            if node_size > bytes.len() - offset {
                return Err(DevicePathError::NodeOutOfBounds { offset, length });
            }
            if (header.device_type, header.sub_type) == (DeviceType::END, DeviceSubType::END_ENTIRE)
            {
                if node_size != HEADER_SIZE {
                    return Err(DevicePathError::EndNodeLength { offset, length });
                }
                return Ok(offset + node_size);
            }
            offset += node_size;
        }
    }

    pub(crate) fn from_checked_bytes(bytes: &[u8]) -> &Self {
        // SAFETY: `DevicePath` is a `repr(transparent)` wrapper around
        // `[u8]`, so the fat pointer metadata carries over unchanged.
        unsafe { &*(bytes as *const [u8] as *const Self) }
    }

    /// The raw bytes of the path, end-entire node included.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Total size of the path in bytes, end-entire node included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the path consists of nothing but the end-entire node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == HEADER_SIZE
    }

    /// Get an iterator over the [`DevicePathNode`]s of this path. The
    /// end-entire node is not returned by the iterator.
    #[must_use]
    pub fn node_iter(&self) -> DevicePathNodeIterator<'_> {
        DevicePathNodeIterator {
            nodes: &self.data,
            offset: 0,
            stop_condition: StopCondition::EndEntireNode,
        }
    }

    /// Get an iterator over all nodes of this path, the end-entire node
    /// included.
    #[must_use]
    pub fn all_nodes_iter(&self) -> DevicePathNodeIterator<'_> {
        DevicePathNodeIterator {
            nodes: &self.data,
            offset: 0,
            stop_condition: StopCondition::NoMoreNodes,
        }
    }

    /// Byte offset of the leaf node, the node right before the end-entire
    /// node. Returns `None` for an empty path.
    #[must_use]
    pub fn leaf_offset(&self) -> Option<usize> {
        self.node_iter().offsets().last()
    }

    /// The node right before the end-entire node, or `None` if the path is
    /// empty.
    #[must_use]
    pub fn leaf(&self) -> Option<&DevicePathNode> {
        self.node_iter().last()
    }

    /// The sub-path starting at the node at byte `offset`.
    ///
    /// Returns `None` unless `offset` is the start of a node of this path.
    #[must_use]
    pub fn suffix(&self, offset: usize) -> Option<&DevicePath> {
        self.all_nodes_iter()
            .offsets()
            .find(|&node_offset| node_offset == offset)
            .map(|offset| Self::from_checked_bytes(&self.data[offset..]))
    }

    /// Copy the path into a newly allocated [`DevicePathBuf`] of exactly
    /// [`len`](Self::len) bytes.
    ///
    /// Fails with [`DevicePathError::OutOfResources`] if the memory cannot
    /// be obtained.
    pub fn duplicate(&self) -> Result<DevicePathBuf, DevicePathError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| DevicePathError::OutOfResources)?;
        data.extend_from_slice(&self.data);
        Ok(DevicePathBuf(data.into_boxed_slice()))
    }

    /// Copy of this path with the leaf node removed.
    ///
    /// The copy is exactly one node shorter: the leaf is replaced by the
    /// end-entire node. Returns `Ok(None)` for an empty path.
    pub fn truncate_leaf(&self) -> Result<Option<DevicePathBuf>, DevicePathError> {
        let node_count = self.node_iter().count();
        if node_count == 0 {
            return Ok(None);
        }
        self.copy_nodes(self.node_iter().take(node_count - 1))
            .map(Some)
    }

    /// Copy of this path truncated at the first node of type `full_type`.
    ///
    /// That node and everything after it are replaced by the end-entire
    /// node. If no node matches, the copy is identical to `self`.
    pub fn truncate_at(
        &self,
        full_type: (DeviceType, DeviceSubType),
    ) -> Result<DevicePathBuf, DevicePathError> {
        self.copy_nodes(
            self.node_iter()
                .take_while(|node| node.full_type() != full_type),
        )
    }

    fn copy_nodes<'a>(
        &self,
        nodes: impl Iterator<Item = &'a DevicePathNode>,
    ) -> Result<DevicePathBuf, DevicePathError> {
        let mut builder = build::DevicePathBuilder::with_capacity(self.data.len())?;
        for node in nodes {
            builder = builder.push(&node)?;
        }
        builder.finalize()
    }
}

impl PartialEq for DevicePath {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for DevicePath {}

impl Debug for DevicePath {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.node_iter()).finish()
    }
}

impl AsRef<DevicePath> for DevicePath {
    fn as_ref(&self) -> &DevicePath {
        self
    }
}

/// An owned [`DevicePath`].
#[derive(Clone, Eq, PartialEq)]
pub struct DevicePathBuf(Box<[u8]>);

impl DevicePathBuf {
    /// Wrap bytes that are known to hold exactly one valid device path.
    pub(crate) fn from_validated(data: Box<[u8]>) -> Self {
        debug_assert_eq!(DevicePath::size_in_bytes(&data), Ok(data.len()));
        Self(data)
    }
}

impl Deref for DevicePathBuf {
    type Target = DevicePath;

    fn deref(&self) -> &DevicePath {
        DevicePath::from_checked_bytes(&self.0)
    }
}

impl AsRef<DevicePath> for DevicePathBuf {
    fn as_ref(&self) -> &DevicePath {
        self
    }
}

impl Debug for DevicePathBuf {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&**self, f)
    }
}

#[derive(Clone, Copy, Debug)]
enum StopCondition {
    EndEntireNode,
    NoMoreNodes,
}

/// Iterator over [`DevicePathNode`]s.
///
/// This struct is returned by [`DevicePath::node_iter`] and
/// [`DevicePath::all_nodes_iter`].
#[derive(Debug)]
pub struct DevicePathNodeIterator<'a> {
    nodes: &'a [u8],
    offset: usize,
    stop_condition: StopCondition,
}

impl<'a> DevicePathNodeIterator<'a> {
    /// Turn this into an iterator over the byte offsets of the nodes
    /// instead of the nodes themselves.
    fn offsets(self) -> impl Iterator<Item = usize> + 'a {
        let mut iter = self;
        core::iter::from_fn(move || {
            let offset = iter.offset;
            iter.next().map(|_| offset)
        })
    }
}

impl<'a> Iterator for DevicePathNodeIterator<'a> {
    type Item = &'a DevicePathNode;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.nodes[self.offset..];
        let header = DevicePathHeader::read(rest)?;
        let node = DevicePathNode::from_checked_bytes(&rest[..usize::from(header.length)]);

        // Check if an early stop condition has been reached.
        if node.is_end_entire() {
            // Clear the remaining node data so that future calls to
            // next() immediately return `None`.
            self.offset = self.nodes.len();
            match self.stop_condition {
                StopCondition::EndEntireNode => None,
                StopCondition::NoMoreNodes => Some(node),
            }
        } else {
            self.offset += node.as_bytes().len();
            Some(node)
        }
    }
}

newtype_enum! {
/// Type identifier for a DevicePath
pub enum DeviceType: u8 => {
    /// Hardware Device Path.
    ///
    /// This Device Path defines how a device is attached to the resource domain of a system, where resource domain is
    /// simply the shared memory, memory mapped I/ O, and I/O space of the system.
    HARDWARE = 0x01,
    /// ACPI Device Path.
    ///
    /// This Device Path is used to describe devices whose enumeration is not described in an industry-standard fashion.
    /// A disk whose leaf is an ACPI node is named as a floppy drive.
    ACPI = 0x02,
    /// Messaging Device Path.
    ///
    /// This Device Path is used to describe the connection of devices outside the resource domain of the system.
    /// A disk whose leaf is a messaging node is named as a hard disk or CD-ROM drive.
    MESSAGING = 0x03,
    /// Media Device Path.
    ///
    /// This Device Path is used to describe the portion of a medium that is being abstracted by a boot service.
    /// For example, a Media Device Path could define which partition on a hard drive was being used.
    MEDIA = 0x04,
    /// BIOS Boot Specification Device Path.
    BIOS_BOOT_SPEC = 0x05,
    /// End of Hardware Device Path.
    ///
    /// Depending on the Sub-Type, this Device Path node is used to indicate the end of the Device Path instance or
    /// Device Path structure.
    END = 0x7F,
}}

/// Sub-type identifier for a DevicePath
///
/// Sub-type values are only meaningful together with a [`DeviceType`], so
/// the same value appears under several names below.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DeviceSubType(pub u8);

impl DeviceSubType {
    /// PCI Device Path.
    pub const HARDWARE_PCI: DeviceSubType = DeviceSubType(1);
    /// Vendor-Defined Device Path.
    pub const HARDWARE_VENDOR: DeviceSubType = DeviceSubType(4);
    /// Controller Device Path.
    pub const HARDWARE_CONTROLLER: DeviceSubType = DeviceSubType(5);

    /// ACPI Device Path.
    pub const ACPI: DeviceSubType = DeviceSubType(1);
    /// Expanded ACPI Device Path.
    pub const ACPI_EXPANDED: DeviceSubType = DeviceSubType(2);

    /// ATAPI Device Path.
    pub const MESSAGING_ATAPI: DeviceSubType = DeviceSubType(1);
    /// SCSI Device Path.
    pub const MESSAGING_SCSI: DeviceSubType = DeviceSubType(2);
    /// USB Device Path.
    pub const MESSAGING_USB: DeviceSubType = DeviceSubType(5);
    /// SATA Device Path.
    pub const MESSAGING_SATA: DeviceSubType = DeviceSubType(18);
    /// NVM Express Namespace Device Path.
    pub const MESSAGING_NVME_NAMESPACE: DeviceSubType = DeviceSubType(23);

    /// Hard Drive Media Device Path.
    pub const MEDIA_HARD_DRIVE: DeviceSubType = DeviceSubType(1);
    /// CD-ROM Media Device Path.
    pub const MEDIA_CD_ROM: DeviceSubType = DeviceSubType(2);
    /// Vendor-Defined Media Device Path.
    pub const MEDIA_VENDOR: DeviceSubType = DeviceSubType(3);
    /// File Path Media Device Path.
    pub const MEDIA_FILE_PATH: DeviceSubType = DeviceSubType(4);

    /// End this instance of a Device Path and start a new one.
    pub const END_INSTANCE: DeviceSubType = DeviceSubType(0x01);
    /// End entire Device Path.
    pub const END_ENTIRE: DeviceSubType = DeviceSubType(0xff);
}

/// Errors from reading or copying a device path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DevicePathError {
    /// Fewer than four bytes remain where a node header should start.
    TruncatedHeader {
        /// Byte offset of the node.
        offset: usize,
    },

    /// A node declares a length smaller than its own header.
    LengthTooSmall {
        /// Byte offset of the node.
        offset: usize,
        /// The declared length.
        length: u16,
    },

    /// A node declares a length that runs past the end of the buffer.
    NodeOutOfBounds {
        /// Byte offset of the node.
        offset: usize,
        /// The declared length.
        length: u16,
    },

    /// The end-entire node carries a payload.
    EndNodeLength {
        /// Byte offset of the node.
        offset: usize,
        /// The declared length.
        length: u16,
    },

    /// A node is too large to be described by a 16-bit length.
    NodeTooLarge,

    /// An end-entire node was pushed to a [`DevicePathBuilder`]; it is
    /// added by [`finalize`] instead.
    ///
    /// [`DevicePathBuilder`]: build::DevicePathBuilder
    /// [`finalize`]: build::DevicePathBuilder::finalize
    UnexpectedEnd,

    /// Memory for a copy of the path could not be obtained.
    OutOfResources,
}

impl Display for DevicePathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader { offset } => {
                write!(f, "device path ends inside the node header at offset {offset}")
            }
            Self::LengthTooSmall { offset, length } => {
                write!(f, "device path node at offset {offset} has length {length}")
            }
            Self::NodeOutOfBounds { offset, length } => write!(
                f,
                "device path node at offset {offset} with length {length} exceeds the buffer"
            ),
            Self::EndNodeLength { offset, length } => write!(
                f,
                "end-entire node at offset {offset} has length {length} instead of {HEADER_SIZE}"
            ),
            Self::NodeTooLarge => write!(f, "device path node is too large"),
            Self::UnexpectedEnd => write!(f, "end-entire node pushed to a device path builder"),
            Self::OutOfResources => write!(f, "out of memory copying a device path"),
        }
    }
}

impl core::error::Error for DevicePathError {}

impl From<DevicePathError> for Error {
    fn from(err: DevicePathError) -> Self {
        match err {
            DevicePathError::OutOfResources => Status::OUT_OF_RESOURCES.into(),
            _ => Status::INVALID_PARAMETER.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Create a node to `path` from raw data.
    fn add_node(path: &mut Vec<u8>, device_type: u8, sub_type: u8, node_data: &[u8]) {
        path.push(device_type);
        path.push(sub_type);
        path.extend(
            u16::try_from(HEADER_SIZE + node_data.len())
                .unwrap()
                .to_le_bytes(),
        );
        path.extend(node_data);
    }

    /// Create a test device path as raw bytes.
    fn create_raw_device_path() -> Vec<u8> {
        let mut raw_data = Vec::new();
        add_node(&mut raw_data, 0xa0, 0xb0, &[10, 11]);
        add_node(&mut raw_data, 0xa1, 0xb1, &[20, 21, 22, 23]);
        add_node(
            &mut raw_data,
            DeviceType::END.0,
            DeviceSubType::END_ENTIRE.0,
            &[],
        );
        raw_data
    }

    /// Check that `node` has the expected content.
    fn check_node(node: &DevicePathNode, device_type: u8, sub_type: u8, node_data: &[u8]) {
        assert_eq!(node.device_type().0, device_type);
        assert_eq!(node.sub_type().0, sub_type);
        assert_eq!(
            node.length(),
            u16::try_from(HEADER_SIZE + node_data.len()).unwrap()
        );
        assert_eq!(node.payload(), node_data);
    }

    #[test]
    fn test_device_path_nodes() {
        let raw_data = create_raw_device_path();
        let dp = DevicePath::from_bytes(&raw_data).unwrap();

        // Check that the size is the sum of the nodes' lengths.
        assert_eq!(dp.len(), 6 + 8 + 4);

        let nodes: Vec<_> = dp.node_iter().collect();
        check_node(nodes[0], 0xa0, 0xb0, &[10, 11]);
        check_node(nodes[1], 0xa1, 0xb1, &[20, 21, 22, 23]);
        // The end-entire node is not returned by the iterator.
        assert_eq!(nodes.len(), 2);

        assert_eq!(dp.all_nodes_iter().count(), 3);
        assert!(dp.all_nodes_iter().last().unwrap().is_end_entire());
    }

    #[test]
    fn test_trailing_bytes_are_not_part_of_the_path() {
        let mut raw_data = create_raw_device_path();
        raw_data.extend([0xde, 0xad, 0xbe, 0xef]);
        let dp = DevicePath::from_bytes(&raw_data).unwrap();
        assert_eq!(dp.len(), 18);
    }

    #[test]
    fn test_malformed_paths_are_rejected() {
        // Length smaller than the header.
        let mut raw_data = Vec::new();
        add_node(&mut raw_data, 0xa0, 0xb0, &[]);
        raw_data[2] = 3;
        assert_eq!(
            DevicePath::from_bytes(&raw_data),
            Err(DevicePathError::LengthTooSmall {
                offset: 0,
                length: 3
            })
        );

        // Length running past the buffer.
        let mut raw_data = create_raw_device_path();
        raw_data[6 + 2] = 40;
        assert_eq!(
            DevicePath::from_bytes(&raw_data),
            Err(DevicePathError::NodeOutOfBounds {
                offset: 6,
                length: 40
            })
        );

        // No end node.
        let mut raw_data = Vec::new();
        add_node(&mut raw_data, 0xa0, 0xb0, &[1, 2]);
        assert_eq!(
            DevicePath::from_bytes(&raw_data),
            Err(DevicePathError::TruncatedHeader { offset: 6 })
        );

        assert_eq!(
            DevicePath::from_bytes(&[]),
            Err(DevicePathError::TruncatedHeader { offset: 0 })
        );

        // End node with a payload.
        let mut raw_data = Vec::new();
        add_node(&mut raw_data, 0xa0, 0xb0, &[1, 2]);
        add_node(
            &mut raw_data,
            DeviceType::END.0,
            DeviceSubType::END_ENTIRE.0,
            &[0, 0, 0, 0],
        );
        assert_eq!(
            DevicePath::from_bytes(&raw_data),
            Err(DevicePathError::EndNodeLength {
                offset: 6,
                length: 8
            })
        );
    }

    #[test]
    fn test_leaf() {
        let raw_data = create_raw_device_path();
        let dp = DevicePath::from_bytes(&raw_data).unwrap();
        assert_eq!(dp.leaf_offset(), Some(6));
        check_node(dp.leaf().unwrap(), 0xa1, 0xb1, &[20, 21, 22, 23]);

        let leaf_path = dp.suffix(6).unwrap();
        assert_eq!(leaf_path.node_iter().count(), 1);
        assert!(dp.suffix(3).is_none());

        let empty = DevicePathHeader::END_ENTIRE.to_bytes();
        let empty = DevicePath::from_bytes(&empty).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.leaf_offset(), None);
        assert!(empty.leaf().is_none());
    }

    #[test]
    fn test_duplicate() {
        let mut raw_data = create_raw_device_path();
        raw_data.extend([1, 2, 3]);
        let dp = DevicePath::from_bytes(&raw_data).unwrap();
        let copy = dp.duplicate().unwrap();
        assert_eq!(copy.len(), dp.len());
        assert_eq!(&*copy, dp);
    }

    #[test]
    fn test_truncate_leaf() {
        let raw_data = create_raw_device_path();
        let dp = DevicePath::from_bytes(&raw_data).unwrap();
        let parent = dp.truncate_leaf().unwrap().unwrap();
        let nodes: Vec<_> = parent.node_iter().collect();
        assert_eq!(nodes.len(), 1);
        check_node(nodes[0], 0xa0, 0xb0, &[10, 11]);
        assert_eq!(parent.len(), 6 + 4);

        let empty = DevicePathHeader::END_ENTIRE.to_bytes();
        let empty = DevicePath::from_bytes(&empty).unwrap();
        assert_eq!(empty.truncate_leaf(), Ok(None));
    }

    #[test]
    fn test_truncate_at() {
        let mut raw_data = Vec::new();
        add_node(&mut raw_data, 0xa0, 0xb0, &[10, 11]);
        add_node(
            &mut raw_data,
            DeviceType::MEDIA.0,
            DeviceSubType::MEDIA_CD_ROM.0,
            &[0; 20],
        );
        add_node(&mut raw_data, 0xa1, 0xb1, &[20]);
        add_node(
            &mut raw_data,
            DeviceType::END.0,
            DeviceSubType::END_ENTIRE.0,
            &[],
        );
        let dp = DevicePath::from_bytes(&raw_data).unwrap();

        let truncated = dp
            .truncate_at((DeviceType::MEDIA, DeviceSubType::MEDIA_CD_ROM))
            .unwrap();
        assert_eq!(truncated.node_iter().count(), 1);

        let untouched = dp
            .truncate_at((DeviceType::MEDIA, DeviceSubType::MEDIA_HARD_DRIVE))
            .unwrap();
        assert_eq!(&*untouched, dp);
    }

    #[test]
    fn test_device_type_debug() {
        assert_eq!(alloc::format!("{:?}", DeviceType::MESSAGING), "MESSAGING");
        assert_eq!(alloc::format!("{:?}", DeviceType(0x42)), "DeviceType(0x42)");
    }
}
