// SPDX-License-Identifier: MIT OR Apache-2.0

//! Legacy drive-number disk layer on top of UEFI block devices.
//!
//! Bootloader code written against the BIOS convention addresses disks
//! by a drive number plus a sector offset, and partitions by a
//! `(drive, partition)` pair. UEFI firmware instead hands out device
//! handles carrying a [device path], a Block I/O protocol and a Disk I/O
//! protocol. This crate bridges the two.
//!
//! # Crate organisation
//!
//! - [`device_path`] parses and compares binary device paths. Paths
//!   obtained from the firmware are validated once and then copied into an
//!   owned [`DevicePathBuf`].
//! - [`device`] enumerates every handle supporting Disk I/O and builds a
//!   [`DiskDevice`] for each of them.
//! - [`classify`] and [`list`] sort the devices into the floppy, hard disk
//!   and CD-ROM lists, from which drive numbers are derived positionally.
//! - [`resolve`] relates partitions to their parent disks and translates
//!   between firmware handles and `(drive, partition)` pairs.
//! - [`drive`] holds the drive-number convention, synthetic CHS geometry
//!   and sector-addressed reads and writes.
//! - [`DiskContext`] ties everything together. It is created once by
//!   [`DiskContext::init`] and dropped (or [torn down]) on exit; every
//!   legacy-style request goes through it.
//!
//! The firmware itself, and the MBR/GPT partition walker, are consumed
//! through the traits in [`firmware`]. Nothing in this crate calls into
//! UEFI boot services directly, which keeps the whole layer testable on
//! the host.
//!
//! # Drive numbers
//!
//! | Drives      | Numbers                                  |
//! |-------------|------------------------------------------|
//! | Floppy      | `0 .. n`                                 |
//! | Hard disk   | `0x80 + n`                               |
//! | CD-ROM      | [`Config::cdrom_drive`] (first entry only) |
//! | Invalid     | [`drive::INVALID_DRIVE`]                 |
//! | Network     | [`drive::NETWORK_DRIVE`]                 |
//!
//! Drive numbers are only stable for the lifetime of one [`DiskContext`].
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade. It never installs a logger
//! of its own.
//!
//! [device path]: device_path::DevicePath
//! [torn down]: DiskContext::teardown

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::ptr_as_ptr, missing_docs, unused)]
#![deny(clippy::all)]

extern crate alloc;

#[macro_use]
mod macros;

mod result;
pub use self::result::{Error, Result, ResultExt, Status, StatusExt};

mod data_types;
pub use self::data_types::Handle;
pub use uguid::{guid, Guid};

pub mod classify;
pub mod config;
pub mod context;
pub mod device;
pub mod device_path;
pub mod drive;
pub mod firmware;
pub mod list;
pub mod media;
pub mod partition;
pub mod prelude;
pub mod resolve;

pub use self::config::Config;
pub use self::context::DiskContext;
pub use self::device::DiskDevice;
pub use self::device_path::{DevicePath, DevicePathBuf};
