// SPDX-License-Identifier: MIT OR Apache-2.0

//! This module is used to simplify importing the most common disk layer
//! types.
//!
//! This includes the context and device types, `Status` codes and the
//! traits the firmware glue implements.

pub use crate::{Config, DiskContext, DiskDevice, Handle, ResultExt, Status, StatusExt};

pub use crate::drive::{BiosDiskOp, Geometry};
pub use crate::firmware::{Firmware, PartitionWalker};
pub use crate::media::DiskIo;
