// SPDX-License-Identifier: MIT OR Apache-2.0

//! Disk layer configuration.

/// Drive number under which the CD-ROM is reported by default.
pub const DEFAULT_CDROM_DRIVE: u32 = 0xE0;

/// Settings fixed when a [`DiskContext`](crate::DiskContext) is created.
///
/// ```
/// use efidisk::Config;
///
/// const CONFIG: Config = Config::new().with_cdrom_drive(0x9F);
/// assert_eq!(CONFIG.cdrom_drive(), 0x9F);
/// assert_eq!(Config::default().cdrom_drive(), 0xE0);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    cdrom_drive: u32,
}

impl Config {
    /// Default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cdrom_drive: DEFAULT_CDROM_DRIVE,
        }
    }

    /// Use `drive` as the drive number of the CD-ROM.
    ///
    /// The caller must pick a number outside the floppy and hard disk
    /// ranges; the CD-ROM number is checked before either of them, so a
    /// clashing number hides the drive it clashes with.
    #[must_use]
    pub const fn with_cdrom_drive(mut self, drive: u32) -> Self {
        self.cdrom_drive = drive;
        self
    }

    /// Drive number of the CD-ROM.
    #[must_use]
    pub const fn cdrom_drive(&self) -> u32 {
        self.cdrom_drive
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
