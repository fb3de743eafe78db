//! Device numbers.
//!
//! A device number identifies a character device to the host as a
//! `major:minor` pair. The host hands out the major number when the driver
//! registers; the driver owns every minor under it and uses minor 0 for its
//! single node.

use core::fmt;

/// Number of bits reserved for the minor number (Linux `MINORBITS`).
const MINOR_BITS: u32 = 20;

/// Mask selecting the minor number from a packed device number.
const MINOR_MASK: u32 = (1 << MINOR_BITS) - 1;

/// Mask selecting the major number once shifted down: the 12 bits left over
/// in a 32-bit `dev_t`.
const MAJOR_MASK: u32 = (1 << (u32::BITS - MINOR_BITS)) - 1;

/// A packed `major:minor` device number (`dev_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DevNum(u32);

impl DevNum {
    /// Pack `major:minor` (the `MKDEV` macro).
    ///
    /// Major numbers are 12 bits wide and minor numbers 20 bits; wider
    /// values are truncated to their low bits.
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self(((major & MAJOR_MASK) << MINOR_BITS) | (minor & MINOR_MASK))
    }

    /// Rebuild a device number from its packed form.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The packed form.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Major number: which driver owns the device.
    #[inline]
    pub const fn major(self) -> u32 {
        self.0 >> MINOR_BITS
    }

    /// Minor number: which device of that driver.
    #[inline]
    pub const fn minor(self) -> u32 {
        self.0 & MINOR_MASK
    }
}

impl fmt::Display for DevNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major(), self.minor())
    }
}
