//! Byte-order correction for multi-byte wire fields.
//!
//! Fields are extracted the way a host of a given byte order would read them
//! from memory, then corrected to the wire's big-endian order. Keeping both
//! steps explicit lets tests simulate either host on any machine.

/// Byte order of a host or of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    /// The capture format is big-endian.
    pub const WIRE: Endian = Endian::Big;

    /// Byte order of the machine this crate was compiled for.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    /// Reinterpret two bytes as a host of this byte order would.
    pub fn load_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endian::Big => u16::from_be_bytes(bytes),
            Endian::Little => u16::from_le_bytes(bytes),
        }
    }

    /// Reinterpret four bytes as a host of this byte order would.
    pub fn load_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endian::Big => u32::from_be_bytes(bytes),
            Endian::Little => u32::from_le_bytes(bytes),
        }
    }

    /// Convert a value loaded on this host into its wire value.
    ///
    /// Swaps exactly when this byte order differs from [`Endian::WIRE`].
    pub fn correct_u16(self, raw: u16) -> u16 {
        if self == Self::WIRE {
            raw
        } else {
            raw.swap_bytes()
        }
    }

    /// Convert a value loaded on this host into its wire value.
    pub fn correct_u32(self, raw: u32) -> u32 {
        if self == Self::WIRE {
            raw
        } else {
            raw.swap_bytes()
        }
    }
}

impl Default for Endian {
    fn default() -> Self {
        Self::native()
    }
}
