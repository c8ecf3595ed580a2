use std::fmt;

use crate::error::{FrameError, Result};

/// Pixels along one side of the detector grid.
pub const GRID_SIDE: usize = 256;

/// Total cells in the detector grid.
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// Packed pixel address: `x * 256 + y`.
///
/// Both coordinates are stored as bytes, so every key decodes to a position
/// inside the grid. Keys order by `x` first, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PixelKey(u16);

impl PixelKey {
    /// Build a key from grid coordinates.
    pub const fn new(x: u8, y: u8) -> Self {
        Self(((x as u16) << 8) | y as u16)
    }

    /// Build a key from wider coordinates, rejecting anything off the grid.
    pub fn from_coords(x: u32, y: u32) -> Result<Self> {
        if x as usize >= GRID_SIDE || y as usize >= GRID_SIDE {
            return Err(FrameError::CoordinateOutOfRange { x, y });
        }
        Ok(Self::new(x as u8, y as u8))
    }

    /// Reinterpret a packed value as a key. Every `u16` is a valid key.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn x(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn y(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Index into a flat array of [`GRID_CELLS`] entries.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<PixelKey> for u32 {
    fn from(key: PixelKey) -> Self {
        u32::from(key.0)
    }
}

impl fmt::Display for PixelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
