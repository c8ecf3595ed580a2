use std::collections::BTreeMap;

use crate::pixel::PixelKey;

/// Hit magnitudes are 15-bit values on the wire.
pub const MAGNITUDE_MASK: u16 = 0x7FFF;

/// One time-stamped snapshot of hit pixels on a single channel.
///
/// Only non-zero pixels are stored. Iteration is in ascending key order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    channel: u8,
    timestamp: u32,
    timestamp_sub: u8,
    pixels: BTreeMap<PixelKey, u16>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new(channel: u8, timestamp: u32, timestamp_sub: u8) -> Self {
        Self {
            channel,
            timestamp,
            timestamp_sub,
            pixels: BTreeMap::new(),
        }
    }

    /// Channel the frame was captured on.
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Capture time in UNIX seconds.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Sub-second part of the capture time.
    pub fn timestamp_sub(&self) -> u8 {
        self.timestamp_sub
    }

    /// Record a hit. The magnitude is masked to 15 bits; a later write to the
    /// same key replaces the earlier one.
    pub fn set_pixel(&mut self, key: PixelKey, magnitude: u16) {
        self.pixels.insert(key, magnitude & MAGNITUDE_MASK);
    }

    /// Magnitude at `key`, if the pixel was hit.
    pub fn pixel(&self, key: PixelKey) -> Option<u16> {
        self.pixels.get(&key).copied()
    }

    /// Hit pixels in ascending key order.
    pub fn pixels(&self) -> impl Iterator<Item = (PixelKey, u16)> + '_ {
        self.pixels.iter().map(|(key, value)| (*key, *value))
    }

    /// Number of hit pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
