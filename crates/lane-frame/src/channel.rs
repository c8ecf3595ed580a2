//! Detector channel ids.
//!
//! A LUCID capture interleaves up to five Timepix chips in one stream. Each
//! chip is a channel, numbered 0-4 in the order of the one-hot bits that
//! select it on the wire.

use crate::error::{FrameError, Result};

/// Number of detector channels.
pub const CHANNEL_COUNT: usize = 5;

/// Highest valid channel id.
pub const MAX_CHANNEL: u8 = 4;

/// Returns a human-readable name for a channel id.
pub fn channel_name(id: u8) -> &'static str {
    match id {
        0 => "TPX0",
        1 => "TPX1",
        2 => "TPX2",
        3 => "TPX3",
        4 => "TPX4",
        _ => "INVALID",
    }
}

/// Returns true if the id names one of the five detector channels.
pub fn is_valid_channel(id: u8) -> bool {
    id <= MAX_CHANNEL
}

/// Narrow a wider integer to a channel id, rejecting anything above 4.
pub fn checked_channel(id: u32) -> Result<u8> {
    match u8::try_from(id) {
        Ok(channel) if is_valid_channel(channel) => Ok(channel),
        _ => Err(FrameError::ChannelOutOfRange(id)),
    }
}
