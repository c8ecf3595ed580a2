use std::collections::BTreeMap;

use crate::frame::Frame;

/// Frames grouped by channel, each channel in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelStore {
    channels: BTreeMap<u8, Vec<Frame>>,
}

impl ChannelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame to the sequence of its own channel.
    pub fn push(&mut self, frame: Frame) {
        self.channels.entry(frame.channel()).or_default().push(frame);
    }

    /// Frames on a channel, empty if the channel never appeared.
    pub fn frames(&self, channel: u8) -> &[Frame] {
        self.channels
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Channels in ascending id order with their frames.
    pub fn channels(&self) -> impl Iterator<Item = (u8, &[Frame])> + '_ {
        self.channels
            .iter()
            .map(|(id, frames)| (*id, frames.as_slice()))
    }

    /// Ids of channels holding at least one frame.
    pub fn channel_ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.channels.keys().copied()
    }

    /// Every frame, channel by channel.
    pub fn iter_frames(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.channels.values().flatten()
    }

    /// Total number of frames across channels.
    pub fn frame_count(&self) -> usize {
        self.channels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }
}

impl FromIterator<Frame> for ChannelStore {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<Frame> for ChannelStore {
    fn extend<I: IntoIterator<Item = Frame>>(&mut self, iter: I) {
        for frame in iter {
            self.push(frame);
        }
    }
}
