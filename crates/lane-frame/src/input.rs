use crate::frame::Frame;
use crate::store::ChannelStore;

/// A raw detector file format that decodes into per-channel frames.
///
/// Each format provides its own implementation; the trait carries no shared
/// state. `read` replaces any previously decoded contents and, on failure,
/// leaves the store empty.
pub trait RawInput {
    /// Error produced when a buffer cannot be decoded.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode a complete in-memory file.
    fn read(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Decoded frames grouped by channel.
    fn frames_by_channel(&self) -> &ChannelStore;

    /// Frames on one channel.
    fn frames(&self, channel: u8) -> &[Frame] {
        self.frames_by_channel().frames(channel)
    }

    /// Run start time in UNIX seconds.
    fn start_time(&self) -> u32;

    /// Identifier of the capture configuration.
    fn file_id(&self) -> u32;
}
