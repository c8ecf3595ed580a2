use std::path::Path;

use lane_frame::{ChannelStore, RawInput};
use tracing::info;

use crate::decoder::{decode, DecodeConfig};
use crate::error::{LucidError, Result};
use crate::header::FileHeader;

/// A decoded LUCID capture.
#[derive(Debug, Clone, Default)]
pub struct LucidFile {
    header: FileHeader,
    channels: ChannelStore,
    config: DecodeConfig,
}

impl LucidFile {
    /// An empty capture with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty capture that decodes with explicit configuration.
    pub fn with_config(config: DecodeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Decode an in-memory capture.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut file = Self::new();
        file.read(data)?;
        Ok(file)
    }

    /// Read and decode a capture from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading LUCID capture");
        let data = std::fs::read(path)?;
        Self::decode(&data)
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Give up the decoded frames.
    pub fn into_channels(self) -> ChannelStore {
        self.channels
    }

    fn clear(&mut self) {
        self.header = FileHeader::default();
        self.channels.clear();
    }
}

impl RawInput for LucidFile {
    type Error = LucidError;

    fn read(&mut self, data: &[u8]) -> Result<()> {
        self.clear();
        let (header, channels) = decode(data, &self.config)?;
        self.header = header;
        self.channels = channels;
        Ok(())
    }

    fn frames_by_channel(&self) -> &ChannelStore {
        &self.channels
    }

    fn start_time(&self) -> u32 {
        self.header.start_time
    }

    fn file_id(&self) -> u32 {
        self.header.file_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::LucidWriter;
    use lane_frame::{Frame, PixelKey};

    fn sample_capture() -> Vec<u8> {
        let header = FileHeader {
            compressed: true,
            start_time: 1_401_000_000,
            file_id: 42,
            ..FileHeader::default()
        };
        let mut frame = Frame::new(1, 1_401_000_001, 2);
        frame.set_pixel(PixelKey::new(10, 20), 30);
        let store: ChannelStore = std::iter::once(frame).collect();
        LucidWriter::encode_file(&header, &store).unwrap().to_vec()
    }

    #[test]
    fn decode_exposes_raw_input_view() {
        let file = LucidFile::decode(&sample_capture()).unwrap();
        assert_eq!(file.start_time(), 1_401_000_000);
        assert_eq!(file.file_id(), 42);
        assert_eq!(file.frames(1).len(), 1);
        assert_eq!(
            file.frames(1)[0].pixel(PixelKey::new(10, 20)),
            Some(30)
        );
        assert!(file.frames(0).is_empty());
    }

    #[test]
    fn failed_read_leaves_store_empty() {
        let mut file = LucidFile::decode(&sample_capture()).unwrap();
        assert!(!file.frames_by_channel().is_empty());

        let mut bad = sample_capture();
        bad[0] = 0x00;
        let err = file.read(&bad).unwrap_err();
        assert!(err.is_format());
        assert!(file.frames_by_channel().is_empty());
        assert_eq!(file.file_id(), 0);
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let err = LucidFile::open("/nonexistent/capture.ldat").unwrap_err();
        assert!(matches!(err, LucidError::Io(_)));
    }

    #[test]
    fn into_channels_hands_over_frames() {
        let file = LucidFile::decode(&sample_capture()).unwrap();
        assert_eq!(file.header().file_id, 42);
        let store = file.into_channels();
        assert_eq!(store.frame_count(), 1);
    }
}
