use bytes::{BufMut, Bytes, BytesMut};
use lane_frame::{ChannelStore, Frame, PixelKey, GRID_SIDE};

use crate::error::{LucidError, Result};
use crate::header::{FileHeader, HEADER_SIZE};
use crate::word::{Word, PAYLOAD_MAX, ZERO_RUN_MAX};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;

/// Builds capture buffers in the wire format the decoder reads.
///
/// Pixel data is run-length encoded in raster order. Zero-magnitude pixels
/// are not hits and are not written.
#[derive(Debug)]
pub struct LucidWriter {
    buf: BytesMut,
}

impl LucidWriter {
    /// Start a capture with the given header.
    pub fn new(header: &FileHeader) -> Self {
        let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
        buf.put_slice(&header.to_bytes());
        Self { buf }
    }

    /// Encode a whole store, one frame marker per frame, channels in
    /// ascending order.
    pub fn encode_file(header: &FileHeader, store: &ChannelStore) -> Result<Bytes> {
        let mut writer = Self::new(header);
        for frame in store.iter_frames() {
            writer.write_group(frame.timestamp(), frame.timestamp_sub(), [frame])?;
        }
        Ok(writer.finish())
    }

    /// Write one frame marker and timestamp followed by each frame's channel
    /// marker and pixel data. The frames' own timestamps are ignored.
    pub fn write_group<'f>(
        &mut self,
        timestamp: u32,
        timestamp_sub: u8,
        frames: impl IntoIterator<Item = &'f Frame>,
    ) -> Result<()> {
        self.put_word(Word::Control(crate::word::Control::FrameStart));
        self.buf.put_u32(timestamp);
        self.buf.put_u8(timestamp_sub);
        for frame in frames {
            self.write_channel(frame)?;
        }
        Ok(())
    }

    /// Write a channel marker and the frame's pixel data.
    pub fn write_channel(&mut self, frame: &Frame) -> Result<()> {
        let marker = Word::channel_marker(frame.channel())
            .ok_or(LucidError::ChannelOutOfRange(frame.channel()))?;

        let mut hits: Vec<(u32, PixelKey, u16)> = frame
            .pixels()
            .filter(|(_, value)| *value > 0)
            .map(|(key, value)| (raster_position(key), key, value))
            .collect();
        hits.sort_unstable_by_key(|(position, _, _)| *position);

        if let Some((_, key, magnitude)) = hits.iter().find(|(_, _, v)| *v > PAYLOAD_MAX) {
            return Err(LucidError::MagnitudeTooLarge {
                key: *key,
                magnitude: *magnitude,
            });
        }

        self.put_word(marker);
        let mut cursor = 0u32;
        for (position, _, magnitude) in hits {
            self.put_zero_run(position - cursor);
            self.put_word(Word::Payload(magnitude));
            cursor = position + 1;
        }
        Ok(())
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing beyond the header has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.len() <= HEADER_SIZE
    }

    /// Finish and hand over the encoded capture.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    fn put_word(&mut self, word: Word) {
        self.buf.put_u16(word.to_raw());
    }

    fn put_zero_run(&mut self, mut count: u32) {
        let max = u32::from(ZERO_RUN_MAX);
        while count > 0 {
            let chunk = count.min(max);
            self.put_word(Word::ZeroRun(chunk as u16));
            count -= chunk;
        }
    }
}

/// Row-major raster position of a key: `y * 256 + x`.
fn raster_position(key: PixelKey) -> u32 {
    u32::from(key.y()) * GRID_SIDE as u32 + u32::from(key.x())
}
