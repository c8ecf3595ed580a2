use lane_frame::{ChannelStore, Frame, PixelKey, GRID_CELLS, GRID_SIDE};
use tracing::{debug, trace};

use crate::endian::Endian;
use crate::error::{FormatError, Result};
use crate::header::FileHeader;
use crate::reader::WordReader;
use crate::word::{Control, Word, FRAME_MARKER};

/// Configuration for decoding a capture.
#[derive(Debug, Clone, Default)]
pub struct DecodeConfig {
    /// Byte order of the host performing field extraction. Defaults to the
    /// native order.
    pub host: Endian,
}

/// Implicit raster position within one channel's pixel data.
///
/// Walks the grid row by row: `x` runs 0-255, then wraps to 0 as `y`
/// increments. The position only ever moves forward and may run past the
/// last cell; only writing a pixel there is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterCursor {
    position: u32,
}

impl RasterCursor {
    /// Linear position, `y * 256 + x`.
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn advance(&mut self, count: u32) {
        self.position = self.position.saturating_add(count);
    }

    /// The pixel under the cursor, or `None` once it has left the grid.
    pub fn key(&self) -> Option<PixelKey> {
        if self.position as usize >= GRID_CELLS {
            return None;
        }
        let side = GRID_SIDE as u32;
        let x = (self.position % side) as u8;
        let y = (self.position / side) as u8;
        Some(PixelKey::new(x, y))
    }
}

/// Timestamp shared by every channel frame under one frame marker.
#[derive(Debug, Clone, Copy)]
struct FrameStamp {
    seconds: u32,
    sub: u8,
}

#[derive(Debug)]
enum State {
    ExpectFrameMarker,
    ExpectTimestamp,
    ExpectChannelMarker(FrameStamp),
    ReadingChannelData {
        stamp: FrameStamp,
        frame: Frame,
        cursor: RasterCursor,
    },
    Done,
}

/// How a run of channel data ended.
enum ChannelEnd {
    FrameMarker,
    ChannelMarker,
    EndOfBuffer,
}

/// State machine turning the post-header word stream into frames.
///
/// Control words that end a channel's data are not consumed by the data
/// loop; the next state reads them again as the start of what follows.
pub struct FrameStreamDecoder<'a> {
    reader: WordReader<'a>,
    store: ChannelStore,
}

impl<'a> FrameStreamDecoder<'a> {
    /// Create a decoder reading from the reader's current position, which
    /// must be the first byte after the header.
    pub fn new(reader: WordReader<'a>) -> Self {
        Self {
            reader,
            store: ChannelStore::new(),
        }
    }

    /// Decode the whole stream. Any error discards every frame decoded so far.
    pub fn run(mut self) -> Result<ChannelStore> {
        let mut state = State::ExpectFrameMarker;
        loop {
            state = match state {
                State::ExpectFrameMarker => {
                    self.read_frame_marker()?;
                    State::ExpectTimestamp
                }
                State::ExpectTimestamp => {
                    let seconds = self.reader.read_u32()?;
                    let sub = self.reader.read_u8()?;
                    trace!(seconds, sub, "frame timestamp");
                    State::ExpectChannelMarker(FrameStamp { seconds, sub })
                }
                State::ExpectChannelMarker(stamp) => {
                    let channel = self.read_channel_marker()?;
                    State::ReadingChannelData {
                        stamp,
                        frame: Frame::new(channel, stamp.seconds, stamp.sub),
                        cursor: RasterCursor::default(),
                    }
                }
                State::ReadingChannelData {
                    stamp,
                    mut frame,
                    mut cursor,
                } => {
                    let end = self.read_channel_data(&mut frame, &mut cursor)?;
                    trace!(
                        channel = frame.channel(),
                        pixels = frame.len(),
                        "closed channel frame"
                    );
                    self.store.push(frame);
                    match end {
                        ChannelEnd::FrameMarker => State::ExpectFrameMarker,
                        ChannelEnd::ChannelMarker => State::ExpectChannelMarker(stamp),
                        ChannelEnd::EndOfBuffer => State::Done,
                    }
                }
                State::Done => return Ok(self.store),
            };
        }
    }

    fn read_frame_marker(&mut self) -> Result<()> {
        let offset = self.reader.offset();
        let found = self.reader.read_u16()?;
        if found != FRAME_MARKER {
            return Err(FormatError::BadFrameMarker { offset, found }.into());
        }
        Ok(())
    }

    fn read_channel_marker(&mut self) -> Result<u8> {
        let offset = self.reader.offset();
        let raw = self.reader.read_u16()?;
        match Word::classify(raw) {
            Word::Control(control @ Control::Channel { field }) => control
                .channel()
                .ok_or_else(|| FormatError::InvalidChannelField { offset, field }.into()),
            _ => Err(FormatError::ExpectedChannelMarker { offset, found: raw }.into()),
        }
    }

    fn read_channel_data(
        &mut self,
        frame: &mut Frame,
        cursor: &mut RasterCursor,
    ) -> Result<ChannelEnd> {
        loop {
            if self.reader.is_at_end() {
                return Ok(ChannelEnd::EndOfBuffer);
            }

            let offset = self.reader.offset();
            match self.reader.classify()? {
                Word::ZeroRun(count) => cursor.advance(u32::from(count)),
                Word::Payload(value) => {
                    if value > 0 {
                        let key = cursor.key().ok_or(FormatError::RasterOverflow {
                            offset,
                            position: cursor.position(),
                        })?;
                        frame.set_pixel(key, value);
                    }
                    cursor.advance(1);
                }
                Word::Control(Control::FrameStart) => return Ok(ChannelEnd::FrameMarker),
                Word::Control(Control::Channel { .. }) => return Ok(ChannelEnd::ChannelMarker),
            }
            self.reader.advance(1)?;
        }
    }
}

/// Decode a complete capture buffer into its header and frames.
pub fn decode(data: &[u8], config: &DecodeConfig) -> Result<(FileHeader, ChannelStore)> {
    let mut reader = WordReader::with_host(data, config.host);
    let header = FileHeader::parse(&mut reader)?;
    let store = FrameStreamDecoder::new(reader).run()?;

    debug!(
        file_id = header.file_id,
        start_time = header.start_time,
        channels = store.channel_ids().count(),
        frames = store.frame_count(),
        "decoded capture"
    );
    Ok((header, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LucidError;
    use crate::header::{FILE_MAGIC, HEADER_SIZE};

    fn header_bytes() -> Vec<u8> {
        let mut buf = FILE_MAGIC.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0x1F, 0x00, 0x00, 0x00, 0x01, 0x0A]);
        buf.extend_from_slice(&100u32.to_be_bytes());
        buf.extend_from_slice(&7u32.to_be_bytes());
        assert_eq!(buf.len(), HEADER_SIZE);
        buf
    }

    fn push_words(buf: &mut Vec<u8>, words: &[u16]) {
        for word in words {
            buf.extend_from_slice(&word.to_be_bytes());
        }
    }

    fn frame_header(buf: &mut Vec<u8>, seconds: u32, sub: u8) {
        push_words(buf, &[FRAME_MARKER]);
        buf.extend_from_slice(&seconds.to_be_bytes());
        buf.push(sub);
    }

    #[test]
    fn cursor_wraps_rows() {
        let mut cursor = RasterCursor::default();
        assert_eq!(cursor.key(), Some(PixelKey::new(0, 0)));
        cursor.advance(255);
        assert_eq!(cursor.key(), Some(PixelKey::new(255, 0)));
        cursor.advance(1);
        assert_eq!(cursor.key(), Some(PixelKey::new(0, 1)));
        cursor.advance(65_535 - 256);
        assert_eq!(cursor.key(), Some(PixelKey::new(255, 255)));
        cursor.advance(1);
        assert_eq!(cursor.key(), None);
    }

    #[test]
    fn decodes_zero_runs_and_payloads() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1000, 3);
        push_words(&mut buf, &[0xC100, 0x8005, 0x0002, 0x8009, 0x8000, 0x80FF]);

        let (header, store) = decode(&buf, &DecodeConfig::default()).unwrap();
        assert_eq!(header.file_id, 7);

        let frames = store.frames(0);
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!((frame.timestamp(), frame.timestamp_sub()), (1000, 3));
        let pixels: Vec<_> = frame.pixels().collect();
        assert_eq!(
            pixels,
            vec![
                (PixelKey::new(0, 0), 5),
                (PixelKey::new(3, 0), 9),
                (PixelKey::new(5, 0), 0xFF),
            ]
        );
    }

    #[test]
    fn channel_marker_reuses_outer_timestamp() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 55, 1);
        push_words(&mut buf, &[0xC200, 0x8001, 0xC800, 0x0100, 0x8002]);

        let (_, store) = decode(&buf, &DecodeConfig::default()).unwrap();
        assert_eq!(store.frame_count(), 2);
        let ch1 = &store.frames(1)[0];
        let ch3 = &store.frames(3)[0];
        assert_eq!(ch1.timestamp(), 55);
        assert_eq!(ch3.timestamp(), 55);
        assert_eq!(ch3.pixel(PixelKey::new(0, 1)), Some(2));
    }

    #[test]
    fn frame_marker_starts_new_timestamp() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 10, 0);
        push_words(&mut buf, &[0xC100, 0x8001]);
        frame_header(&mut buf, 11, 5);
        push_words(&mut buf, &[0xC100, 0x8002]);

        let (_, store) = decode(&buf, &DecodeConfig::default()).unwrap();
        let stamps: Vec<_> = store
            .frames(0)
            .iter()
            .map(|f| (f.timestamp(), f.timestamp_sub()))
            .collect();
        assert_eq!(stamps, vec![(10, 0), (11, 5)]);
    }

    #[test]
    fn empty_channel_data_yields_empty_frame() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0xC100, 0xC200]);

        let (_, store) = decode(&buf, &DecodeConfig::default()).unwrap();
        assert!(store.frames(0)[0].is_empty());
        assert!(store.frames(1)[0].is_empty());
    }

    #[test]
    fn missing_frame_marker_is_format_error() {
        let mut buf = header_bytes();
        push_words(&mut buf, &[0xDCDE, 0x0000, 0x0000]);
        buf.extend_from_slice(&[0x00, 0xC1, 0x00]);

        let err = decode(&buf, &DecodeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LucidError::Format(FormatError::BadFrameMarker {
                offset: 16,
                found: 0xDCDE
            })
        ));
    }

    #[test]
    fn non_control_after_timestamp_is_format_error() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0x8001]);

        let err = decode(&buf, &DecodeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LucidError::Format(FormatError::ExpectedChannelMarker { offset: 23, .. })
        ));
    }

    #[test]
    fn multi_bit_channel_field_is_format_error() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0xC300, 0x8001]);

        let err = decode(&buf, &DecodeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LucidError::Format(FormatError::InvalidChannelField { field: 0x03, .. })
        ));
    }

    #[test]
    fn zero_channel_field_is_format_error() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0xC000]);

        let err = decode(&buf, &DecodeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LucidError::Format(FormatError::InvalidChannelField { field: 0, .. })
        ));
    }

    #[test]
    fn dangling_byte_in_channel_data_is_truncated() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0xC100, 0x8001]);
        buf.push(0x80);

        let err = decode(&buf, &DecodeConfig::default()).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn pixel_past_grid_is_format_error() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0xC100, 0x7FFF, 0x7FFF, 0x0002, 0x8001]);

        let err = decode(&buf, &DecodeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LucidError::Format(FormatError::RasterOverflow { position: 65_536, .. })
        ));
    }

    #[test]
    fn trailing_zero_run_past_grid_is_allowed() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 1, 0);
        push_words(&mut buf, &[0xC100, 0x8001, 0x7FFF, 0x7FFF, 0x7FFF]);

        let (_, store) = decode(&buf, &DecodeConfig::default()).unwrap();
        assert_eq!(store.frames(0)[0].len(), 1);
    }

    #[test]
    fn little_endian_host_decodes_identically() {
        let mut buf = header_bytes();
        frame_header(&mut buf, 0x0102_0304, 9);
        push_words(&mut buf, &[0xC400, 0x0010, 0x8123]);

        let big = decode(&buf, &DecodeConfig { host: Endian::Big }).unwrap();
        let little = decode(&buf, &DecodeConfig { host: Endian::Little }).unwrap();
        assert_eq!(big, little);
        assert_eq!(little.1.frames(2)[0].timestamp(), 0x0102_0304);
        assert_eq!(little.1.frames(2)[0].pixel(PixelKey::new(16, 0)), Some(0x123));
    }
}
