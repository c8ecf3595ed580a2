use std::fmt::Display;
use std::io::BufRead;
use std::str::FromStr;

use lane_frame::{checked_channel, ChannelStore, Frame, PixelKey, MAGNITUDE_MASK};
use tracing::debug;

use crate::error::{Result, TextError};
use crate::file::LaneFile;
use crate::{END_OF_CHANNEL, END_OF_FRAME};

/// Line source that remembers the number of the last line handed out.
struct Lines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(input: R) -> Self {
        Self {
            inner: input.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.inner.next() {
            None => Ok(None),
            Some(line) => {
                let mut line = line?;
                self.line += 1;
                line.truncate(line.trim_end().len());
                Ok(Some(line))
            }
        }
    }

    /// Next line, where running out of input is an error.
    fn expect_line(&mut self) -> Result<String> {
        self.next_line()?
            .ok_or(TextError::UnexpectedEof { line: self.line })
    }

    fn error(&self, message: impl Into<String>) -> TextError {
        TextError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn number<T>(&self, field: &str, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        field
            .parse()
            .map_err(|err| self.error(format!("invalid {what} {field:?}: {err}")))
    }
}

/// Parse a `.lane` stream.
///
/// Trailing whitespace on each line is ignored. Input that ends inside a
/// frame or channel block is rejected.
pub fn read_lane<R: BufRead>(input: R) -> Result<LaneFile> {
    let mut lines = Lines::new(input);

    let id_line = lines.expect_line()?;
    let (file_id, start_time) = id_line
        .split_once(',')
        .ok_or_else(|| lines.error("expected `<file_id>,<start_time>`"))?;
    let file_id = lines.number(file_id, "file id")?;
    let start_time = lines.number(start_time, "start time")?;

    let mut channels = ChannelStore::new();
    while let Some(line) = lines.next_line()? {
        let channel = parse_channel(&lines, &line)?;

        loop {
            let line = lines.expect_line()?;
            if line == END_OF_CHANNEL {
                break;
            }
            let mut frame = parse_frame_header(&lines, &line, channel)?;

            loop {
                let line = lines.expect_line()?;
                if line == END_OF_FRAME {
                    break;
                }
                let (key, count) = parse_pixel(&lines, &line)?;
                frame.set_pixel(key, count);
            }
            channels.push(frame);
        }
    }

    debug!(
        file_id,
        frames = channels.frame_count(),
        lines = lines.line,
        "read lane file"
    );
    Ok(LaneFile::new(file_id, start_time, channels))
}

fn parse_channel<R: BufRead>(lines: &Lines<R>, line: &str) -> Result<u8> {
    let raw: u32 = lines.number(line, "channel")?;
    checked_channel(raw).map_err(|err| lines.error(err.to_string()))
}

fn parse_frame_header<R: BufRead>(lines: &Lines<R>, line: &str, channel: u8) -> Result<Frame> {
    let (timestamp, sub) = line
        .split_once('.')
        .ok_or_else(|| lines.error("expected `<timestamp>.<timestamp_sub>`"))?;
    Ok(Frame::new(
        channel,
        lines.number(timestamp, "timestamp")?,
        lines.number(sub, "sub-second timestamp")?,
    ))
}

fn parse_pixel<R: BufRead>(lines: &Lines<R>, line: &str) -> Result<(PixelKey, u16)> {
    let mut parts = line.split(',');
    let (Some(x), Some(y), Some(count), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(lines.error("expected `<x>,<y>,<count>`"));
    };

    let key = PixelKey::from_coords(lines.number(x, "x")?, lines.number(y, "y")?)
        .map_err(|err| lines.error(err.to_string()))?;
    let count: u16 = lines.number(count, "count")?;
    if count > MAGNITUDE_MASK {
        return Err(lines.error(format!("count {count} exceeds {MAGNITUDE_MASK}")));
    }
    Ok((key, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<LaneFile> {
        read_lane(Cursor::new(text))
    }

    #[test]
    fn reads_nested_blocks() {
        let file = read("5,1400\n1\n10.2\n3,4,9\n0,0,1\nEOF\n11.0\nEOF\nEOC\n").unwrap();
        assert_eq!(file.file_id, 5);
        assert_eq!(file.start_time, 1400);

        let frames = file.channels.frames(1);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].timestamp(), 10);
        assert_eq!(frames[0].timestamp_sub(), 2);
        assert_eq!(frames[0].pixel(PixelKey::new(3, 4)), Some(9));
        assert_eq!(frames[0].len(), 2);
        assert!(frames[1].is_empty());
    }

    #[test]
    fn id_line_alone_is_an_empty_file() {
        let file = read("1,2\n").unwrap();
        assert!(file.channels.is_empty());
    }

    #[test]
    fn tolerates_crlf() {
        let file = read("1,2\r\n0\r\n3.0\r\n1,1,1\r\nEOF\r\nEOC\r\n").unwrap();
        assert_eq!(file.channels.frames(0).len(), 1);
    }

    #[test]
    fn empty_input_is_unexpected_eof() {
        assert!(matches!(
            read("").unwrap_err(),
            TextError::UnexpectedEof { line: 0 }
        ));
    }

    #[test]
    fn unterminated_frame_is_unexpected_eof() {
        let err = read("1,2\n0\n3.0\n1,1,1\n").unwrap_err();
        assert!(matches!(err, TextError::UnexpectedEof { line: 4 }));
    }

    #[test]
    fn bad_pixel_line_reports_line_number() {
        let err = read("1,2\n0\n3.0\n1,1\nEOF\nEOC\n").unwrap_err();
        assert!(matches!(err, TextError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn coordinates_must_be_on_grid() {
        let err = read("1,2\n0\n3.0\n256,0,1\nEOF\nEOC\n").unwrap_err();
        assert!(matches!(err, TextError::Parse { line: 4, .. }));
    }

    #[test]
    fn rejects_unknown_channel() {
        let err = read("1,2\n7\nEOC\n").unwrap_err();
        assert!(matches!(err, TextError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_oversized_count() {
        let err = read("1,2\n0\n3.0\n1,1,40000\nEOF\nEOC\n").unwrap_err();
        assert!(matches!(err, TextError::Parse { line: 4, .. }));
    }

    #[test]
    fn rejects_malformed_id_line() {
        let err = read("12\n").unwrap_err();
        assert!(matches!(err, TextError::Parse { line: 1, .. }));
    }
}
