use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use lane_frame::{ChannelStore, RawInput};

use crate::error::Result;
use crate::reader::read_lane;
use crate::writer::write_lane;

/// Decoded frames of one capture together with its identifying fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaneFile {
    pub file_id: u32,
    pub start_time: u32,
    pub channels: ChannelStore,
}

impl LaneFile {
    pub fn new(file_id: u32, start_time: u32, channels: ChannelStore) -> Self {
        Self {
            file_id,
            start_time,
            channels,
        }
    }

    /// Copy the decoded contents of any raw input.
    pub fn from_input<R: RawInput + ?Sized>(input: &R) -> Self {
        Self::new(
            input.file_id(),
            input.start_time(),
            input.frames_by_channel().clone(),
        )
    }

    /// Read a `.lane` file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        read_lane(BufReader::new(file))
    }

    /// Write to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        write_lane(self, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
