use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::file::LaneFile;
use crate::{END_OF_CHANNEL, END_OF_FRAME};

/// Serialize `file` in `.lane` layout.
///
/// Output is deterministic: channels ascend, frames keep arrival order and
/// pixels ascend by key. A file with no frames produces only the id line.
pub fn write_lane<W: Write>(file: &LaneFile, mut out: W) -> Result<()> {
    writeln!(out, "{},{}", file.file_id, file.start_time)?;

    for (channel, frames) in file.channels.channels() {
        writeln!(out, "{channel}")?;
        for frame in frames {
            writeln!(out, "{}.{}", frame.timestamp(), frame.timestamp_sub())?;
            for (key, count) in frame.pixels() {
                writeln!(out, "{},{},{}", key.x(), key.y(), count)?;
            }
            writeln!(out, "{END_OF_FRAME}")?;
        }
        writeln!(out, "{END_OF_CHANNEL}")?;
    }

    debug!(
        file_id = file.file_id,
        frames = file.channels.frame_count(),
        "wrote lane file"
    );
    Ok(())
}
