//! The `.lane` intermediate text format.
//!
//! A `.lane` file stores the decoded frames of one capture as plain text:
//!
//! ```text
//! <file_id>,<start_time>
//! <channel>
//! <timestamp>.<timestamp_sub>
//! <x>,<y>,<count>
//! EOF
//! EOC
//! ```
//!
//! Each channel block lists its frames in arrival order. Each frame lists its
//! pixels in ascending key order and ends with `EOF`; each channel ends with
//! `EOC`. Reading a written file reproduces the same frames.

pub mod error;
pub mod file;
pub mod reader;
pub mod writer;

pub use error::{Result, TextError};
pub use file::LaneFile;
pub use reader::read_lane;
pub use writer::write_lane;

/// Extension used for `.lane` files.
pub const LANE_EXTENSION: &str = "lane";

pub(crate) const END_OF_FRAME: &str = "EOF";
pub(crate) const END_OF_CHANNEL: &str = "EOC";
