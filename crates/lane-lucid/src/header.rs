//! The fixed 16-byte capture header.
//!
//! ```text
//! ┌────────┬──────┬─────────────────────────────────────────────────┐
//! │ Offset │ Size │ Field                                           │
//! ├────────┼──────┼─────────────────────────────────────────────────┤
//! │ 0      │ 2    │ magic 0xDC 0xCC                                 │
//! │ 2      │ 1    │ chip-active bits [4:0], matrix table bits [1:0] │
//! │ 3      │ 1    │ matrix table bits [9:2]                         │
//! │ 4      │ 2    │ shutter mode bitfield                           │
//! │ 6      │ 1    │ bit0 compressed, bit1 linear LUT, bit2 XYV      │
//! │ 7      │ 1    │ shutter rate                                    │
//! │ 8      │ 4    │ start time (BE seconds)                         │
//! │ 12     │ 4    │ file id (BE)                                    │
//! └────────┴──────┴─────────────────────────────────────────────────┘
//! ```

use std::fmt;

use lane_frame::CHANNEL_COUNT;

use crate::error::{FormatError, Result};
use crate::reader::WordReader;

/// File magic, read as one big-endian word.
pub const FILE_MAGIC: u16 = 0xDCCC;

const MAGIC_SIZE: usize = 2;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame marker (2) + timestamp (4) + sub-second (1) + channel marker (2).
pub const MIN_FRAMING_SIZE: usize = 9;

/// Smallest buffer that can hold a header and one frame's framing.
pub const MIN_FILE_SIZE: usize = HEADER_SIZE + MIN_FRAMING_SIZE;

const FLAG_COMPRESSED: u8 = 0x01;
const FLAG_LINEAR_LUT: u8 = 0x02;
const FLAG_XYV: u8 = 0x04;

/// How pixel data in the capture was compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMode {
    /// Run-length encoded zero runs.
    Rle,
    /// Explicit x, y, value triples.
    Xyv,
    /// Compression disabled.
    None,
    #[default]
    Unknown,
}

impl CompressionMode {
    pub fn describe(self) -> &'static str {
        match self {
            CompressionMode::Rle => "Run-Length Encoded",
            CompressionMode::Xyv => "X, Y, Value",
            CompressionMode::None => "Not compressed",
            CompressionMode::Unknown => "Unknown compression mode",
        }
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Decoded capture header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileHeader {
    /// Per-chip activity, bit `i` of byte 2 selecting chip `i`.
    pub chip_active: [bool; CHANNEL_COUNT],
    /// 10-bit matrix table selector. Not interpreted.
    pub matrix_table: u16,
    /// Shutter mode bitfield. Not interpreted.
    pub shutter_mode: u16,
    pub compression_mode: CompressionMode,
    pub linear_lut: bool,
    pub compressed: bool,
    pub shutter_rate: u8,
    /// Run start in UNIX seconds.
    pub start_time: u32,
    pub file_id: u32,
}

impl FileHeader {
    /// Parse the header at the reader's cursor, leaving it on the first byte
    /// of the frame stream.
    ///
    /// The magic is checked before the full length so that any non-LUCID
    /// input of two or more bytes reports a bad magic.
    pub fn parse(reader: &mut WordReader<'_>) -> Result<Self> {
        if reader.len() < MAGIC_SIZE {
            return Err(FormatError::FileTooShort {
                len: reader.len(),
                min: MIN_FILE_SIZE,
            }
            .into());
        }
        let magic = reader.read_u16()?;
        if magic != FILE_MAGIC {
            return Err(FormatError::BadMagic { found: magic }.into());
        }
        if reader.len() < MIN_FILE_SIZE {
            return Err(FormatError::FileTooShort {
                len: reader.len(),
                min: MIN_FILE_SIZE,
            }
            .into());
        }

        let chips = reader.read_u8()?;
        let matrix_high = reader.read_u8()?;
        let shutter_mode = reader.read_u16()?;
        let flags = reader.read_u8()?;
        let shutter_rate = reader.read_u8()?;
        let start_time = reader.read_u32()?;
        let file_id = reader.read_u32()?;

        let mut chip_active = [false; CHANNEL_COUNT];
        for (i, active) in chip_active.iter_mut().enumerate() {
            *active = (chips >> i) & 0x01 == 0x01;
        }

        let compressed = flags & FLAG_COMPRESSED != 0;
        let compression_mode = if !compressed {
            CompressionMode::None
        } else if flags & FLAG_XYV != 0 {
            CompressionMode::Xyv
        } else {
            CompressionMode::Rle
        };

        Ok(Self {
            chip_active,
            matrix_table: (u16::from(matrix_high) << 2) | u16::from(chips >> 6),
            shutter_mode,
            compression_mode,
            linear_lut: flags & FLAG_LINEAR_LUT != 0,
            compressed,
            shutter_rate,
            start_time,
            file_id,
        })
    }

    /// Serialize to the 16-byte wire layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut chips = ((self.matrix_table & 0x03) as u8) << 6;
        for (i, active) in self.chip_active.iter().enumerate() {
            if *active {
                chips |= 1 << i;
            }
        }

        let mut flags = 0u8;
        if self.compressed {
            flags |= FLAG_COMPRESSED;
        }
        if self.linear_lut {
            flags |= FLAG_LINEAR_LUT;
        }
        if self.compression_mode == CompressionMode::Xyv {
            flags |= FLAG_XYV;
        }

        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(&FILE_MAGIC.to_be_bytes());
        out[2] = chips;
        out[3] = (self.matrix_table >> 2) as u8;
        out[4..6].copy_from_slice(&self.shutter_mode.to_be_bytes());
        out[6] = flags;
        out[7] = self.shutter_rate;
        out[8..12].copy_from_slice(&self.start_time.to_be_bytes());
        out[12..16].copy_from_slice(&self.file_id.to_be_bytes());
        out
    }

    /// Ids of chips flagged active.
    pub fn active_chips(&self) -> impl Iterator<Item = u8> + '_ {
        self.chip_active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(i, _)| i as u8)
    }
}
