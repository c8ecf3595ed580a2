use lane_frame::PixelKey;

/// Structural violations of the capture format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The file does not start with the LUCID magic.
    #[error("invalid file magic {found:#06x} (expected 0xdccc)")]
    BadMagic { found: u16 },

    /// The file cannot hold a header and one frame's framing.
    #[error("file too short ({len} bytes, need at least {min})")]
    FileTooShort { len: usize, min: usize },

    /// A frame header did not start with the frame marker.
    #[error("expected frame marker at offset {offset}, found {found:#06x}")]
    BadFrameMarker { offset: usize, found: u16 },

    /// A channel marker was required but another word was found.
    #[error("expected channel marker at offset {offset}, found {found:#06x}")]
    ExpectedChannelMarker { offset: usize, found: u16 },

    /// The one-hot channel field had zero or several bits set.
    #[error("invalid channel field {field:#07b} at offset {offset}")]
    InvalidChannelField { offset: usize, field: u8 },

    /// A pixel was written after the raster cursor left the grid.
    #[error("pixel at raster position {position} (offset {offset}) is outside the grid")]
    RasterOverflow { offset: usize, position: u32 },
}

/// Errors that can occur while decoding or encoding LUCID captures.
#[derive(Debug, thiserror::Error)]
pub enum LucidError {
    /// The input violates the capture format.
    #[error("malformed capture: {0}")]
    Format(#[from] FormatError),

    /// The input ended before the current field was complete.
    #[error("truncated input at offset {offset}: need {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The capture file could not be read.
    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pixel magnitude does not fit in a payload word.
    #[error("magnitude {magnitude} at {key} exceeds payload maximum 16383")]
    MagnitudeTooLarge { key: PixelKey, magnitude: u16 },

    /// A frame names a channel the wire format cannot express.
    #[error("channel {0} cannot be encoded (expected 0-4)")]
    ChannelOutOfRange(u8),
}

impl LucidError {
    /// True for structural format violations.
    pub fn is_format(&self) -> bool {
        matches!(self, LucidError::Format(_))
    }

    /// True when the input ended early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, LucidError::Truncated { .. })
    }
}

pub type Result<T> = std::result::Result<T, LucidError>;
