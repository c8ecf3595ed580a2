use lane_frame::MAGNITUDE_MASK;

/// Control word that opens a frame header.
pub const FRAME_MARKER: u16 = 0xDCDF;

/// Largest count one zero-run word can carry.
pub const ZERO_RUN_MAX: u16 = 0x7FFF;

/// Largest magnitude a payload word can carry (the `10` tag leaves 14 bits).
pub const PAYLOAD_MAX: u16 = 0x3FFF;

const ZERO_RUN_FLAG: u16 = 0x8000;
const TAG_MASK: u16 = 0xC000;
const PAYLOAD_TAG: u16 = 0x8000;
const CONTROL_TAG: u16 = 0xC000;

const CHANNEL_FIELD_SHIFT: u16 = 8;
const CHANNEL_FIELD_MASK: u16 = 0x1F;

/// One-hot bits of the channel field, tested in this order.
const CHANNEL_BITS: [(u8, u8); 5] = [(0x01, 0), (0x02, 1), (0x04, 2), (0x08, 3), (0x10, 4)];

/// A classified 16-bit wire word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    /// Skip this many raster positions.
    ZeroRun(u16),
    /// One raster position with this magnitude.
    Payload(u16),
    Control(Control),
}

/// The two kinds of control word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start of a frame header ([`FRAME_MARKER`]).
    FrameStart,
    /// Channel marker carrying the raw 5-bit one-hot field from bits 8-12.
    Channel { field: u8 },
}

impl Word {
    /// Classify a word by its leading bits.
    pub fn classify(raw: u16) -> Self {
        if raw & ZERO_RUN_FLAG == 0 {
            Word::ZeroRun(raw & ZERO_RUN_MAX)
        } else if raw & TAG_MASK == PAYLOAD_TAG {
            Word::Payload(raw & MAGNITUDE_MASK)
        } else if raw == FRAME_MARKER {
            Word::Control(Control::FrameStart)
        } else {
            let field = (raw >> CHANNEL_FIELD_SHIFT) & CHANNEL_FIELD_MASK;
            Word::Control(Control::Channel { field: field as u8 })
        }
    }

    /// The wire value of this word. Counts and magnitudes wider than their
    /// field are truncated.
    pub fn to_raw(self) -> u16 {
        match self {
            Word::ZeroRun(count) => count & ZERO_RUN_MAX,
            Word::Payload(value) => PAYLOAD_TAG | (value & PAYLOAD_MAX),
            Word::Control(Control::FrameStart) => FRAME_MARKER,
            Word::Control(Control::Channel { field }) => {
                CONTROL_TAG | ((u16::from(field) & CHANNEL_FIELD_MASK) << CHANNEL_FIELD_SHIFT)
            }
        }
    }

    /// The channel marker selecting `channel`, or `None` above channel 4.
    pub fn channel_marker(channel: u8) -> Option<Self> {
        CHANNEL_BITS
            .iter()
            .find(|(_, id)| *id == channel)
            .map(|(bit, _)| Word::Control(Control::Channel { field: *bit }))
    }
}

impl Control {
    /// Decode a channel marker's one-hot field.
    ///
    /// Bits are tested from bit 0 (channel 0) to bit 4 (channel 4). Returns
    /// `None` for the frame marker and for fields with zero or several bits set.
    pub fn channel(self) -> Option<u8> {
        let Control::Channel { field } = self else {
            return None;
        };

        let mut selected = None;
        for (bit, id) in CHANNEL_BITS {
            if field & bit != 0 {
                if selected.is_some() {
                    return None;
                }
                selected = Some(id);
            }
        }
        selected
    }
}
