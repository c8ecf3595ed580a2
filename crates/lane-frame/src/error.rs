/// Errors raised by checked constructors of the data model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// A coordinate pair falls outside the 256x256 pixel grid.
    #[error("pixel coordinate ({x}, {y}) outside the 256x256 grid")]
    CoordinateOutOfRange { x: u32, y: u32 },

    /// A channel id outside 0-4.
    #[error("channel {0} out of range (expected 0-4)")]
    ChannelOutOfRange(u32),
}

pub type Result<T> = std::result::Result<T, FrameError>;
