//! Decoded data model for LUCID detector captures.
//!
//! A capture is a set of time-stamped [`Frame`]s, each holding the hit pixels
//! of one detector channel on a fixed 256x256 grid. Frames are grouped by
//! channel in a [`ChannelStore`] in arrival order.
//!
//! Pixels are addressed by a packed [`PixelKey`] (`x * 256 + y`), which keeps
//! every stored coordinate inside the grid by construction.

pub mod channel;
pub mod error;
pub mod frame;
pub mod input;
pub mod pixel;
pub mod store;

pub use channel::{channel_name, checked_channel, is_valid_channel, CHANNEL_COUNT, MAX_CHANNEL};
pub use error::{FrameError, Result};
pub use frame::{Frame, MAGNITUDE_MASK};
pub use input::RawInput;
pub use pixel::{PixelKey, GRID_CELLS, GRID_SIDE};
pub use store::ChannelStore;
