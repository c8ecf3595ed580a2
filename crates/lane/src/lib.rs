//! Decoding and analysis of LUCID pixel-detector captures.
//!
//! # Crate Structure
//!
//! - [`frame`]: frames, pixel keys and per-channel storage
//! - [`lucid`]: the raw `.ldat` capture format (decoder and encoder)
//! - [`blob`]: 8-connected blob extraction over a frame
//! - [`text`]: the `.lane` intermediate text format
//!
//! ```
//! use lane::blob::find_blobs;
//! use lane::frame::{Frame, PixelKey, RawInput};
//! use lane::lucid::{FileHeader, LucidFile, LucidWriter};
//!
//! let mut frame = Frame::new(0, 1_400_000_000, 0);
//! frame.set_pixel(PixelKey::new(4, 4), 20);
//! frame.set_pixel(PixelKey::new(5, 5), 11);
//! let store = std::iter::once(frame).collect();
//!
//! let bytes = LucidWriter::encode_file(&FileHeader::default(), &store).unwrap();
//! let file = LucidFile::decode(&bytes).unwrap();
//! let blobs = find_blobs(&file.frames(0)[0], 1);
//! assert_eq!(blobs.len(), 1);
//! ```

/// Re-export data model types.
pub mod frame {
    pub use lane_frame::*;
}

/// Re-export capture format types.
pub mod lucid {
    pub use lane_lucid::*;
}

/// Re-export blob finding types.
pub mod blob {
    pub use lane_blob::*;
}

/// Re-export text format types.
pub mod text {
    pub use lane_text::*;
}
