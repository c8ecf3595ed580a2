//! Blob extraction for LUCID frames.
//!
//! A blob is a maximal group of 8-connected pixels whose magnitude reaches a
//! threshold. [`find_blobs`] partitions the qualifying pixels of one frame
//! into blobs; every qualifying pixel lands in exactly one blob.
//!
//! ```
//! use lane_blob::find_blobs;
//! use lane_frame::{Frame, PixelKey};
//!
//! let mut frame = Frame::new(0, 0, 0);
//! frame.set_pixel(PixelKey::new(10, 10), 4);
//! frame.set_pixel(PixelKey::new(11, 11), 2);
//! frame.set_pixel(PixelKey::new(40, 40), 9);
//!
//! let blobs = find_blobs(&frame, 1);
//! assert_eq!(blobs.len(), 2);
//! assert_eq!(blobs[0].len(), 2);
//! ```

pub mod blob;
pub mod finder;

pub use blob::{Blob, BlobStats};
pub use finder::{find_blobs, BlobConfig, DEFAULT_THRESHOLD};
