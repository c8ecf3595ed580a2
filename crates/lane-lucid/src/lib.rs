//! Decoder for raw LUCID detector captures (`.ldat`).
//!
//! A capture is a 16-byte header followed by a stream of 16-bit big-endian
//! words:
//! - `0xxxxxxx xxxxxxxx`: run of `x` empty pixels
//! - `10xxxxxx xxxxxxxx`: one pixel with magnitude `x`
//! - `11xxxxxx xxxxxxxx`: control word (frame marker or channel marker)
//!
//! Decoding is all-or-nothing. The stream has no resynchronization point, so
//! any malformed or truncated input rejects the whole file.

pub mod decoder;
pub mod endian;
pub mod error;
pub mod file;
pub mod header;
pub mod reader;
pub mod word;
pub mod writer;

pub use decoder::{decode, DecodeConfig, FrameStreamDecoder, RasterCursor};
pub use endian::Endian;
pub use error::{FormatError, LucidError, Result};
pub use file::LucidFile;
pub use header::{CompressionMode, FileHeader, FILE_MAGIC, HEADER_SIZE, MIN_FILE_SIZE};
pub use reader::WordReader;
pub use word::{Control, Word, FRAME_MARKER, PAYLOAD_MAX, ZERO_RUN_MAX};
pub use writer::LucidWriter;
