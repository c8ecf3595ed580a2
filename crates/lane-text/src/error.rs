/// Errors that can occur while reading or writing `.lane` files.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The underlying reader or writer failed.
    #[error("lane file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line does not match the expected layout.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The input ended inside a frame or channel block.
    #[error("unexpected end of input after line {line}")]
    UnexpectedEof { line: usize },
}

pub type Result<T> = std::result::Result<T, TextError>;
