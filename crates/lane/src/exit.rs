use std::fmt;
use std::io;

use lane_lucid::LucidError;
use lane_text::TextError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => FAILURE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn lucid_error(context: &str, err: LucidError) -> CliError {
    match err {
        LucidError::Io(source) => io_error(context, source),
        LucidError::Format(_) | LucidError::Truncated { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

pub fn text_error(context: &str, err: TextError) -> CliError {
    match err {
        TextError::Io(source) => io_error(context, source),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_lucid::FormatError;

    #[test]
    fn malformed_capture_is_data_invalid() {
        let err = lucid_error("decode", FormatError::BadMagic { found: 0 }.into());
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("decode: "));
    }

    #[test]
    fn missing_file_is_usage() {
        let err = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn lucid_io_maps_through_io_kind() {
        let err = lucid_error(
            "open",
            LucidError::Io(io::Error::from(io::ErrorKind::PermissionDenied)),
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
