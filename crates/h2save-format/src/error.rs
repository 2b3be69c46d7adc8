use std::fmt;

/// Result type for h2save-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading a savefile
#[derive(Debug)]
pub enum Error {
    /// File does not start with the `SGB1` signature
    SignatureMismatch,

    /// Savefile version other than the supported one
    UnsupportedVersion(u32),

    /// Ran out of bytes in the middle of a field
    UnexpectedEof,

    /// Bytes left over after the last field
    TrailingBytes(usize),

    /// A length-prefixed string was not valid UTF-8
    Utf8(std::str::Utf8Error),

    /// The compressed lua state could not be decompressed
    Decompress(lz4_flex::block::DecompressError),

    /// The luabins blob is malformed or has an unexpected shape
    LuaState(String),

    /// Rendering the lua state as JSON failed
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SignatureMismatch => write!(f, "File does not begin with correct signature"),
            Error::UnsupportedVersion(version) => write!(
                f,
                "Savefile version is {}, only {} is supported",
                version,
                crate::SAVEFILE_VERSION
            ),
            Error::UnexpectedEof => write!(f, "Unexpected end of savefile while reading data"),
            Error::TrailingBytes(count) => {
                write!(f, "Found {} unexpected bytes at end of data", count)
            }
            Error::Utf8(err) => write!(f, "Could not decode utf-8: {}", err),
            Error::Decompress(err) => write!(f, "Failed to decompress lua state: {}", err),
            Error::LuaState(msg) => write!(f, "Unexpected lua state: {}", msg),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Utf8(err) => Some(err),
            Error::Decompress(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::SignatureMismatch
            | Error::UnsupportedVersion(_)
            | Error::UnexpectedEof
            | Error::TrailingBytes(_)
            | Error::LuaState(_) => None,
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Utf8(err)
    }
}

impl From<lz4_flex::block::DecompressError> for Error {
    fn from(err: lz4_flex::block::DecompressError) -> Self {
        Error::Decompress(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
