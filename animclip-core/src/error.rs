use thiserror::Error;

use crate::version::Version;

/// Malformed binary data.
///
/// Raised before any allocation sized by an unchecked length, so a corrupt
/// count can never trigger a huge allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("truncated buffer at {position}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("negative {what} length {length} at {position}")]
    NegativeLength {
        what: &'static str,
        length: i32,
        position: usize,
    },

    #[error("{what} length {length} at {position} exceeds limit {limit}")]
    LengthTooLarge {
        what: &'static str,
        length: usize,
        limit: usize,
        position: usize,
    },

    #[error("string at {position} is not valid UTF-8")]
    InvalidUtf8 { position: usize },

    #[error("unknown class id {0}")]
    UnknownClassId(i32),

    #[error("path id {0} does not fit a 32-bit reference")]
    PathIdOutOfRange(i64),
}

/// Error type for decoding, encoding and schema-driven reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(Version),

    #[error("type tree node {name:?} has unknown type {type_name:?}")]
    UnknownNodeType { type_name: String, name: String },
}
