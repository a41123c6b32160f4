/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types for the twirc IRCv3 line parser.
//!
//! The default parse path is total and never produces these errors. They
//! surface only from the strict `Parser` in `twirc-parser`, from the UTF-8
//! accessors on parsed spans, and from the encoder.

use thiserror::Error;

/// Result type alias using [`TwircError`] as the error type.
pub type Result<T> = std::result::Result<T, TwircError>;

/// Top-level error type for all twirc operations.
#[derive(Debug, Error)]
pub enum TwircError {
    /// Error while parsing a line.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error while encoding a line.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// I/O error from the underlying line source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while parsing a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no command token.
    #[error("line has no command")]
    EmptyCommand,

    /// The line exceeds the configured maximum length.
    #[error("line too long: {size} bytes exceeds maximum {max_size}")]
    LineTooLong {
        /// Actual line length in bytes.
        size: usize,
        /// Maximum allowed length in bytes.
        max_size: usize,
    },

    /// A span was requested as text but is not valid UTF-8.
    #[error("invalid utf-8 in span: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors that occur while encoding a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// No command was supplied.
    #[error("missing command")]
    MissingCommand,

    /// A tag key is empty.
    #[error("empty tag key")]
    EmptyKey,

    /// A span contains a byte that cannot appear in it on the wire.
    #[error("invalid byte 0x{byte:02x} in {section}")]
    InvalidByte {
        /// The section being encoded (e.g. "tag key", "prefix").
        section: &'static str,
        /// The offending byte.
        byte: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::LineTooLong {
            size: 9000,
            max_size: 8703,
        };
        assert_eq!(
            err.to_string(),
            "line too long: 9000 bytes exceeds maximum 8703"
        );
        assert_eq!(ParseError::EmptyCommand.to_string(), "line has no command");
    }

    #[test]
    fn test_twirc_error_from_parse() {
        let err: TwircError = ParseError::EmptyCommand.into();
        assert!(matches!(err, TwircError::Parse(ParseError::EmptyCommand)));
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidByte {
            section: "prefix",
            byte: b' ',
        };
        assert_eq!(err.to_string(), "invalid byte 0x20 in prefix");
    }
}
