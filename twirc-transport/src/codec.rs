/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Tokio codec for IRC line framing.
//!
//! This module provides a codec that splits a byte stream into `\n`
//! terminated lines, strips the optional `\r`, and bounds line length.
//! Frames are handed out without their terminator, ready for
//! [`twirc_parser::parse`].

use bytes::{BufMut, Bytes, BytesMut};
use memchr::memchr;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};
use twirc_core::config::ParserConfig;
use twirc_core::error::EncodeError;
use twirc_core::message::Message;
use twirc_parser::encode_message;

/// Errors that can occur during codec operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Line exceeds the maximum length.
    #[error("line too long: {size} bytes exceeds maximum {max_size}")]
    LineTooLong {
        /// Length seen so far.
        size: usize,
        /// Maximum allowed length.
        max_size: usize,
    },

    /// Outgoing message could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Outgoing raw line contains a line terminator.
    #[error("raw line contains a line terminator")]
    EmbeddedTerminator,

    /// I/O error.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

const LF: u8 = b'\n';
const CR: u8 = b'\r';
const CRLF: &[u8] = b"\r\n";

/// Tokio codec for IRC line framing.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Maximum line length in bytes, excluding the terminator.
    max_line_length: usize,
    /// Whether to strip a `\r` before the `\n`.
    strip_line_ending: bool,
    /// Whether over-long lines are skipped instead of failing the stream.
    discard_long_lines: bool,
    /// Whether the rest of an over-long line is being skipped.
    discarding: bool,
    /// Bytes already searched for a terminator.
    next_index: usize,
    /// Number of over-long lines skipped.
    discarded: u64,
}

impl LineCodec {
    /// Creates a new codec with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&ParserConfig::default())
    }

    /// Creates a codec using the line settings of `config`.
    #[must_use]
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            max_line_length: config.max_line_length,
            strip_line_ending: config.strip_line_ending,
            discard_long_lines: false,
            discarding: false,
            next_index: 0,
            discarded: 0,
        }
    }

    /// Sets the maximum line length.
    #[must_use]
    pub const fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// Sets whether over-long lines are skipped instead of returned as
    /// [`CodecError::LineTooLong`].
    #[must_use]
    pub const fn with_discard_long_lines(mut self, discard: bool) -> Self {
        self.discard_long_lines = discard;
        self
    }

    /// Returns the maximum line length.
    #[inline]
    #[must_use]
    pub const fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Returns the number of over-long lines skipped so far.
    #[inline]
    #[must_use]
    pub const fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Handles a line that is over the limit: skips it or fails.
    fn too_long(&mut self, size: usize) -> Result<(), CodecError> {
        if self.discard_long_lines {
            self.discarded += 1;
            warn!(
                size,
                max_size = self.max_line_length,
                "discarding over-long line"
            );
            Ok(())
        } else {
            Err(CodecError::LineTooLong {
                size,
                max_size: self.max_line_length,
            })
        }
    }

    /// Strips the terminator from a complete frame and checks its length.
    ///
    /// Returns `Ok(None)` if the frame was discarded.
    fn finish_frame(&mut self, mut frame: BytesMut) -> Result<Option<Bytes>, CodecError> {
        if frame.last() == Some(&LF) {
            frame.truncate(frame.len() - 1);
        }
        if self.strip_line_ending && frame.last() == Some(&CR) {
            frame.truncate(frame.len() - 1);
        }
        if frame.len() > self.max_line_length {
            self.too_long(frame.len())?;
            return Ok(None);
        }

        debug!(len = frame.len(), "framed line");
        Ok(Some(frame.freeze()))
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = Bytes;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let Some(pos) = memchr(LF, &src[self.next_index..]) else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }

                // One extra byte of slack for a `\r` that will be stripped.
                if src.len() > self.max_line_length + 1 {
                    let size = src.len();
                    self.too_long(size)?;
                    self.discarding = true;
                    src.clear();
                    self.next_index = 0;
                    return Ok(None);
                }

                self.next_index = src.len();
                return Ok(None);
            };

            let end = self.next_index + pos + 1;
            self.next_index = 0;
            let frame = src.split_to(end);

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if let Some(line) = self.finish_frame(frame)? {
                return Ok(Some(line));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        self.next_index = 0;
        if src.is_empty() || self.discarding {
            self.discarding = false;
            src.clear();
            return Ok(None);
        }

        // Final line without a terminator.
        let frame = src.split();
        self.finish_frame(frame)
    }
}

impl Encoder<&[u8]> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        if memchr::memchr2(CR, LF, item).is_some() {
            return Err(CodecError::EmbeddedTerminator);
        }
        dst.reserve(item.len() + CRLF.len());
        dst.put_slice(item);
        dst.put_slice(CRLF);
        Ok(())
    }
}

impl Encoder<&Message<'_>> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &Message<'_>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let line = encode_message(item)?;
        dst.reserve(line.len() + CRLF.len());
        dst.put_slice(&line);
        dst.put_slice(CRLF);
        Ok(())
    }
}
