/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! IRCv3 line encoder.
//!
//! This module provides an encoder for building protocol lines from tags,
//! prefix, command and parameters. Tag values are escaped; every other
//! section is written verbatim after checking it cannot break the line
//! structure. The line terminator is not written.

use crate::escape::escape_value_into;
use crate::splitter::{PREFIX_MARKER, SPACE, TAG_MARKER};
use crate::tags::{KEY_VALUE_SEPARATOR, TAG_SEPARATOR};
use bytes::{BufMut, BytesMut};
use twirc_core::error::EncodeError;
use twirc_core::message::Message;

/// Protocol line encoder.
///
/// Tags are appended in call order. Prefix, command and parameters may be
/// set in any order and are laid out as `@tags :prefix command params`.
/// Tags with an empty value are written as a bare key.
#[derive(Debug, Default)]
pub struct Encoder {
    /// Escaped tag section, without the leading `@`.
    tags: BytesMut,
    /// Prefix, without the leading `:`.
    prefix: BytesMut,
    /// Command token.
    command: BytesMut,
    /// Parameter span.
    params: BytesMut,
}

impl Encoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag.
    ///
    /// # Arguments
    /// * `key` - The tag key
    /// * `value` - The decoded value; escaped on write
    ///
    /// # Errors
    /// Returns `EncodeError::EmptyKey` if the key is empty, or
    /// `EncodeError::InvalidByte` if it contains a separator, space or line
    /// break.
    pub fn put_tag(&mut self, key: &[u8], value: &[u8]) -> Result<(), EncodeError> {
        check_key(key)?;

        if !self.tags.is_empty() {
            self.tags.put_u8(TAG_SEPARATOR);
        }
        self.tags.put_slice(key);
        if !value.is_empty() {
            self.tags.put_u8(KEY_VALUE_SEPARATOR);
            escape_value_into(value, &mut self.tags);
        }
        Ok(())
    }

    /// Appends a tag with string key and value.
    ///
    /// # Errors
    /// See [`Encoder::put_tag`].
    #[inline]
    pub fn put_tag_str(&mut self, key: &str, value: &str) -> Result<(), EncodeError> {
        self.put_tag(key.as_bytes(), value.as_bytes())
    }

    /// Sets the prefix. An empty prefix omits the section.
    ///
    /// # Errors
    /// Returns `EncodeError::InvalidByte` if the prefix contains a space or
    /// line break.
    pub fn set_prefix(&mut self, prefix: &[u8]) -> Result<(), EncodeError> {
        check_token("prefix", prefix)?;
        self.prefix.clear();
        self.prefix.put_slice(prefix);
        Ok(())
    }

    /// Sets the command.
    ///
    /// # Errors
    /// Returns `EncodeError::InvalidByte` if the command contains a space or
    /// line break.
    pub fn set_command(&mut self, command: &[u8]) -> Result<(), EncodeError> {
        check_token("command", command)?;
        self.command.clear();
        self.command.put_slice(command);
        Ok(())
    }

    /// Sets the raw parameter span, including any `:` trailing marker.
    ///
    /// # Errors
    /// Returns `EncodeError::InvalidByte` if the span contains a line break
    /// or NUL.
    pub fn set_params(&mut self, params: &[u8]) -> Result<(), EncodeError> {
        if let Some(&byte) = params.iter().find(|&&b| is_forbidden(b)) {
            return Err(EncodeError::InvalidByte {
                section: "params",
                byte,
            });
        }
        self.params.clear();
        self.params.put_slice(params);
        Ok(())
    }

    /// Returns the number of bytes [`Encoder::finish`] would produce.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        let mut len = self.command.len();
        if !self.tags.is_empty() {
            len += self.tags.len() + 2;
        }
        if !self.prefix.is_empty() {
            len += self.prefix.len() + 2;
        }
        if !self.params.is_empty() {
            len += self.params.len() + 1;
        }
        len
    }

    /// Finalizes the line.
    ///
    /// # Errors
    /// Returns `EncodeError::MissingCommand` if no command was set.
    pub fn finish(self) -> Result<BytesMut, EncodeError> {
        if self.command.is_empty() {
            return Err(EncodeError::MissingCommand);
        }

        let mut line = BytesMut::with_capacity(self.encoded_len());
        if !self.tags.is_empty() {
            line.put_u8(TAG_MARKER);
            line.put_slice(&self.tags);
            line.put_u8(SPACE);
        }
        if !self.prefix.is_empty() {
            line.put_u8(PREFIX_MARKER);
            line.put_slice(&self.prefix);
            line.put_u8(SPACE);
        }
        line.put_slice(&self.command);
        if !self.params.is_empty() {
            line.put_u8(SPACE);
            line.put_slice(&self.params);
        }

        Ok(line)
    }

    /// Clears the encoder for reuse.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.prefix.clear();
        self.command.clear();
        self.params.clear();
    }
}

/// Encodes a parsed message back into a line.
///
/// Tags are re-encoded from the decoded list, so a line in canonical form
/// (bare keys for empty values, minimal escaping) encodes to itself.
///
/// # Errors
/// Returns `EncodeError` if the message has no command or a span contains
/// a byte that cannot appear in it.
pub fn encode_message(message: &Message<'_>) -> Result<BytesMut, EncodeError> {
    let mut encoder = Encoder::new();
    for tag in &message.tags {
        encoder.put_tag(tag.key, &tag.value)?;
    }
    encoder.set_prefix(message.prefix)?;
    encoder.set_command(message.command)?;
    encoder.set_params(message.params)?;
    encoder.finish()
}

#[inline]
const fn is_forbidden(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n' | b'\0')
}

fn check_token(section: &'static str, token: &[u8]) -> Result<(), EncodeError> {
    match token.iter().find(|&&b| b == SPACE || is_forbidden(b)) {
        Some(&byte) => Err(EncodeError::InvalidByte { section, byte }),
        None => Ok(()),
    }
}

fn check_key(key: &[u8]) -> Result<(), EncodeError> {
    if key.is_empty() {
        return Err(EncodeError::EmptyKey);
    }
    match key
        .iter()
        .find(|&&b| b == TAG_SEPARATOR || b == KEY_VALUE_SEPARATOR)
    {
        Some(&byte) => Err(EncodeError::InvalidByte {
            section: "tag key",
            byte,
        }),
        None => check_token("tag key", key),
    }
}
