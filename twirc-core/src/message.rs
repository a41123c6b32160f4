/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Message types for IRCv3 lines.
//!
//! This module provides:
//! - [`Message`]: Zero-copy view into a single protocol line
//! - [`OwnedMessage`]: Owned message for storage and cross-thread transfer

use crate::error::ParseError;
use crate::tag::{OwnedTag, Tag, TagList};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Zero-copy view into a parsed protocol line.
///
/// Every span borrows from the line the message was parsed from. Absent
/// sections are empty spans, never `None`. Only tag values that needed
/// escape decoding own their bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<'a> {
    /// The complete line.
    line: &'a [u8],
    /// The unparsed tag section, without the leading `@`.
    pub raw_tags: &'a [u8],
    /// Tags decoded from `raw_tags`, in order of appearance.
    pub tags: TagList<'a>,
    /// The sender prefix, without the leading `:`.
    pub prefix: &'a [u8],
    /// The command, case preserved.
    pub command: &'a [u8],
    /// Everything after the command and its separating space, verbatim.
    pub params: &'a [u8],
}

impl<'a> Message<'a> {
    /// Creates a new Message from parsed components.
    ///
    /// # Arguments
    /// * `line` - The complete line
    /// * `raw_tags` - The tag section span
    /// * `tags` - Decoded tags
    /// * `prefix` - The prefix span
    /// * `command` - The command span
    /// * `params` - The parameter span
    #[must_use]
    pub fn new(
        line: &'a [u8],
        raw_tags: &'a [u8],
        tags: TagList<'a>,
        prefix: &'a [u8],
        command: &'a [u8],
        params: &'a [u8],
    ) -> Self {
        Self {
            line,
            raw_tags,
            tags,
            prefix,
            command,
            params,
        }
    }

    /// Returns the complete line this message was parsed from.
    #[inline]
    #[must_use]
    pub const fn line(&self) -> &'a [u8] {
        self.line
    }

    /// Returns the raw tag section as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the span is not valid UTF-8.
    pub fn raw_tags_str(&self) -> Result<&'a str, ParseError> {
        std::str::from_utf8(self.raw_tags).map_err(ParseError::from)
    }

    /// Returns the prefix as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the span is not valid UTF-8.
    pub fn prefix_str(&self) -> Result<&'a str, ParseError> {
        std::str::from_utf8(self.prefix).map_err(ParseError::from)
    }

    /// Returns the command as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the span is not valid UTF-8.
    pub fn command_str(&self) -> Result<&'a str, ParseError> {
        std::str::from_utf8(self.command).map_err(ParseError::from)
    }

    /// Returns the parameter span as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the span is not valid UTF-8.
    pub fn params_str(&self) -> Result<&'a str, ParseError> {
        std::str::from_utf8(self.params).map_err(ParseError::from)
    }

    /// Returns true if the line carried a non-empty tag section.
    #[inline]
    #[must_use]
    pub fn has_tags(&self) -> bool {
        !self.raw_tags.is_empty()
    }

    /// Returns true if the line carried a non-empty prefix.
    #[inline]
    #[must_use]
    pub fn has_prefix(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Returns true if a command was found.
    #[inline]
    #[must_use]
    pub fn has_command(&self) -> bool {
        !self.command.is_empty()
    }

    /// Returns the number of decoded tags.
    #[inline]
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Gets a tag by key.
    ///
    /// # Returns
    /// The first tag with the given key, or `None` if not found.
    #[must_use]
    pub fn tag(&self, key: &[u8]) -> Option<&Tag<'a>> {
        self.tags.iter().find(|t| t.key == key)
    }

    /// Gets a tag value as a string.
    ///
    /// # Returns
    /// The first matching value, or `None` if not found or invalid UTF-8.
    #[must_use]
    pub fn tag_str(&self, key: &str) -> Option<&str> {
        self.tag(key.as_bytes()).and_then(|t| t.value_str().ok())
    }

    /// Returns an iterator over every tag with the given key.
    pub fn tags_with<'s>(&'s self, key: &'s [u8]) -> impl Iterator<Item = &'s Tag<'a>> {
        self.tags.iter().filter(move |t| t.key == key)
    }

    /// Converts this borrowed message to an owned message.
    #[must_use]
    pub fn to_owned(&self) -> OwnedMessage {
        OwnedMessage::from_message(self)
    }
}

/// Owned protocol line for storage and cross-thread transfer.
///
/// Spans and borrowed tag values share one reference-counted copy of the
/// line. Tag values that were rewritten by escape decoding get their own
/// buffers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedMessage {
    line: Bytes,
    raw_tags: Bytes,
    tags: Vec<OwnedTag>,
    prefix: Bytes,
    command: Bytes,
    params: Bytes,
}

impl OwnedMessage {
    /// Creates an OwnedMessage from a borrowed message.
    ///
    /// # Arguments
    /// * `message` - The message to copy
    #[must_use]
    pub fn from_message(message: &Message<'_>) -> Self {
        let line = Bytes::copy_from_slice(message.line);
        let tags = message
            .tags
            .iter()
            .map(|t| {
                let value = match &t.value {
                    Cow::Borrowed(v) => share(&line, message.line, v),
                    Cow::Owned(v) => Bytes::copy_from_slice(v),
                };
                OwnedTag::new(share(&line, message.line, t.key), value)
            })
            .collect();

        Self {
            raw_tags: share(&line, message.line, message.raw_tags),
            prefix: share(&line, message.line, message.prefix),
            command: share(&line, message.line, message.command),
            params: share(&line, message.line, message.params),
            tags,
            line,
        }
    }

    /// Returns a borrowed view of this message.
    #[must_use]
    pub fn as_message(&self) -> Message<'_> {
        Message::new(
            &self.line,
            &self.raw_tags,
            self.tags
                .iter()
                .map(|t| Tag::new(&t.key, &t.value[..]))
                .collect(),
            &self.prefix,
            &self.command,
            &self.params,
        )
    }

    /// Returns the complete line.
    #[inline]
    #[must_use]
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// Returns the raw tag section.
    #[inline]
    #[must_use]
    pub fn raw_tags(&self) -> &[u8] {
        &self.raw_tags
    }

    /// Returns the decoded tags.
    #[inline]
    #[must_use]
    pub fn tags(&self) -> &[OwnedTag] {
        &self.tags
    }

    /// Returns the prefix.
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Returns the command.
    #[inline]
    #[must_use]
    pub fn command(&self) -> &[u8] {
        &self.command
    }

    /// Returns the parameter span.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Gets a tag value by key.
    ///
    /// # Returns
    /// The first matching value, or `None` if not found.
    #[must_use]
    pub fn tag(&self, key: &[u8]) -> Option<&[u8]> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| &t.value[..])
    }

    /// Consumes the message and returns the underlying line buffer.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.line
    }
}

/// Slices `span` out of `buffer` when it lies within `line`, which `buffer`
/// is a copy of; otherwise copies it.
fn share(buffer: &Bytes, line: &[u8], span: &[u8]) -> Bytes {
    let base = line.as_ptr() as usize;
    let ptr = span.as_ptr() as usize;
    if ptr >= base && ptr + span.len() <= base + line.len() {
        let start = ptr - base;
        buffer.slice(start..start + span.len())
    } else {
        Bytes::copy_from_slice(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    const LINE: &[u8] = b"@foo=bar;msg=a\\sb :nick PRIVMSG #chan :hi";

    fn sample<'a>() -> Message<'a> {
        Message::new(
            LINE,
            &LINE[1..17],
            smallvec![
                Tag::new(&LINE[1..4], &LINE[5..8]),
                Tag::new(&LINE[9..12], b"a b".to_vec()),
            ],
            &LINE[19..23],
            &LINE[24..31],
            &LINE[32..],
        )
    }

    #[test]
    fn test_message_accessors() {
        let msg = sample();
        assert_eq!(msg.raw_tags_str().unwrap(), "foo=bar;msg=a\\sb");
        assert_eq!(msg.prefix_str().unwrap(), "nick");
        assert_eq!(msg.command_str().unwrap(), "PRIVMSG");
        assert_eq!(msg.params_str().unwrap(), "#chan :hi");
        assert!(msg.has_tags());
        assert!(msg.has_prefix());
        assert!(msg.has_command());
        assert_eq!(msg.tag_count(), 2);
    }

    #[test]
    fn test_message_tag_lookup() {
        let msg = sample();
        assert_eq!(msg.tag_str("foo"), Some("bar"));
        assert_eq!(msg.tag_str("msg"), Some("a b"));
        assert!(msg.tag(b"missing").is_none());
    }

    #[test]
    fn test_message_duplicate_tags() {
        let msg = Message::new(
            b"",
            b"",
            smallvec![
                Tag::new(b"a", &b"1"[..]),
                Tag::new(b"b", &b"2"[..]),
                Tag::new(b"a", &b"3"[..]),
            ],
            b"",
            b"",
            b"",
        );
        let values: Vec<&[u8]> = msg.tags_with(b"a").map(|t| &t.value[..]).collect();
        assert_eq!(values, vec![&b"1"[..], &b"3"[..]]);
        assert_eq!(msg.tag_str("a"), Some("1"));
    }

    #[test]
    fn test_owned_message_roundtrip() {
        let owned = sample().to_owned();
        let msg = sample();

        assert_eq!(owned.line(), LINE);
        assert_eq!(owned.prefix(), b"nick");
        assert_eq!(owned.command(), b"PRIVMSG");
        assert_eq!(owned.params(), b"#chan :hi");
        assert_eq!(owned.tag(b"msg"), Some(&b"a b"[..]));
        assert_eq!(owned.tags().len(), 2);
        assert_eq!(owned.as_message(), msg);
    }

    #[test]
    fn test_owned_message_foreign_spans() {
        let msg = Message::new(b"PING", b"", TagList::new(), b"", b"PONG", b"");
        let owned = msg.to_owned();
        assert_eq!(owned.command(), b"PONG");
        assert!(owned.raw_tags().is_empty());
    }
}
