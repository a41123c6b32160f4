/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Message tag types.
//!
//! This module provides:
//! - [`Tag`]: A decoded `key=value` pair borrowing from the line buffer
//! - [`OwnedTag`]: An owned tag for storage and cross-thread transfer
//! - [`TagList`]: The inline-allocated tag sequence of a parsed message

use crate::error::ParseError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Number of tags stored inline before a [`TagList`] spills to the heap.
///
/// Twitch `PRIVMSG` lines typically carry around sixteen to twenty tags.
pub const INLINE_TAGS: usize = 24;

/// Ordered sequence of decoded tags.
pub type TagList<'a> = SmallVec<[Tag<'a>; INLINE_TAGS]>;

/// A single decoded message tag.
///
/// The key always borrows from the line. The value borrows as well unless
/// escape decoding had to rewrite it, in which case it owns a new buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag<'a> {
    /// The tag key, verbatim.
    pub key: &'a [u8],
    /// The unescaped tag value; empty when the tag had no value.
    pub value: Cow<'a, [u8]>,
}

impl<'a> Tag<'a> {
    /// Creates a new tag.
    ///
    /// # Arguments
    /// * `key` - The key bytes
    /// * `value` - The decoded value bytes
    #[inline]
    #[must_use]
    pub fn new(key: &'a [u8], value: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Returns the key as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the key is not valid UTF-8.
    pub fn key_str(&self) -> Result<&'a str, ParseError> {
        std::str::from_utf8(self.key).map_err(ParseError::from)
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn value_str(&self) -> Result<&str, ParseError> {
        std::str::from_utf8(&self.value).map_err(ParseError::from)
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub fn has_empty_value(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns true if the value still borrows from the line buffer.
    #[inline]
    #[must_use]
    pub fn is_borrowed(&self) -> bool {
        matches!(self.value, Cow::Borrowed(_))
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}",
            String::from_utf8_lossy(self.key),
            String::from_utf8_lossy(&self.value)
        )
    }
}

/// Owned message tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnedTag {
    /// The tag key.
    pub key: Bytes,
    /// The unescaped tag value.
    pub value: Bytes,
}

impl OwnedTag {
    /// Creates a new owned tag.
    #[must_use]
    pub fn new(key: impl Into<Bytes>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the key as a string slice, or `None` if it is not valid UTF-8.
    #[must_use]
    pub fn key_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.key).ok()
    }

    /// Returns the value as a string slice, or `None` if it is not valid UTF-8.
    #[must_use]
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

impl From<&Tag<'_>> for OwnedTag {
    fn from(tag: &Tag<'_>) -> Self {
        Self {
            key: Bytes::copy_from_slice(tag.key),
            value: Bytes::copy_from_slice(&tag.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_accessors() {
        let tag = Tag::new(b"display-name", &b"FELYP8"[..]);
        assert_eq!(tag.key_str().unwrap(), "display-name");
        assert_eq!(tag.value_str().unwrap(), "FELYP8");
        assert!(tag.is_borrowed());
        assert!(!tag.has_empty_value());
    }

    #[test]
    fn test_tag_owned_value() {
        let tag = Tag::new(b"msg", b"bar baz".to_vec());
        assert!(!tag.is_borrowed());
        assert_eq!(tag.value_str().unwrap(), "bar baz");
    }

    #[test]
    fn test_tag_invalid_utf8() {
        let tag = Tag::new(&[0xFF, 0xFE], &b""[..]);
        assert!(tag.key_str().is_err());
        assert!(tag.has_empty_value());
    }

    #[test]
    fn test_tag_display() {
        let tag = Tag::new(b"color", &b"#FFFF00"[..]);
        assert_eq!(tag.to_string(), "color=#FFFF00");
    }

    #[test]
    fn test_owned_tag_from_tag() {
        let tag = Tag::new(b"subscriber", &b"1"[..]);
        let owned = OwnedTag::from(&tag);
        assert_eq!(owned.key_str(), Some("subscriber"));
        assert_eq!(owned.value_str(), Some("1"));
    }
}
