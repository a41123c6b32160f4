/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Tag section decoder.
//!
//! Splits the raw tag section (the bytes between `@` and the following
//! space) on `;` and each segment on its first `=`. Every segment yields
//! exactly one tag, so a non-empty section with `n` semicolons always
//! decodes to `n + 1` tags, degenerate segments included.

use crate::escape::unescape_value;
use memchr::memchr;
use std::borrow::Cow;
use twirc_core::tag::{Tag, TagList};

/// Separator between tags.
pub const TAG_SEPARATOR: u8 = b';';

/// Separator between a tag key and its value.
pub const KEY_VALUE_SEPARATOR: u8 = b'=';

/// Lazy iterator over the tags of a raw tag section.
#[derive(Debug, Clone)]
pub struct TagIter<'a> {
    /// Raw tag section.
    input: &'a [u8],
    /// Start of the next segment.
    offset: usize,
    /// Whether the last segment has been yielded.
    finished: bool,
}

impl<'a> TagIter<'a> {
    /// Creates an iterator over the given raw tag section.
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            finished: input.is_empty(),
        }
    }
}

impl<'a> Iterator for TagIter<'a> {
    type Item = Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let remaining = &self.input[self.offset..];
        let segment = match memchr(TAG_SEPARATOR, remaining) {
            Some(pos) => {
                self.offset += pos + 1;
                &remaining[..pos]
            }
            None => {
                self.finished = true;
                remaining
            }
        };

        Some(decode_tag(segment))
    }
}

impl std::iter::FusedIterator for TagIter<'_> {}

/// Decodes a raw tag section into an ordered tag list.
///
/// # Example
/// ```
/// use twirc_parser::decode_tags;
///
/// let tags = decode_tags(b"mis;key=value");
/// assert_eq!(tags.len(), 2);
/// assert_eq!(tags[0].key, b"mis");
/// assert!(tags[0].value.is_empty());
/// assert_eq!(&*tags[1].value, b"value");
/// ```
#[must_use]
pub fn decode_tags(raw_tags: &[u8]) -> TagList<'_> {
    TagIter::new(raw_tags).collect()
}

/// Decodes a single `key[=value]` segment.
#[inline]
#[must_use]
pub fn decode_tag(segment: &[u8]) -> Tag<'_> {
    match memchr(KEY_VALUE_SEPARATOR, segment) {
        Some(eq) => Tag::new(&segment[..eq], unescape_value(&segment[eq + 1..])),
        None => Tag::new(segment, Cow::Borrowed(&segment[segment.len()..])),
    }
}
