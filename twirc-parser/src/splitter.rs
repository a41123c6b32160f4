/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Zero-copy line splitter.
//!
//! Locates the tag, prefix, command and parameter spans of a single line
//! in one forward scan. Nothing is validated: a line missing a section
//! yields an empty span for it, and only the first space after each
//! section is consumed, so runs of spaces leak into the next span.

use memchr::memchr;

/// Marker byte that opens the tag section.
pub const TAG_MARKER: u8 = b'@';

/// Marker byte that opens the prefix.
pub const PREFIX_MARKER: u8 = b':';

/// Section delimiter.
pub const SPACE: u8 = b' ';

/// The four spans of a split line, each borrowing from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spans<'a> {
    /// Tag section without the leading `@`.
    pub raw_tags: &'a [u8],
    /// Prefix without the leading `:`.
    pub prefix: &'a [u8],
    /// Command token.
    pub command: &'a [u8],
    /// Everything after the command's separating space.
    pub params: &'a [u8],
}

/// Forward-only line splitter.
#[derive(Debug)]
pub struct LineSplitter<'a> {
    /// Input line.
    input: &'a [u8],
    /// Current position in the line.
    offset: usize,
}

impl<'a> LineSplitter<'a> {
    /// Creates a new splitter for the given line.
    ///
    /// # Arguments
    /// * `input` - One protocol line without its terminator
    #[inline]
    #[must_use]
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Splits the line into its spans.
    #[must_use]
    pub fn split(mut self) -> Spans<'a> {
        let raw_tags = self.marked_section(TAG_MARKER);
        let prefix = self.marked_section(PREFIX_MARKER);
        let command = self.take_token(self.offset);
        // A command that ran to end of line leaves the cursor at the end,
        // so the remainder is empty.
        let params = self.remaining();

        Spans {
            raw_tags,
            prefix,
            command,
            params,
        }
    }

    /// Returns the section opened by `marker` at the cursor, or an empty
    /// span if the cursor is not on `marker`.
    #[inline]
    fn marked_section(&mut self, marker: u8) -> &'a [u8] {
        if self.input.get(self.offset) == Some(&marker) {
            self.take_token(self.offset + 1)
        } else {
            &self.input[self.offset..self.offset]
        }
    }

    /// Returns the bytes from `start` to the next space (or end of line)
    /// and moves the cursor past that space.
    #[inline]
    fn take_token(&mut self, start: usize) -> &'a [u8] {
        let rest = &self.input[start..];
        match memchr(SPACE, rest) {
            Some(pos) => {
                self.offset = start + pos + 1;
                &rest[..pos]
            }
            None => {
                self.offset = self.input.len();
                rest
            }
        }
    }

    /// Returns the current offset in the line.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the unconsumed remainder of the line.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }
}

/// Splits a line into its spans.
#[inline]
#[must_use]
pub fn split_line(line: &[u8]) -> Spans<'_> {
    LineSplitter::new(line).split()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_full_line() {
        let spans =
            split_line(b"@foo=bar :user!user@user.tmi.twitch.tv PRIVMSG #pajlada :this is a test");
        assert_eq!(spans.raw_tags, b"foo=bar");
        assert_eq!(spans.prefix, b"user!user@user.tmi.twitch.tv");
        assert_eq!(spans.command, b"PRIVMSG");
        assert_eq!(spans.params, b"#pajlada :this is a test");
    }

    #[test]
    fn test_split_command_only() {
        let spans = split_line(b"PING :tmi.twitch.tv");
        assert_eq!(spans.raw_tags, b"");
        assert_eq!(spans.prefix, b"");
        assert_eq!(spans.command, b"PING");
        assert_eq!(spans.params, b":tmi.twitch.tv");
    }

    #[test]
    fn test_split_tags_without_prefix() {
        let spans = split_line(b"@a=1 PING x");
        assert_eq!(spans.raw_tags, b"a=1");
        assert_eq!(spans.prefix, b"");
        assert_eq!(spans.command, b"PING");
        assert_eq!(spans.params, b"x");
    }

    #[test]
    fn test_split_prefix_without_tags() {
        let spans = split_line(b":tmi.twitch.tv 001 justinfan :Welcome, GLHF!");
        assert_eq!(spans.raw_tags, b"");
        assert_eq!(spans.prefix, b"tmi.twitch.tv");
        assert_eq!(spans.command, b"001");
        assert_eq!(spans.params, b"justinfan :Welcome, GLHF!");
    }

    #[test]
    fn test_split_no_params() {
        let spans = split_line(b":tmi.twitch.tv RECONNECT");
        assert_eq!(spans.command, b"RECONNECT");
        assert_eq!(spans.params, b"");
    }

    #[test]
    fn test_split_preserves_case() {
        let spans = split_line(b"privmsg #c :x");
        assert_eq!(spans.command, b"privmsg");
    }

    #[test]
    fn test_split_empty_line() {
        assert_eq!(split_line(b""), Spans::default());
    }

    #[test]
    fn test_split_markers_only() {
        let spans = split_line(b"@a=b :prefix ");
        assert_eq!(spans.raw_tags, b"a=b");
        assert_eq!(spans.prefix, b"prefix");
        assert_eq!(spans.command, b"");
        assert_eq!(spans.params, b"");
    }

    #[test]
    fn test_split_unterminated_tag_section() {
        let spans = split_line(b"@a=b;c=d");
        assert_eq!(spans.raw_tags, b"a=b;c=d");
        assert_eq!(spans.prefix, b"");
        assert_eq!(spans.command, b"");
        assert_eq!(spans.params, b"");
    }

    #[test]
    fn test_split_extra_spaces_leak() {
        let spans = split_line(b":nick  PRIVMSG  #c");
        assert_eq!(spans.prefix, b"nick");
        assert_eq!(spans.command, b"");
        assert_eq!(spans.params, b"PRIVMSG  #c");
    }

    #[test]
    fn test_split_trailing_space_after_command() {
        let spans = split_line(b"PING ");
        assert_eq!(spans.command, b"PING");
        assert_eq!(spans.params, b"");
    }

    #[test]
    fn test_marker_only_recognised_at_cursor() {
        let spans = split_line(b"CMD @not-tags :not-prefix");
        assert_eq!(spans.raw_tags, b"");
        assert_eq!(spans.prefix, b"");
        assert_eq!(spans.command, b"CMD");
        assert_eq!(spans.params, b"@not-tags :not-prefix");
    }

    #[test]
    fn test_splitter_offset() {
        let mut splitter = LineSplitter::new(b"@t :p CMD a b");
        assert_eq!(splitter.marked_section(TAG_MARKER), b"t");
        assert_eq!(splitter.offset(), 3);
        assert_eq!(splitter.remaining(), b":p CMD a b");
    }
}
