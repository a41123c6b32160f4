/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Line parser.
//!
//! [`parse`] is the total entry point: it never fails, and a malformed
//! line degrades to empty spans. [`Parser`] layers [`ParserConfig`] on top
//! for callers that want over-long or command-less lines rejected.

use crate::splitter::split_line;
use crate::tags::decode_tags;
use twirc_core::config::ParserConfig;
use twirc_core::error::ParseError;
use twirc_core::message::Message;

/// Parses one protocol line.
///
/// The line must not include its terminator. Tags are decoded eagerly;
/// every other span is returned verbatim. A line with no command yields a
/// message whose `command` is empty.
///
/// # Example
/// ```
/// let msg = twirc_parser::parse(b"@foo=bar :nick PRIVMSG #chan :hi there");
/// assert_eq!(msg.raw_tags, b"foo=bar");
/// assert_eq!(msg.prefix, b"nick");
/// assert_eq!(msg.command, b"PRIVMSG");
/// assert_eq!(msg.params, b"#chan :hi there");
/// assert_eq!(msg.tag_str("foo"), Some("bar"));
/// ```
#[must_use]
pub fn parse(line: &[u8]) -> Message<'_> {
    let spans = split_line(line);
    Message::new(
        line,
        spans.raw_tags,
        decode_tags(spans.raw_tags),
        spans.prefix,
        spans.command,
        spans.params,
    )
}

/// Parses one protocol line given as a string slice.
#[inline]
#[must_use]
pub fn parse_str(line: &str) -> Message<'_> {
    parse(line.as_bytes())
}

/// Configurable line parser.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser with the permissive defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: ParserConfig::new(),
        }
    }

    /// Creates a parser that rejects lines without a command.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            config: ParserConfig::strict(),
        }
    }

    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the parser configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one protocol line.
    ///
    /// # Errors
    /// Returns `ParseError::LineTooLong` if the line exceeds the configured
    /// maximum, or `ParseError::EmptyCommand` if empty commands are
    /// rejected and the line has none.
    pub fn parse<'a>(&self, line: &'a [u8]) -> Result<Message<'a>, ParseError> {
        if line.len() > self.config.max_line_length {
            return Err(ParseError::LineTooLong {
                size: line.len(),
                max_size: self.config.max_line_length,
            });
        }

        let message = parse(line);
        if self.config.reject_empty_command && !message.has_command() {
            return Err(ParseError::EmptyCommand);
        }

        Ok(message)
    }
}
