/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Parser configuration.
//!
//! This module provides the options shared by the strict parser and the
//! line codec.

use serde::{Deserialize, Serialize};

/// Default maximum line length: the IRCv3 8191-byte tag section limit plus
/// the 512-byte RFC 1459 message body.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 8191 + 512;

/// Configuration for parsing and framing lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Whether lines with an empty command are rejected.
    pub reject_empty_command: bool,
    /// Maximum line length in bytes, excluding the line terminator.
    pub max_line_length: usize,
    /// Whether a trailing `\r` is stripped from framed lines.
    pub strip_line_ending: bool,
}

impl ParserConfig {
    /// Creates a configuration with the permissive defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reject_empty_command: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            strip_line_ending: true,
        }
    }

    /// Creates a configuration that rejects lines without a command.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new().with_reject_empty_command(true)
    }

    /// Sets whether lines with an empty command are rejected.
    #[must_use]
    pub const fn with_reject_empty_command(mut self, reject: bool) -> Self {
        self.reject_empty_command = reject;
        self
    }

    /// Sets the maximum line length.
    #[must_use]
    pub const fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// Sets whether a trailing `\r` is stripped from framed lines.
    #[must_use]
    pub const fn with_strip_line_ending(mut self, strip: bool) -> Self {
        self.strip_line_ending = strip;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert!(!config.reject_empty_command);
        assert_eq!(config.max_line_length, 8703);
        assert!(config.strip_line_ending);
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::strict()
            .with_max_line_length(512)
            .with_strip_line_ending(false);
        assert!(config.reject_empty_command);
        assert_eq!(config.max_line_length, 512);
        assert!(!config.strip_line_ending);
    }
}
