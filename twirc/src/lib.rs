/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # twirc
//!
//! An allocation-conscious parser for Twitch-flavored IRCv3 lines.
//!
//! A line is split into its tag section, prefix, command and parameter
//! span in one forward scan, and the tag section is decoded into ordered
//! key/value pairs with IRCv3 escapes resolved.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Spans borrow from the caller's buffer
//! - **Total**: Malformed lines degrade to empty spans instead of failing
//! - **Strict mode**: Opt-in rejection of command-less or over-long lines
//! - **Async ingestion**: Tokio codec and read loop for line streams
//!
//! ## Quick Start
//!
//! ```rust
//! use twirc::prelude::*;
//!
//! let msg = parse(b"@foo=bar\\sbaz :nick PRIVMSG #chan :hi there");
//! assert_eq!(msg.command, b"PRIVMSG");
//! assert_eq!(msg.params, b"#chan :hi there");
//! assert_eq!(msg.tag_str("foo"), Some("bar baz"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Message and tag types, configuration and errors
//! - [`parser`]: Line splitting, tag decoding and encoding
//! - [`transport`]: Line framing and ingestion

pub mod core {
    //! Message and tag types, configuration and errors.
    pub use twirc_core::*;
}

pub mod parser {
    //! Line splitting, tag decoding and encoding.
    pub use twirc_parser::*;
}

pub mod transport {
    //! Line framing and ingestion.
    pub use twirc_transport::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use twirc_core::{
        EncodeError, Message, OwnedMessage, OwnedTag, ParseError, ParserConfig, Result, Tag,
        TagList, TwircError,
    };

    // Parsing and encoding
    pub use twirc_parser::{Encoder, Parser, decode_tags, encode_message, parse, parse_str};

    // Transport
    pub use twirc_transport::{CodecError, LineCodec, for_each_message};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let msg = parse_str("PING :tmi.twitch.tv");
        assert_eq!(msg.command_str().unwrap(), "PING");
        let _codec = LineCodec::new();
        let _parser = Parser::with_config(ParserConfig::strict());
    }

    #[test]
    fn test_error_conversion() {
        let err: TwircError = Parser::strict().parse(b"").unwrap_err().into();
        assert!(matches!(err, TwircError::Parse(ParseError::EmptyCommand)));
    }
}
