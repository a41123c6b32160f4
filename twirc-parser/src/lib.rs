/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # twirc Parser
//!
//! Zero-copy splitting and tag decoding for Twitch-flavored IRCv3 lines.
//!
//! A line is split into four spans in a single forward scan:
//!
//! ```text
//! @badge-info=;color=#FF0000 :nick!nick@nick.tmi.twitch.tv PRIVMSG #chan :hello
//!  \______ raw_tags ______/   \_________ prefix _________/ \command/ \ params /
//! ```
//!
//! The tag section is then decoded into ordered key/value pairs.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Spans and plain tag values reference the line
//! - **SIMD-accelerated**: Uses `memchr` for delimiter search
//! - **Permissive**: [`parse`] never fails; [`Parser`] adds opt-in checks
//! - **Encoding**: [`Encoder`] escapes tag values and rebuilds lines

pub mod encoder;
pub mod escape;
pub mod parser;
pub mod splitter;
pub mod tags;

pub use encoder::{Encoder, encode_message};
pub use escape::{escape_value, unescape_value};
pub use parser::{Parser, parse, parse_str};
pub use splitter::{LineSplitter, Spans, split_line};
pub use tags::{TagIter, decode_tag, decode_tags};
pub use twirc_core::message::Message;
