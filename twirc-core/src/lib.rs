/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # twirc Core
//!
//! Core types and error definitions for the twirc IRCv3 line parser.
//!
//! This crate provides the building blocks shared by the other twirc crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Configuration**: [`ParserConfig`] for the strict parser and line codec
//! - **Tag types**: [`Tag`], [`OwnedTag`] and the inline [`TagList`]
//! - **Message types**: [`Message`] and [`OwnedMessage`]
//!
//! ## Zero-Copy Design
//!
//! [`Message`] borrows every span from the caller's line buffer. Only tag
//! values rewritten by escape decoding own their bytes. [`OwnedMessage`]
//! is the `Bytes`-backed form for storage and cross-thread transfer.

pub mod config;
pub mod error;
pub mod message;
pub mod tag;

pub use config::{DEFAULT_MAX_LINE_LENGTH, ParserConfig};
pub use error::{EncodeError, ParseError, Result, TwircError};
pub use message::{Message, OwnedMessage};
pub use tag::{INLINE_TAGS, OwnedTag, Tag, TagList};
