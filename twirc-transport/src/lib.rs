/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! # twirc Transport
//!
//! Line framing and ingestion for the twirc IRCv3 parser.
//!
//! This crate provides:
//! - **Codec**: Tokio codec for `\r\n` line framing
//! - **Ingestion**: An async loop that parses every line from an `AsyncRead`

pub mod codec;
pub mod ingest;

pub use codec::{CodecError, LineCodec};
pub use ingest::for_each_message;
