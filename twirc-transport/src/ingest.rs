/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Line ingestion loop.
//!
//! Drives a [`LineCodec`] over any `AsyncRead` and parses each line as it
//! arrives. Malformed or over-long lines are logged and skipped so a
//! single bad line never ends a long-running read loop.

use crate::codec::{CodecError, LineCodec};
use futures_util::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{debug, trace, warn};
use twirc_core::config::ParserConfig;
use twirc_core::message::Message;
use twirc_parser::Parser;

/// Reads lines from `reader`, parses them, and calls `handler` for each
/// parsed message.
///
/// Blank lines are skipped. Lines rejected by a [`Parser`] built from
/// `config` (for example command-less lines under a strict configuration)
/// are logged and skipped, as are lines longer than
/// `config.max_line_length`.
///
/// # Arguments
/// * `reader` - The line source
/// * `config` - Parser and framing configuration
/// * `handler` - Called once per parsed message, in stream order
///
/// # Returns
/// The number of messages passed to `handler`.
///
/// # Errors
/// Returns `CodecError::Io` if reading from `reader` fails.
pub async fn for_each_message<R, F>(
    reader: R,
    config: &ParserConfig,
    mut handler: F,
) -> Result<u64, CodecError>
where
    R: AsyncRead + Unpin,
    F: FnMut(Message<'_>),
{
    let parser = Parser::with_config(config.clone());
    let codec = LineCodec::from_config(config).with_discard_long_lines(true);
    let mut lines = FramedRead::new(reader, codec);
    let mut delivered: u64 = 0;

    while let Some(line) = lines.next().await {
        let line = line?;
        if line.is_empty() {
            trace!("skipping blank line");
            continue;
        }

        match parser.parse(&line) {
            Ok(message) => {
                trace!(command = %String::from_utf8_lossy(message.command), "parsed line");
                delivered += 1;
                handler(message);
            }
            Err(err) => warn!(error = %err, "dropping line"),
        }
    }

    debug!(
        delivered,
        discarded = lines.decoder().discarded(),
        "line source exhausted"
    );
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STREAM: &[u8] = b"@badge-info=;color=#FF0000 :nick!nick@nick.tmi.twitch.tv PRIVMSG #chan :hello\r\n\
PING :tmi.twitch.tv\r\n\
\r\n\
@a=b :prefix \r\n\
:tmi.twitch.tv RECONNECT";

    #[tokio::test]
    async fn test_for_each_message_permissive() {
        let mut commands = Vec::new();
        let delivered = for_each_message(STREAM, &ParserConfig::default(), |msg| {
            commands.push(msg.command.to_vec());
        })
        .await
        .unwrap();

        assert_eq!(delivered, 4);
        assert_eq!(
            commands,
            vec![
                b"PRIVMSG".to_vec(),
                b"PING".to_vec(),
                Vec::new(),
                b"RECONNECT".to_vec(),
            ]
        );
    }

    #[tokio::test]
    async fn test_for_each_message_strict_skips_empty_command() {
        let mut count = 0;
        let delivered = for_each_message(STREAM, &ParserConfig::strict(), |msg| {
            assert!(msg.has_command());
            count += 1;
        })
        .await
        .unwrap();

        assert_eq!(delivered, 3);
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_for_each_message_skips_long_lines() {
        let config = ParserConfig::default().with_max_line_length(32);
        let mut tags = Vec::new();
        let delivered = for_each_message(STREAM, &config, |msg| {
            tags.push(msg.tag_count());
        })
        .await
        .unwrap();

        assert_eq!(delivered, 3);
        assert_eq!(tags, vec![0, 1, 0]);
    }

    #[tokio::test]
    async fn test_for_each_message_owned_copies() {
        let mut owned = Vec::new();
        for_each_message(STREAM, &ParserConfig::default(), |msg| {
            owned.push(msg.to_owned());
        })
        .await
        .unwrap();

        assert_eq!(owned[0].tag(b"color"), Some(&b"#FF0000"[..]));
        assert_eq!(owned[0].tag(b"badge-info"), Some(&b""[..]));
        assert_eq!(owned[1].params(), b":tmi.twitch.tv");
    }
}
