//! Reads IRC lines from stdin and prints their parsed structure.
//!
//! ```text
//! printf '@foo=bar :nick PRIVMSG #chan :hi\r\n' | cargo run --example stdin_dump
//! ```
//!
//! Set `TWIRC_STRICT=1` to drop lines without a command.

use std::env;
use twirc::prelude::*;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn config_from_env() -> ParserConfig {
    let strict = env::var("TWIRC_STRICT").is_ok_and(|v| v == "1");
    let max_line_length = env::var("TWIRC_MAX_LINE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(twirc::core::DEFAULT_MAX_LINE_LENGTH);

    ParserConfig::new()
        .with_reject_empty_command(strict)
        .with_max_line_length(max_line_length)
}

#[tokio::main]
async fn main() -> std::result::Result<(), CodecError> {
    init_logging();
    let config = config_from_env();
    tracing::info!(?config, "reading lines from stdin");

    let delivered = for_each_message(tokio::io::stdin(), &config, |msg| {
        println!("command: {}", String::from_utf8_lossy(msg.command));
        if msg.has_prefix() {
            println!("  prefix: {}", String::from_utf8_lossy(msg.prefix));
        }
        for tag in &msg.tags {
            println!("  tag: {tag}");
        }
        if !msg.params.is_empty() {
            println!("  params: {}", String::from_utf8_lossy(msg.params));
        }
    })
    .await?;

    tracing::info!(delivered, "done");
    Ok(())
}
