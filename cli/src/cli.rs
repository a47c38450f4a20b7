//! # CLI Interface
//!
//! Defines the command-line argument structure for `weavetx` using `clap`
//! derive. Global options select the node and log format; each subcommand
//! takes the wallet key where it needs one.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use weavetx_protocol::config::DEFAULT_NODE_URL;

use crate::logging::LogFormat;

/// Build, sign and submit weave storage transactions.
#[derive(Parser, Debug)]
#[command(
    name = "weavetx",
    about = "Build, sign and submit weave storage transactions",
    version,
    propagate_version = true
)]
pub struct WeavetxCli {
    /// Base URL of the node to talk to.
    #[arg(long, global = true, env = "WEAVETX_NODE", default_value = DEFAULT_NODE_URL)]
    pub node: String,

    /// Log output format on stderr.
    #[arg(long, global = true, env = "WEAVETX_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build, sign and submit a transaction.
    Post(TxArgs),
    /// Build and sign a transaction and print its JSON without submitting.
    Sign(TxArgs),
    /// Verify a signed transaction JSON file offline.
    Verify(VerifyArgs),
    /// Ask the node for the fee to store a number of bytes.
    Price(PriceArgs),
    /// Print the wallet address of a key file.
    Address(KeyArgs),
}

/// Location of the JWK wallet file.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Path to the JWK wallet file.
    #[arg(long, short = 'k', env = "WEAVETX_KEY")]
    pub key: PathBuf,
}

/// Arguments shared by `post` and `sign`.
#[derive(Args, Debug)]
pub struct TxArgs {
    #[command(flatten)]
    pub key: KeyArgs,

    /// File whose contents become the payload. Omit for an empty payload.
    #[arg(long, short = 'd')]
    pub data: Option<PathBuf>,

    /// Tag as `NAME=VALUE`. Repeatable; order is preserved.
    #[arg(long = "tag", short = 't', value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,

    /// Recipient address for a token transfer.
    #[arg(long, default_value = "")]
    pub target: String,

    /// Winston to transfer to `--target`.
    #[arg(long, default_value = "0")]
    pub quantity: String,
}

/// Arguments for `verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to a signed transaction in wire JSON.
    pub tx: PathBuf,
}

/// Arguments for `price`.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Payload size in bytes.
    pub bytes: u64,
}

/// Splits `NAME=VALUE` at the first `=`.
pub fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        WeavetxCli::command().debug_assert();
    }

    #[test]
    fn tag_splits_at_first_equals() {
        assert_eq!(
            parse_tag("Query=a=b").unwrap(),
            ("Query".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_tag("Empty=").unwrap().1, "");
    }

    #[test]
    fn tag_without_name_is_rejected() {
        assert!(parse_tag("=v").is_err());
        assert!(parse_tag("novalue").is_err());
    }

    #[test]
    fn post_collects_tags_in_order() {
        let cli = WeavetxCli::try_parse_from([
            "weavetx", "post", "--key", "w.json", "-t", "b=2", "-t", "a=1",
        ])
        .unwrap();
        let Commands::Post(args) = cli.command else {
            panic!("expected post");
        };
        assert_eq!(args.tags[0].0, "b");
        assert_eq!(args.tags[1].0, "a");
        assert_eq!(args.quantity, "0");
    }
}
