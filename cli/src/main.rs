// Copyright (c) 2026 weavetx contributors. MIT License.
// See LICENSE for details.

//! # weavetx
//!
//! Entry point for the `weavetx` binary. Parses CLI arguments, initializes
//! logging and dispatches to one of the subcommands:
//!
//! - `post`   : build, sign and submit a transaction
//! - `sign`   : build and sign, print the JSON record
//! - `verify` : check a signed JSON record offline
//! - `price`  : fee quote for a payload size
//! - `address`: wallet address of a key file

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use weavetx_protocol::crypto::keys::KeyMaterial;
use weavetx_protocol::network::{
    prepare, publish, ClientConfig, HttpNetworkClient, NetworkClient, PublishRequest,
};
use weavetx_protocol::transaction::{verify_transaction, Tag, Transaction};

use cli::{Commands, TxArgs, WeavetxCli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = WeavetxCli::parse();
    logging::init_logging("weavetx=info,weavetx_protocol=info", cli.log_format);

    match cli.command {
        Commands::Post(args) => post(&cli.node, args).await,
        Commands::Sign(args) => sign(&cli.node, args).await,
        Commands::Verify(args) => verify(&args.tx),
        Commands::Price(args) => price(&cli.node, args.bytes).await,
        Commands::Address(args) => {
            let key = load_key(&args.key)?;
            println!("{}", key.address());
            Ok(())
        }
    }
}

fn client(node: &str) -> Result<HttpNetworkClient> {
    HttpNetworkClient::new(ClientConfig::with_node(node))
        .with_context(|| format!("failed to create HTTP client for {node}"))
}

fn load_key(path: &Path) -> Result<KeyMaterial> {
    KeyMaterial::from_file(path)
        .with_context(|| format!("failed to load wallet key from {}", path.display()))
}

/// Reads the payload file and turns the remaining arguments into a request.
fn publish_request(args: &TxArgs) -> Result<PublishRequest> {
    let data = match &args.data {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))?,
        None => Vec::new(),
    };

    let mut request = PublishRequest::new(data).with_transfer(&args.target, &args.quantity);
    request.tags = args
        .tags
        .iter()
        .map(|(name, value)| Tag::new(name, value))
        .collect();
    Ok(request)
}

async fn post(node: &str, args: TxArgs) -> Result<()> {
    let key = load_key(&args.key.key)?;
    let request = publish_request(&args)?;
    let client = client(node)?;

    let published = publish(&client, &key, request)
        .await
        .with_context(|| format!("failed to publish transaction to {node}"))?;

    tracing::info!(
        id = published.transaction.id(),
        status = published.status.status,
        "transaction submitted"
    );
    println!("{}", published.transaction.id());
    Ok(())
}

async fn sign(node: &str, args: TxArgs) -> Result<()> {
    let key = load_key(&args.key.key)?;
    let request = publish_request(&args)?;
    let client = client(node)?;

    let tx = prepare(&client, &key, request)
        .await
        .context("failed to prepare transaction")?;
    println!("{}", tx.to_json().context("failed to serialize transaction")?);
    Ok(())
}

fn verify(path: &Path) -> Result<()> {
    let tx = read_transaction(path)?;
    verify_transaction(&tx).with_context(|| format!("transaction {} is invalid", tx.id()))?;
    println!("{} ok", tx.id());
    Ok(())
}

fn read_transaction(path: &Path) -> Result<Transaction> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Transaction::from_json(&json)
        .with_context(|| format!("{} is not a transaction record", path.display()))
}

async fn price(node: &str, bytes: u64) -> Result<()> {
    let fee = client(node)?
        .get_price(bytes)
        .await
        .with_context(|| format!("failed to fetch price from {node}"))?;
    println!("{fee}");
    Ok(())
}
