use anyhow::Result;

use crate::args::Cli;
use crate::output;
use crate::solana::client::{connect, parse_pubkey};
use crate::solana::tx;

pub async fn install(cli: &Cli, xnft: &str, permissioned: bool) -> Result<()> {
    let xnft = parse_pubkey("xnft address", xnft)?;
    let client = connect(cli)?;
    let pb = output::spinner("installing");
    let sig = if permissioned {
        client.install_permissioned(&xnft).await
    } else {
        client.install(&xnft).await
    };
    pb.finish_and_clear();
    tx::report("install", sig?)
}

pub async fn uninstall(cli: &Cli, install: &str, receiver: Option<&str>) -> Result<()> {
    let install = parse_pubkey("install address", install)?;
    let receiver = receiver.map(|r| parse_pubkey("receiver", r)).transpose()?;
    let client = connect(cli)?;
    let sig = client.uninstall(&install, receiver).await?;
    tx::report("uninstall", sig)
}

pub async fn review(cli: &Cli, xnft: &str, rating: u8, uri: &str) -> Result<()> {
    let xnft = parse_pubkey("xnft address", xnft)?;
    let client = connect(cli)?;
    let pb = output::spinner("submitting review");
    let sig = client.review(&xnft, uri, rating).await;
    pb.finish_and_clear();
    tx::report("review", sig?)
}
