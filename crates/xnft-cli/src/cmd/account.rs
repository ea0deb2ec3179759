use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;
use xnft_core::model::Kind;

use crate::args::Cli;
use crate::output;
use crate::solana::client::{connect, parse_pubkey};

#[derive(Debug, Serialize)]
struct ListOut<T> {
    count: usize,
    items: Vec<T>,
}

impl<T> ListOut<T> {
    fn new(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

pub async fn show(cli: &Cli, address: &str, raw: bool) -> Result<()> {
    let address = parse_pubkey("xnft address", address)?;
    let client = connect(cli)?;
    let pb = output::spinner("fetching xnft");

    if raw {
        let record = client.get_record(&address).await;
        pb.finish_and_clear();
        return output::print(&record?);
    }
    let view = client.get_xnft(&address).await;
    pb.finish_and_clear();
    output::print(&view?)
}

pub async fn list(cli: &Cli, kind: Option<&str>, owner: Option<&str>) -> Result<()> {
    let kind = kind.map(Kind::from_str).transpose()?;
    let owner = owner.map(|o| parse_pubkey("owner", o)).transpose()?;
    let client = connect(cli)?;
    let pb = output::spinner("listing xnfts");

    let views = match owner {
        Some(owner) => client.list_owned(&owner, kind).await,
        None => client.list_xnfts(kind).await,
    };
    pb.finish_and_clear();
    output::print(&ListOut::new(views?))
}

pub async fn installs(cli: &Cli, wallet: &str) -> Result<()> {
    let wallet = parse_pubkey("wallet", wallet)?;
    let client = connect(cli)?;
    let pb = output::spinner("fetching installations");
    let items = client.get_installations(&wallet).await;
    pb.finish_and_clear();
    output::print(&ListOut::new(items?))
}

pub async fn reviews(cli: &Cli, xnft: &str) -> Result<()> {
    let xnft = parse_pubkey("xnft address", xnft)?;
    let client = connect(cli)?;
    let items = client.get_reviews(&xnft).await?;
    output::print(&ListOut::new(items))
}
