use anyhow::Result;

use crate::args::Cli;
use crate::solana::client::{connect, parse_pubkey};
use crate::solana::tx;

pub async fn run(cli: &Cli, xnft: &str, burn: bool, receiver: Option<&str>) -> Result<()> {
    let xnft = parse_pubkey("xnft address", xnft)?;
    let receiver = receiver
        .map(|r| parse_pubkey("receiver", r))
        .transpose()?;
    let client = connect(cli)?;
    let sig = client.delete_xnft(&xnft, receiver, burn).await?;
    tx::report("delete_xnft", sig)
}
