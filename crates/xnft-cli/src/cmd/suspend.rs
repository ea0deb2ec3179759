use anyhow::Result;

use crate::args::Cli;
use crate::solana::client::{connect, parse_pubkey};
use crate::solana::tx;

pub async fn run(cli: &Cli, xnft: &str, flag: bool) -> Result<()> {
    let xnft = parse_pubkey("xnft address", xnft)?;
    let client = connect(cli)?;
    let sig = client.set_suspended(&xnft, flag).await?;
    tx::report(if flag { "suspend" } else { "unsuspend" }, sig)
}
