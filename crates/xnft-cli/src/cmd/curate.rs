use anyhow::Result;

use crate::args::Cli;
use crate::solana::client::{connect, parse_pubkey};
use crate::solana::tx;

/// Verify or unverify the signer as curator of `xnft`.
pub async fn run(cli: &Cli, xnft: &str, verify: bool) -> Result<()> {
    let xnft = parse_pubkey("xnft address", xnft)?;
    let client = connect(cli)?;
    if verify {
        tx::report("verify", client.verify_curator(&xnft).await?)
    } else {
        tx::report("unverify", client.unverify_curator(&xnft).await?)
    }
}
