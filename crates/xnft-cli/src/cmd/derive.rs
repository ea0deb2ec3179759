use anyhow::Result;
use serde::Serialize;
use xnft_solana_client::pda;

use crate::args::{Cli, DeriveTarget};
use crate::output;
use crate::solana::client::{config_from, parse_pubkey};

#[derive(Debug, Serialize)]
pub struct DeriveOut {
    pub kind: &'static str,
    pub address: String,
    pub bump: u8,
}

/// Pure address derivation. Never contacts the RPC endpoint.
pub fn run(cli: &Cli, target: &DeriveTarget) -> Result<()> {
    let program_id = config_from(cli)?.program_id;

    let (kind, (address, bump)) = match target {
        DeriveTarget::Mint { name, publisher } => {
            let publisher = parse_pubkey("publisher", publisher)?;
            ("mint", pda::derive_master_mint(&program_id, name, &publisher)?)
        }
        DeriveTarget::Xnft { mint } => {
            let mint = parse_pubkey("mint", mint)?;
            ("xnft", pda::derive_xnft(&program_id, &mint)?)
        }
        DeriveTarget::Install { wallet, xnft } => {
            let wallet = parse_pubkey("wallet", wallet)?;
            let xnft = parse_pubkey("xnft address", xnft)?;
            ("install", pda::derive_install(&program_id, &wallet, &xnft)?)
        }
        DeriveTarget::Review { xnft, author } => {
            let xnft = parse_pubkey("xnft address", xnft)?;
            let author = parse_pubkey("author", author)?;
            ("review", pda::derive_review(&program_id, &xnft, &author)?)
        }
        DeriveTarget::Access { wallet, xnft } => {
            let wallet = parse_pubkey("wallet", wallet)?;
            let xnft = parse_pubkey("xnft address", xnft)?;
            ("access", pda::derive_access(&program_id, &wallet, &xnft)?)
        }
    };

    output::print(&DeriveOut {
        kind,
        address: address.to_string(),
        bump,
    })
}
