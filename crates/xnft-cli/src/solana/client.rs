use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::read_keypair_file;
use tracing::debug;
use xnft_core::config::{ClientConfig, Commitment};
use xnft_solana_client::{DynSigner, XnftClient};

use crate::args::Cli;

pub fn parse_pubkey(label: &str, s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s.trim()).map_err(|e| anyhow!("invalid {label} {s:?}: {e}"))
}

pub fn config_from(cli: &Cli) -> Result<ClientConfig> {
    if cli.rpc_url.trim().is_empty() {
        return Err(anyhow!("rpc url must not be empty"));
    }
    let mut cfg = ClientConfig::default()
        .with_rpc_url(cli.rpc_url.trim())
        .with_commitment(Commitment::parse(&cli.commitment)?);
    if let Some(id) = &cli.program_id {
        cfg = cfg.with_program_id(parse_pubkey("program id", id)?);
    }
    Ok(cfg)
}

pub fn load_signer(path: &str) -> Result<DynSigner> {
    let keypair = read_keypair_file(path).map_err(|e| anyhow!("reading keypair {path}: {e}"))?;
    Ok(Arc::new(keypair))
}

/// Client for the endpoint and signer named on the command line. Without a
/// keypair the client is read-only.
pub fn connect(cli: &Cli) -> Result<XnftClient> {
    let cfg = config_from(cli)?;
    let signer = cli.keypair.as_deref().map(load_signer).transpose()?;
    debug!(rpc = %cfg.rpc_url, signer = signer.is_some(), "connecting");
    XnftClient::connect(cfg, signer).context("building client")
}
