use anyhow::Result;
use serde::Serialize;
use solana_sdk::signature::Signer;
use xnft_solana_client::{LedgerRpc, SolanaLedger, CLIENT_VERSION};

use crate::args::Cli;
use crate::output;
use crate::solana::client::{config_from, load_signer};

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub version: &'static str,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut checks = Vec::new();
    let cfg = config_from(cli)?;

    let ledger = SolanaLedger::new(&cfg.rpc_url, cfg.commitment);
    let pb = output::spinner("contacting rpc");
    let rpc = ledger.latest_blockhash().await;
    pb.finish_and_clear();
    checks.push(Check {
        name: "rpc".to_string(),
        ok: rpc.is_ok(),
        detail: match rpc {
            Ok(hash) => format!("{} (blockhash {hash})", ledger.url()),
            Err(e) => e.to_string(),
        },
    });

    // A signer is optional: without one the CLI is read-only.
    let signer = match &cli.keypair {
        Some(path) => match load_signer(path) {
            Ok(s) => Check {
                name: "signer".to_string(),
                ok: true,
                detail: s.pubkey().to_string(),
            },
            Err(e) => Check {
                name: "signer".to_string(),
                ok: false,
                detail: e.to_string(),
            },
        },
        None => Check {
            name: "signer".to_string(),
            ok: true,
            detail: "none (read-only)".to_string(),
        },
    };
    checks.push(signer);

    checks.push(Check {
        name: "program".to_string(),
        ok: true,
        detail: cfg.program_id.to_string(),
    });

    let ok = checks.iter().all(|c| c.ok);
    if !ok {
        output::eprintln_line("one or more checks failed");
    }
    output::print(&DoctorOut {
        ok,
        version: CLIENT_VERSION,
        checks,
    })
}
