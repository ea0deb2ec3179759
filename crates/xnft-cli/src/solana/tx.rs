use anyhow::Result;
use serde::Serialize;
use solana_sdk::signature::Signature;

use crate::output;

#[derive(Debug, Serialize)]
pub struct TxOut {
    pub operation: String,
    pub signature: String,
}

/// Report a confirmed transaction.
pub fn report(operation: &str, signature: Signature) -> Result<()> {
    output::success(&format!("{operation} confirmed"));
    output::print(&TxOut {
        operation: operation.to_string(),
        signature: signature.to_string(),
    })
}
