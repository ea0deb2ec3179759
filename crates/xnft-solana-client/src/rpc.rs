//! Ledger RPC collaborator.
//!
//! The SDK talks to the ledger only through [`LedgerRpc`]. [`SolanaLedger`] is
//! the production implementation over the nonblocking Solana RPC client; tests
//! substitute an in-memory ledger.

use async_trait::async_trait;
use futures::future::try_join_all;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType};
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_program::hash::Hash;
use solana_program::instruction::InstructionError;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::{Transaction, TransactionError};
use tracing::debug;
use xnft_core::config::Commitment;
use xnft_core::constants::MAX_MULTIPLE_ACCOUNTS;
use xnft_core::{XnftError, XnftResult};

use crate::translate::RawFailure;

/// Collection query filter over raw account bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    DataSize(u64),
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl AccountFilter {
    pub fn memcmp(offset: usize, bytes: impl AsRef<[u8]>) -> Self {
        Self::Memcmp {
            offset,
            bytes: bytes.as_ref().to_vec(),
        }
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Self::DataSize(n) => data.len() as u64 == *n,
            Self::Memcmp { offset, bytes } => data
                .get(*offset..offset + bytes.len())
                .map(|s| s == bytes.as_slice())
                .unwrap_or(false),
        }
    }
}

#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Raw account data, or `None` when the address holds no account.
    async fn fetch_account(&self, address: &Pubkey) -> XnftResult<Option<Vec<u8>>>;

    /// All accounts owned by `program_id` matching every filter.
    async fn fetch_accounts_by_filter(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> XnftResult<Vec<(Pubkey, Vec<u8>)>>;

    /// Accounts at `addresses`, in order. One request, so at most
    /// `MAX_MULTIPLE_ACCOUNTS` addresses; see [`fetch_multiple_chunked`].
    async fn fetch_multiple(&self, addresses: &[Pubkey]) -> XnftResult<Vec<Option<Vec<u8>>>>;

    async fn latest_blockhash(&self) -> XnftResult<Hash>;

    /// Submit a signed transaction and wait for confirmation.
    async fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature, RawFailure>;
}

/// [`LedgerRpc::fetch_multiple`] for any number of addresses. Requests of at
/// most `MAX_MULTIPLE_ACCOUNTS` run concurrently and results keep input order.
pub async fn fetch_multiple_chunked(
    rpc: &dyn LedgerRpc,
    addresses: &[Pubkey],
) -> XnftResult<Vec<Option<Vec<u8>>>> {
    let batches = try_join_all(
        addresses
            .chunks(MAX_MULTIPLE_ACCOUNTS)
            .map(|chunk| rpc.fetch_multiple(chunk)),
    )
    .await?;
    Ok(batches.into_iter().flatten().collect())
}

pub struct SolanaLedger {
    rpc: RpcClient,
}

impl SolanaLedger {
    pub fn new(rpc_url: &str, commitment: Commitment) -> Self {
        let commitment = match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        };
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
        }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

impl std::fmt::Debug for SolanaLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaLedger").field("url", &self.rpc.url()).finish()
    }
}

fn to_rpc_filter(filter: &AccountFilter) -> RpcFilterType {
    match filter {
        AccountFilter::DataSize(n) => RpcFilterType::DataSize(*n),
        AccountFilter::Memcmp { offset, bytes } => RpcFilterType::Memcmp(Memcmp::new(
            *offset,
            MemcmpEncodedBytes::Base58(bs58::encode(bytes).into_string()),
        )),
    }
}

/// Pull the custom code and program logs out of a client error.
fn raw_failure(err: ClientError) -> RawFailure {
    let code = match err.get_transaction_error() {
        Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) => Some(code),
        _ => None,
    };

    let logs = match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(sim),
            ..
        }) => sim.logs.clone().unwrap_or_default(),
        _ => Vec::new(),
    };

    RawFailure {
        code,
        logs,
        message: err.to_string(),
    }
}

#[async_trait]
impl LedgerRpc for SolanaLedger {
    async fn fetch_account(&self, address: &Pubkey) -> XnftResult<Option<Vec<u8>>> {
        let resp = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .map_err(|e| XnftError::rpc(e.to_string()))?;
        Ok(resp.value.map(|a| a.data))
    }

    async fn fetch_accounts_by_filter(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> XnftResult<Vec<(Pubkey, Vec<u8>)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.iter().map(to_rpc_filter).collect()),
            account_config: RpcAccountInfoConfig {
                commitment: Some(self.rpc.commitment()),
                ..Default::default()
            },
            ..Default::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| XnftError::rpc(e.to_string()))?;
        debug!(program = %program_id, count = accounts.len(), "collection query");
        Ok(accounts.into_iter().map(|(k, a)| (k, a.data)).collect())
    }

    async fn fetch_multiple(&self, addresses: &[Pubkey]) -> XnftResult<Vec<Option<Vec<u8>>>> {
        let accounts = self
            .rpc
            .get_multiple_accounts(addresses)
            .await
            .map_err(|e| XnftError::rpc(e.to_string()))?;
        Ok(accounts.into_iter().map(|a| a.map(|a| a.data)).collect())
    }

    async fn latest_blockhash(&self) -> XnftResult<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| XnftError::rpc(e.to_string()))
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature, RawFailure> {
        self.rpc
            .send_and_confirm_transaction(tx)
            .await
            .map_err(raw_failure)
    }
}
