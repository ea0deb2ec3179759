//! xnft-solana-client
//!
//! Client SDK for the xNFT marketplace program.
//!
//! It includes:
//! - address derivation for xNFT, install, review and access records
//! - one instruction builder per program operation
//! - metadata resolution joining on-chain records with off-chain documents
//! - translation of ledger failures into the protocol error taxonomy
//! - [`XnftClient`], a facade over all of the above
//!
//! Network access goes through two collaborator traits, [`LedgerRpc`] and
//! [`StorageGateway`], so callers can substitute their own transport.

pub mod client;
pub mod constants;
pub mod instructions;
pub mod pda;
pub mod resolver;
pub mod rpc;
pub mod storage;
pub mod translate;

#[cfg(test)]
mod mock;
#[cfg(test)]
mod tests;

pub use client::{DynSigner, Installation, ProgramAccount, XnftClient};
pub use constants::*;
pub use instructions::{build_transaction, XnftInstructions, XnftIx};
pub use pda::*;
pub use resolver::{ApplicationView, DocumentSource, MetadataResolver};
pub use rpc::{fetch_multiple_chunked, AccountFilter, LedgerRpc, SolanaLedger};
pub use storage::{HttpGateway, StorageGateway};
pub use translate::{translate, RawFailure};
