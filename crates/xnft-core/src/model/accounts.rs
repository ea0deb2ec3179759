//! Program-owned account layouts.
//!
//! Field order is the wire order. The leading pubkeys sit at fixed offsets
//! (`constants::offsets`) and can be matched by collection filters. Every
//! field after `install_authority` moves with that option's tag, so `kind`
//! is filtered after decoding.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;
use solana_program::pubkey::Pubkey;

use super::{b58, AccountRecord, Kind, Tag};

/// Curator assignment on an xNFT. `verified` flips once the curator signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct CuratorStatus {
    #[serde(with = "b58")]
    pub pubkey: Pubkey,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XnftRecord {
    #[serde(with = "b58")]
    pub authority: Pubkey,
    #[serde(with = "b58")]
    pub publisher: Pubkey,
    #[serde(with = "b58")]
    pub install_vault: Pubkey,
    #[serde(with = "b58")]
    pub master_edition: Pubkey,
    #[serde(with = "b58")]
    pub master_metadata: Pubkey,
    #[serde(with = "b58")]
    pub master_mint: Pubkey,
    #[serde(with = "b58::option")]
    pub install_authority: Option<Pubkey>,
    pub bump: u8,
    pub kind: Kind,
    pub tag: Tag,
    pub name: String,
    pub total_installs: u64,
    pub install_price: u64,
    pub created_ts: i64,
    pub updated_ts: i64,
    pub suspended: bool,
    pub total_rating: u64,
    pub num_ratings: u32,
    pub supply: Option<u64>,
    pub curator: Option<CuratorStatus>,
    pub uri: String,
}

impl AccountRecord for XnftRecord {
    const NAME: &'static str = "Xnft";
}

impl XnftRecord {
    /// Mean rating, or `None` before the first review.
    pub fn average_rating(&self) -> Option<f64> {
        (self.num_ratings > 0).then(|| self.total_rating as f64 / self.num_ratings as f64)
    }

    /// True once `total_installs` has reached a configured supply cap.
    pub fn supply_exhausted(&self) -> bool {
        matches!(self.supply, Some(cap) if self.total_installs >= cap)
    }

    pub fn has_verified_curator(&self) -> bool {
        self.curator.map(|c| c.verified).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRecord {
    #[serde(with = "b58")]
    pub authority: Pubkey,
    #[serde(with = "b58")]
    pub xnft: Pubkey,
    #[serde(with = "b58")]
    pub master_metadata: Pubkey,
    /// Sequence number: the xNFT's `total_installs` at creation time.
    pub id: u64,
}

impl AccountRecord for InstallRecord {
    const NAME: &'static str = "Install";
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    #[serde(with = "b58")]
    pub author: Pubkey,
    #[serde(with = "b58")]
    pub xnft: Pubkey,
    pub rating: u8,
    pub uri: String,
}

impl AccountRecord for ReviewRecord {
    const NAME: &'static str = "Review";
}

/// Grants `wallet` the right to a permissioned install of `xnft`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecord {
    #[serde(with = "b58")]
    pub wallet: Pubkey,
    #[serde(with = "b58")]
    pub xnft: Pubkey,
    pub bump: u8,
}

impl AccountRecord for AccessRecord {
    const NAME: &'static str = "Access";
}
