//! Token program and token-metadata program records.
//!
//! Only the prefix each record needs is decoded; anything after it is ignored.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::Serialize;
use solana_program::pubkey::Pubkey;

use super::b58;
use crate::constants::{offsets, TOKEN_ACCOUNT_LEN};
use crate::errors::{XnftError, XnftResult};

/// The fields of an SPL token account the SDK reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccount {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccount {
    pub fn decode(data: &[u8]) -> XnftResult<Self> {
        if data.len() != TOKEN_ACCOUNT_LEN {
            return Err(XnftError::decode(format!(
                "token account must be {TOKEN_ACCOUNT_LEN} bytes, got {}",
                data.len()
            )));
        }

        Ok(Self {
            mint: read_pubkey(data, offsets::TOKEN_MINT)?,
            owner: read_pubkey(data, offsets::TOKEN_OWNER)?,
            amount: read_u64(data, offsets::TOKEN_AMOUNT)?,
        })
    }
}

/// Location and holder of the unique-supply master token of an xNFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenOwner {
    #[serde(with = "b58")]
    pub address: Pubkey,
    #[serde(with = "b58")]
    pub owner: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct MetadataCreator {
    #[serde(with = "b58")]
    pub address: Pubkey,
    pub verified: bool,
    pub share: u8,
}

/// Descriptive record kept by the token-metadata program for a mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(with = "b58")]
    pub update_authority: Pubkey,
    #[serde(with = "b58")]
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Vec<MetadataCreator>,
    pub primary_sale_happened: bool,
    pub is_mutable: bool,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct RawMetadata {
    _key: u8,
    update_authority: Pubkey,
    mint: Pubkey,
    name: String,
    symbol: String,
    uri: String,
    seller_fee_basis_points: u16,
    creators: Option<Vec<MetadataCreator>>,
    primary_sale_happened: bool,
    is_mutable: bool,
}

impl MetadataRecord {
    /// Decode the record. String fields are stored NUL padded on chain.
    pub fn decode(data: &[u8]) -> XnftResult<Self> {
        let mut buf = data;
        let raw = RawMetadata::deserialize(&mut buf)
            .map_err(|e| XnftError::decode(format!("metadata record: {e}")))?;

        Ok(Self {
            update_authority: raw.update_authority,
            mint: raw.mint,
            name: trim_padding(raw.name),
            symbol: trim_padding(raw.symbol),
            uri: trim_padding(raw.uri),
            seller_fee_basis_points: raw.seller_fee_basis_points,
            creators: raw.creators.unwrap_or_default(),
            primary_sale_happened: raw.primary_sale_happened,
            is_mutable: raw.is_mutable,
        })
    }
}

fn trim_padding(s: String) -> String {
    s.trim_end_matches('\0').to_string()
}

fn read_pubkey(data: &[u8], at: usize) -> XnftResult<Pubkey> {
    data.get(at..at + 32)
        .and_then(|b| <[u8; 32]>::try_from(b).ok())
        .map(Pubkey::new_from_array)
        .ok_or_else(|| XnftError::decode(format!("no pubkey at offset {at}")))
}

fn read_u64(data: &[u8], at: usize) -> XnftResult<u64> {
    data.get(at..at + 8)
        .and_then(|b| <[u8; 8]>::try_from(b).ok())
        .map(u64::from_le_bytes)
        .ok_or_else(|| XnftError::decode(format!("no u64 at offset {at}")))
}

/// Test helpers that build on-chain byte images of token records.
#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures {
    use super::*;

    pub fn token_account_bytes(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
        data[offsets::TOKEN_MINT..offsets::TOKEN_MINT + 32].copy_from_slice(mint.as_ref());
        data[offsets::TOKEN_OWNER..offsets::TOKEN_OWNER + 32].copy_from_slice(owner.as_ref());
        data[offsets::TOKEN_AMOUNT..offsets::TOKEN_AMOUNT + 8]
            .copy_from_slice(&amount.to_le_bytes());
        data
    }

    fn padded(s: &str, width: usize) -> String {
        let mut out = s.to_string();
        while out.len() < width {
            out.push('\0');
        }
        out
    }

    /// Metadata record bytes with the fixed-width padding the metadata program uses.
    pub fn metadata_bytes(
        update_authority: &Pubkey,
        mint: &Pubkey,
        name: &str,
        uri: &str,
        creators: &[(Pubkey, u8)],
    ) -> Vec<u8> {
        let raw = RawMetadata {
            _key: 4,
            update_authority: *update_authority,
            mint: *mint,
            name: padded(name, 32),
            symbol: padded("", 10),
            uri: padded(uri, 200),
            seller_fee_basis_points: 500,
            creators: Some(
                creators
                    .iter()
                    .map(|(address, share)| MetadataCreator {
                        address: *address,
                        verified: true,
                        share: *share,
                    })
                    .collect(),
            ),
            primary_sale_happened: false,
            is_mutable: true,
        };
        borsh::to_vec(&raw).unwrap_or_default()
    }
}
