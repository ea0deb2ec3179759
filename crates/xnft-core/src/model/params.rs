//! Instruction argument structures.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use super::Tag;
use crate::constants::MAX_NAME_LEN;
use crate::errors::{XnftError, XnftResult};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreatorsParam {
    pub address: Pubkey,
    pub share: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CreateXnftParams {
    pub creators: Vec<CreatorsParam>,
    pub curator: Option<Pubkey>,
    pub install_authority: Option<Pubkey>,
    pub install_price: u64,
    pub install_vault: Pubkey,
    pub seller_fee_basis_points: u16,
    pub supply: Option<u64>,
    pub symbol: String,
    pub tag: Tag,
    pub uri: String,
}

impl CreateXnftParams {
    /// Minimal parameters: the publisher is the only creator and receives
    /// install payments.
    pub fn new(publisher: Pubkey, uri: impl Into<String>) -> Self {
        Self {
            creators: vec![CreatorsParam {
                address: publisher,
                share: 100,
            }],
            curator: None,
            install_authority: None,
            install_price: 0,
            install_vault: publisher,
            seller_fee_basis_points: 0,
            supply: None,
            symbol: String::new(),
            tag: Tag::None,
            uri: uri.into(),
        }
    }

    /// Local argument checks. Protocol rules such as the uri length limit
    /// are enforced by the program and surface as protocol errors.
    pub fn validate(&self) -> XnftResult<()> {
        if !self.creators.is_empty() {
            let total: u32 = self.creators.iter().map(|c| c.share as u32).sum();
            if total != 100 {
                return Err(XnftError::invalid_argument(format!(
                    "creator shares must sum to 100, got {total}"
                )));
            }
        }

        if self.seller_fee_basis_points > 10_000 {
            return Err(XnftError::invalid_argument(
                "seller fee basis points must not exceed 10000",
            ));
        }

        Ok(())
    }
}

/// Partial update of an xNFT. `None` leaves the field unchanged; an update
/// with every field `None` only bumps `updated_ts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct UpdateParams {
    pub install_authority: Option<Pubkey>,
    pub install_price: Option<u64>,
    pub install_vault: Option<Pubkey>,
    pub name: Option<String>,
    pub supply: Option<u64>,
    pub tag: Option<Tag>,
    pub uri: Option<String>,
}

impl UpdateParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> XnftResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        Ok(())
    }
}

/// Names are seeds of the master mint address, so they share the seed limit.
pub fn validate_name(name: &str) -> XnftResult<()> {
    if name.is_empty() {
        return Err(XnftError::invalid_argument("name must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(XnftError::InvalidSeed {
            seed: name.to_string(),
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}
