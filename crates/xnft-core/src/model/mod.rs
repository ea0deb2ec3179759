//! xNFT data models.
//!
//! This module defines the strongly-typed Rust representations of:
//! - the program-owned accounts (`Xnft`, `Install`, `Review`, `Access`)
//! - the instruction argument structures
//! - the token and token-metadata records an xNFT sits on top of
//! - the off-chain metadata document
//!
//! Account types implement [`AccountRecord`], which owns the discriminator
//! check and the Borsh body codec. Models are mostly plain data; the client
//! crate applies policy and performs I/O.

pub mod accounts;
pub mod b58;
pub mod manifest;
pub mod params;
pub mod token;

use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::errors::{XnftError, XnftResult};
use crate::hashing::{account_discriminator, Discriminator, DISCRIMINATOR_LEN};

pub use accounts::{AccessRecord, CuratorStatus, InstallRecord, ReviewRecord, XnftRecord};
pub use manifest::ManifestDocument;
pub use params::{validate_name, CreateXnftParams, CreatorsParam, UpdateParams};
pub use token::{MetadataCreator, MetadataRecord, TokenAccount, TokenOwner};

/// What an xNFT wraps. Install, suspend and transfer only apply to `App`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    App,
    Collectible,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Collectible => "collectible",
        }
    }

    /// Wire byte stored at the fixed `kind` offset of an xNFT account.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::App => 0,
            Self::Collectible => 1,
        }
    }

    pub fn is_app(&self) -> bool {
        matches!(self, Self::App)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = XnftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "app" => Ok(Self::App),
            "collectible" => Ok(Self::Collectible),
            _ => Err(XnftError::invalid_argument(format!("unknown kind: {s}"))),
        }
    }
}

/// Marketplace category.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    #[default]
    None,
    Defi,
    Game,
    Nfts,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Defi => "defi",
            Self::Game => "game",
            Self::Nfts => "nfts",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = XnftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "defi" => Ok(Self::Defi),
            "game" => Ok(Self::Game),
            "nfts" => Ok(Self::Nfts),
            _ => Err(XnftError::invalid_argument(format!("unknown tag: {s}"))),
        }
    }
}

/// A program-owned account: 8-byte discriminator followed by a Borsh body.
pub trait AccountRecord: BorshSerialize + BorshDeserialize + Sized {
    /// Type name hashed into the discriminator.
    const NAME: &'static str;

    fn discriminator() -> Discriminator {
        account_discriminator(Self::NAME)
    }

    /// Decode raw account data. Trailing reserved bytes are ignored.
    fn decode(data: &[u8]) -> XnftResult<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(XnftError::decode(format!(
                "{} account is {} bytes, shorter than its discriminator",
                Self::NAME,
                data.len()
            )));
        }

        let (disc, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if disc != Self::discriminator() {
            return Err(XnftError::decode(format!(
                "discriminator mismatch for {} account",
                Self::NAME
            )));
        }

        Self::deserialize(&mut body)
            .map_err(|e| XnftError::decode(format!("{} account: {e}", Self::NAME)))
    }

    fn encode(&self) -> XnftResult<Vec<u8>> {
        let mut out = Self::discriminator().to_vec();
        self.serialize(&mut out)
            .map_err(|e| XnftError::serialization(e.to_string()))?;
        Ok(out)
    }
}
