//! xnft-core
//!
//! Core primitives for the xNFT marketplace protocol:
//! - program ids, seeds and protocol limits
//! - Borsh account layouts (xNFT, install, review, access) with discriminators
//! - instruction argument types
//! - token and token-metadata record decoding
//! - the off-chain metadata document model
//! - explicit client configuration
//! - the closed error taxonomy shared by every SDK layer
//!
//! This crate performs no network I/O.

pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod version;

pub use crate::errors::{ProtocolError, XnftError, XnftResult};

/// Discriminator namespaces used by the protocol's account and instruction encoding.
/// These must remain stable across versions.
pub mod namespace {
    pub const ACCOUNT: &str = "account";
    pub const INSTRUCTION: &str = "global";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{ClientConfig, Commitment, FetchConfig, GatewayConfig, GatewayRule};
    pub use crate::constants::*;
    pub use crate::hashing::{account_discriminator, instruction_discriminator};
    pub use crate::model::{
        AccessRecord, AccountRecord, CreateXnftParams, CreatorsParam, CuratorStatus, InstallRecord,
        Kind, ManifestDocument, MetadataCreator, MetadataRecord, ReviewRecord, Tag, TokenAccount,
        TokenOwner, UpdateParams, XnftRecord,
    };
    pub use crate::version::{ManifestVersion, StorageTag};
    pub use crate::{ProtocolError, XnftError, XnftResult};
}
