//! Configuration structures for the xNFT SDK.
//!
//! Configuration is an explicit, injectable value. The core crate never reads
//! environment variables and holds no process-wide defaults; the CLI (or any
//! other host) builds a [`ClientConfig`] and hands it to the client.

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::constants::XNFT_PROGRAM_ID;
use crate::errors::{XnftError, XnftResult};

/// Global configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub rpc_url: String,
    #[serde(with = "crate::model::b58")]
    pub program_id: Pubkey,
    pub commitment: Commitment,
    pub gateways: GatewayConfig,
    pub fetch: FetchConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            program_id: XNFT_PROGRAM_ID,
            commitment: Commitment::Confirmed,
            gateways: GatewayConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }
}

/// Ledger confirmation level requested for reads and submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }

    pub fn parse(s: &str) -> XnftResult<Self> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(XnftError::config(format!("unsupported commitment: {s}"))),
        }
    }
}

/// A single uri rewrite: any uri starting with `prefix` has that prefix
/// replaced by `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRule {
    pub prefix: String,
    pub replacement: String,
}

impl GatewayRule {
    pub fn new(prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered uri rewrite table. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayConfig {
    pub rules: Vec<GatewayRule>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                GatewayRule::new("ipfs://", "https://nftstorage.link/ipfs/"),
                GatewayRule::new("ar://", "https://arweave.net/"),
            ],
        }
    }
}

impl GatewayConfig {
    /// A table that performs no rewriting.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Insert a rule ahead of existing ones.
    pub fn with_rule(mut self, prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.rules.insert(0, GatewayRule::new(prefix, replacement));
        self
    }

    /// Apply the first matching rewrite, or return the uri unchanged.
    pub fn rewrite(&self, uri: &str) -> String {
        for rule in &self.rules {
            if let Some(rest) = uri.strip_prefix(rule.prefix.as_str()) {
                return format!("{}{}", rule.replacement, rest);
            }
        }
        uri.to_string()
    }
}

/// Off-chain document fetch settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Per-document deadline handed to the storage gateway.
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 3_000,
            user_agent: concat!("xnft-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> XnftResult<()> {
    if cfg.rpc_url.trim().is_empty() {
        return Err(XnftError::config("rpc_url must not be empty"));
    }

    if cfg.fetch.timeout_ms == 0 {
        return Err(XnftError::config("fetch timeout must be greater than zero"));
    }

    if cfg.gateways.rules.iter().any(|r| r.prefix.is_empty()) {
        return Err(XnftError::config("gateway prefixes must not be empty"));
    }

    Ok(())
}
