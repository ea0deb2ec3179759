//! Metadata resolution.
//!
//! Joins on-chain xNFT records with their off-chain JSON documents and the
//! current holder of their master token.
//!
//! - single resolution surfaces every failure to the caller
//! - batch resolution runs every record concurrently and drops a record whose
//!   document or token lookup fails, logging the exclusion
//!
//! What gets fetched for a record is decided in one place,
//! [`DocumentSource::for_kind`].

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use solana_program::pubkey::Pubkey;
use tracing::{debug, warn};
use xnft_core::config::GatewayConfig;
use xnft_core::constants::{offsets, TOKEN_ACCOUNT_LEN, TOKEN_PROGRAM_ID};
use xnft_core::model::manifest::shallow_merge;
use xnft_core::model::{b58, Kind, ManifestDocument, MetadataRecord, TokenAccount, TokenOwner, XnftRecord};
use xnft_core::version::validate_document;
use xnft_core::{XnftError, XnftResult};

use crate::constants::SINGLE_TOKEN_AMOUNT;
use crate::rpc::{AccountFilter, LedgerRpc};
use crate::storage::StorageGateway;

/// An xNFT record joined with its metadata document and token holder.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationView {
    #[serde(with = "b58")]
    pub address: Pubkey,
    pub record: XnftRecord,
    pub document: Value,
    pub token: Option<TokenOwner>,
}

impl ApplicationView {
    /// The document read as an xNFT manifest.
    pub fn manifest(&self) -> XnftResult<ManifestDocument> {
        ManifestDocument::from_value(&self.document)
    }
}

/// Which documents make up a record's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// The xNFT document alone.
    XnftOnly,
    /// The token's own document, overlaid by the xNFT document.
    MergedWithToken,
}

impl DocumentSource {
    pub fn for_kind(kind: Kind) -> Self {
        match kind {
            Kind::App => Self::XnftOnly,
            Kind::Collectible => Self::MergedWithToken,
        }
    }
}

#[derive(Clone)]
pub struct MetadataResolver {
    rpc: Arc<dyn LedgerRpc>,
    storage: Arc<dyn StorageGateway>,
    gateways: GatewayConfig,
    deadline: Duration,
}

impl MetadataResolver {
    pub fn new(
        rpc: Arc<dyn LedgerRpc>,
        storage: Arc<dyn StorageGateway>,
        gateways: GatewayConfig,
        deadline: Duration,
    ) -> Self {
        Self {
            rpc,
            storage,
            gateways,
            deadline,
        }
    }

    /// Fetch, validate and return one document. Any failure is a
    /// `MetadataFetchFailed` naming the original uri.
    pub async fn fetch_document(&self, uri: &str) -> XnftResult<Value> {
        let url = self.gateways.rewrite(uri);
        debug!(uri, url = %url, "fetching metadata document");

        let doc = self
            .storage
            .get_json(&url, self.deadline)
            .await
            .map_err(|e| match e {
                XnftError::MetadataFetchFailed { reason, .. } => XnftError::metadata_fetch(uri, reason),
                other => XnftError::metadata_fetch(uri, other),
            })?;

        validate_document(&doc).map_err(|e| XnftError::metadata_fetch(uri, e))?;
        Ok(doc)
    }

    async fn token_document(&self, record: &XnftRecord) -> XnftResult<Value> {
        let data = self
            .rpc
            .fetch_account(&record.master_metadata)
            .await?
            .ok_or_else(|| XnftError::AccountNotFound(record.master_metadata.to_string()))?;
        let metadata = MetadataRecord::decode(&data)?;
        self.fetch_document(&metadata.uri).await
    }

    async fn document_for(&self, record: &XnftRecord) -> XnftResult<Value> {
        match DocumentSource::for_kind(record.kind) {
            DocumentSource::XnftOnly => self.fetch_document(&record.uri).await,
            DocumentSource::MergedWithToken => {
                let (xnft_doc, token_doc) =
                    futures::try_join!(self.fetch_document(&record.uri), self.token_document(record))?;
                Ok(shallow_merge(token_doc, xnft_doc))
            }
        }
    }

    /// Locate the account holding the single master token of `mint`.
    pub async fn find_token_owner(&self, mint: &Pubkey) -> XnftResult<Option<TokenOwner>> {
        let filters = [
            AccountFilter::DataSize(TOKEN_ACCOUNT_LEN as u64),
            AccountFilter::memcmp(offsets::TOKEN_MINT, mint),
            AccountFilter::memcmp(offsets::TOKEN_AMOUNT, SINGLE_TOKEN_AMOUNT),
        ];
        let accounts = self
            .rpc
            .fetch_accounts_by_filter(&TOKEN_PROGRAM_ID, &filters)
            .await?;

        match accounts.into_iter().next() {
            Some((address, data)) => {
                let token = TokenAccount::decode(&data)?;
                Ok(Some(TokenOwner {
                    address,
                    owner: token.owner,
                }))
            }
            None => Ok(None),
        }
    }

    /// Resolve one record. Failures are returned, not swallowed.
    pub async fn resolve(&self, address: Pubkey, record: XnftRecord) -> XnftResult<ApplicationView> {
        let (document, token) = futures::try_join!(
            self.document_for(&record),
            self.find_token_owner(&record.master_mint)
        )?;

        Ok(ApplicationView {
            address,
            record,
            document,
            token,
        })
    }

    /// Resolve many records concurrently. A record whose resolution fails is
    /// excluded from the result; order of the result is unspecified.
    pub async fn resolve_many(&self, records: Vec<(Pubkey, XnftRecord)>) -> Vec<ApplicationView> {
        let total = records.len();
        let results = join_all(
            records
                .into_iter()
                .map(|(address, record)| async move { (address, self.resolve(address, record).await) }),
        )
        .await;

        let views: Vec<ApplicationView> = results
            .into_iter()
            .filter_map(|(address, result)| match result {
                Ok(view) => Some(view),
                Err(err) => {
                    warn!(xnft = %address, error = %err, "excluding xnft from batch");
                    None
                }
            })
            .collect();

        debug!(total, resolved = views.len(), "batch resolution complete");
        views
    }
}
