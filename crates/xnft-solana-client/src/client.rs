//! xNFT client facade.
//!
//! [`XnftClient`] ties the address deriver, instruction builders, error
//! translator and metadata resolver to a ledger and storage collaborator.
//!
//! A client either holds a signer or is read-only. A read-only client uses the
//! default pubkey as its identity and rejects every mutating call with
//! `MissingSigner` before any I/O happens.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};
use tracing::{debug, warn};
use xnft_core::config::{validate_config, ClientConfig};
use xnft_core::constants::offsets;
use xnft_core::hashing::account_discriminator;
use xnft_core::model::{
    b58, validate_name, AccessRecord, AccountRecord, CreateXnftParams, InstallRecord, Kind, MetadataRecord,
    ReviewRecord, TokenOwner, UpdateParams, XnftRecord,
};
use xnft_core::{XnftError, XnftResult};

use crate::instructions::{build_transaction, XnftInstructions};
use crate::pda;
use crate::resolver::{ApplicationView, MetadataResolver};
use crate::rpc::{fetch_multiple_chunked, AccountFilter, LedgerRpc, SolanaLedger};
use crate::storage::{HttpGateway, StorageGateway};
use crate::translate::translate;

pub type DynSigner = Arc<dyn Signer + Send + Sync>;

/// A decoded program account and its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramAccount<T> {
    #[serde(with = "b58")]
    pub address: Pubkey,
    pub account: T,
}

/// An install record joined with the view of the xNFT it installs.
#[derive(Debug, Clone, Serialize)]
pub struct Installation {
    pub install: ProgramAccount<InstallRecord>,
    pub xnft: ApplicationView,
}

pub struct XnftClient {
    config: ClientConfig,
    rpc: Arc<dyn LedgerRpc>,
    signer: Option<DynSigner>,
    builder: XnftInstructions,
    resolver: MetadataResolver,
}

impl std::fmt::Debug for XnftClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XnftClient")
            .field("program_id", &self.config.program_id)
            .field("identity", &self.identity())
            .field("read_only", &self.is_read_only())
            .finish()
    }
}

impl XnftClient {
    /// A client that signs with `signer`.
    pub fn new(
        config: ClientConfig,
        rpc: Arc<dyn LedgerRpc>,
        storage: Arc<dyn StorageGateway>,
        signer: DynSigner,
    ) -> XnftResult<Self> {
        Self::build(config, rpc, storage, Some(signer))
    }

    /// A client without a signer, for queries only.
    pub fn read_only(
        config: ClientConfig,
        rpc: Arc<dyn LedgerRpc>,
        storage: Arc<dyn StorageGateway>,
    ) -> XnftResult<Self> {
        Self::build(config, rpc, storage, None)
    }

    /// A client over the Solana RPC endpoint and HTTP gateway named in `config`.
    pub fn connect(config: ClientConfig, signer: Option<DynSigner>) -> XnftResult<Self> {
        let rpc = Arc::new(SolanaLedger::new(&config.rpc_url, config.commitment));
        let storage = Arc::new(HttpGateway::new(&config.fetch)?);
        Self::build(config, rpc, storage, signer)
    }

    fn build(
        config: ClientConfig,
        rpc: Arc<dyn LedgerRpc>,
        storage: Arc<dyn StorageGateway>,
        signer: Option<DynSigner>,
    ) -> XnftResult<Self> {
        validate_config(&config)?;
        let resolver = MetadataResolver::new(
            rpc.clone(),
            storage,
            config.gateways.clone(),
            Duration::from_millis(config.fetch.timeout_ms),
        );
        Ok(Self {
            builder: XnftInstructions::new(config.program_id),
            config,
            rpc,
            signer,
            resolver,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    pub fn instructions(&self) -> &XnftInstructions {
        &self.builder
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    pub fn is_read_only(&self) -> bool {
        self.signer.is_none()
    }

    /// The signer's pubkey, or the default pubkey for a read-only client.
    pub fn identity(&self) -> Pubkey {
        self.signer
            .as_ref()
            .map(|s| s.pubkey())
            .unwrap_or_default()
    }

    fn signer_for(&self, operation: &'static str) -> XnftResult<(&DynSigner, Pubkey)> {
        let signer = self
            .signer
            .as_ref()
            .ok_or(XnftError::MissingSigner { operation })?;
        Ok((signer, signer.pubkey()))
    }

    /// Sign and submit. Ledger rejections come back translated.
    async fn submit(
        &self,
        operation: &'static str,
        signer: &DynSigner,
        instructions: &[Instruction],
    ) -> XnftResult<Signature> {
        let payer = signer.pubkey();
        let mut tx = build_transaction(instructions, &payer);
        let blockhash = self.rpc.latest_blockhash().await?;
        tx.try_sign(&[signer.as_ref()], blockhash)
            .map_err(|e| XnftError::invalid_argument(format!("{operation}: signing failed: {e}")))?;

        let signature = self.rpc.send_and_confirm(&tx).await.map_err(translate)?;
        debug!(operation, %signature, "transaction confirmed");
        Ok(signature)
    }

    // ---- record access ----

    async fn fetch_decoded<T: AccountRecord>(&self, address: &Pubkey) -> XnftResult<Option<T>> {
        match self.rpc.fetch_account(address).await? {
            Some(data) => T::decode(&data).map(Some),
            None => Ok(None),
        }
    }

    /// The raw xNFT record at `address`.
    pub async fn get_record(&self, address: &Pubkey) -> XnftResult<XnftRecord> {
        self.fetch_decoded(address)
            .await?
            .ok_or_else(|| XnftError::AccountNotFound(address.to_string()))
    }

    pub async fn get_install(&self, address: &Pubkey) -> XnftResult<Option<InstallRecord>> {
        self.fetch_decoded(address).await
    }

    pub async fn get_review(&self, address: &Pubkey) -> XnftResult<Option<ReviewRecord>> {
        self.fetch_decoded(address).await
    }

    pub async fn get_access(&self, address: &Pubkey) -> XnftResult<Option<AccessRecord>> {
        self.fetch_decoded(address).await
    }

    pub async fn is_installed(&self, wallet: &Pubkey, xnft: &Pubkey) -> XnftResult<bool> {
        let (install, _) = pda::derive_install(&self.config.program_id, wallet, xnft)?;
        Ok(self.rpc.fetch_account(&install).await?.is_some())
    }

    pub async fn has_access(&self, wallet: &Pubkey, xnft: &Pubkey) -> XnftResult<bool> {
        let (access, _) = pda::derive_access(&self.config.program_id, wallet, xnft)?;
        Ok(self.rpc.fetch_account(&access).await?.is_some())
    }

    /// Current holder of an xNFT's master token.
    pub async fn token_owner(&self, master_mint: &Pubkey) -> XnftResult<Option<TokenOwner>> {
        self.resolver.find_token_owner(master_mint).await
    }

    /// One collection query for accounts of type `T`. Accounts that fail to
    /// decode are skipped.
    async fn query<T: AccountRecord>(
        &self,
        mut filters: Vec<AccountFilter>,
    ) -> XnftResult<Vec<ProgramAccount<T>>> {
        filters.insert(
            0,
            AccountFilter::memcmp(offsets::DISCRIMINATOR, account_discriminator(T::NAME)),
        );
        let raw = self
            .rpc
            .fetch_accounts_by_filter(&self.config.program_id, &filters)
            .await?;

        Ok(raw
            .into_iter()
            .filter_map(|(address, data)| match T::decode(&data) {
                Ok(account) => Some(ProgramAccount { address, account }),
                Err(err) => {
                    warn!(account = %address, error = %err, "skipping undecodable {}", T::NAME);
                    None
                }
            })
            .collect())
    }

    // ---- resolved views ----

    /// Resolve one xNFT. Metadata failures are returned to the caller.
    pub async fn get_xnft(&self, address: &Pubkey) -> XnftResult<ApplicationView> {
        let record = self.get_record(address).await?;
        self.resolver.resolve(*address, record).await
    }

    /// Every xNFT, optionally of one kind. Records with broken metadata are
    /// left out.
    pub async fn list_xnfts(&self, kind: Option<Kind>) -> XnftResult<Vec<ApplicationView>> {
        self.list_filtered(None, kind).await
    }

    /// xNFTs whose authority is `owner`, optionally of one kind.
    pub async fn list_owned(
        &self,
        owner: &Pubkey,
        kind: Option<Kind>,
    ) -> XnftResult<Vec<ApplicationView>> {
        self.list_filtered(Some(owner), kind).await
    }

    async fn list_filtered(
        &self,
        owner: Option<&Pubkey>,
        kind: Option<Kind>,
    ) -> XnftResult<Vec<ApplicationView>> {
        let filters = owner
            .map(|owner| AccountFilter::memcmp(offsets::XNFT_AUTHORITY, owner))
            .into_iter()
            .collect();

        // `kind` has no fixed offset, so it is matched on the decoded record.
        let records = self
            .query::<XnftRecord>(filters)
            .await?
            .into_iter()
            .filter(|r| kind.map_or(true, |k| r.account.kind == k))
            .map(|r| (r.address, r.account))
            .collect();
        Ok(self.resolver.resolve_many(records).await)
    }

    /// Everything `wallet` has installed, each joined with its xNFT view.
    pub async fn get_installations(&self, wallet: &Pubkey) -> XnftResult<Vec<Installation>> {
        let installs = self
            .query::<InstallRecord>(vec![AccountFilter::memcmp(offsets::INSTALL_AUTHORITY, wallet)])
            .await?;

        let xnft_keys: Vec<Pubkey> = installs.iter().map(|i| i.account.xnft).collect();
        let records = fetch_multiple_chunked(self.rpc.as_ref(), &xnft_keys).await?;

        let pending = installs.into_iter().zip(records).map(|(install, data)| async move {
            let xnft = install.account.xnft;
            let record = data
                .ok_or_else(|| XnftError::AccountNotFound(xnft.to_string()))
                .and_then(|d| XnftRecord::decode(&d));
            let view = match record {
                Ok(record) => self.resolver.resolve(xnft, record).await,
                Err(err) => Err(err),
            };
            (install, view)
        });

        Ok(join_all(pending)
            .await
            .into_iter()
            .filter_map(|(install, view)| match view {
                Ok(xnft) => Some(Installation { install, xnft }),
                Err(err) => {
                    warn!(install = %install.address, error = %err, "excluding installation");
                    None
                }
            })
            .collect())
    }

    pub async fn get_reviews(&self, xnft: &Pubkey) -> XnftResult<Vec<ProgramAccount<ReviewRecord>>> {
        self.query(vec![AccountFilter::memcmp(offsets::REVIEW_XNFT, xnft)])
            .await
    }

    // ---- mutations ----

    /// Create an App xNFT. Returns the signature and the new xNFT address.
    pub async fn create_app_xnft(
        &self,
        name: &str,
        params: CreateXnftParams,
    ) -> XnftResult<(Signature, Pubkey)> {
        let (signer, publisher) = self.signer_for("create_app_xnft")?;
        validate_name(name)?;
        params.validate()?;
        let ix = self.builder.ix_create_app_xnft(publisher, name, params)?;

        let (master_mint, _) = pda::derive_master_mint(&self.config.program_id, name, &publisher)?;
        let (xnft, _) = pda::derive_xnft(&self.config.program_id, &master_mint)?;
        let sig = self.submit("create_app_xnft", signer, &[ix]).await?;
        Ok((sig, xnft))
    }

    /// Wrap an existing collectible mint. Returns the signature and the new xNFT address.
    pub async fn create_collectible_xnft(
        &self,
        master_mint: &Pubkey,
        params: CreateXnftParams,
    ) -> XnftResult<(Signature, Pubkey)> {
        let (signer, publisher) = self.signer_for("create_collectible_xnft")?;
        params.validate()?;
        let (master_metadata, _) = pda::derive_metadata(master_mint)?;
        let ix = self
            .builder
            .ix_create_collectible_xnft(publisher, *master_mint, master_metadata, params)?;

        let (xnft, _) = pda::derive_xnft(&self.config.program_id, master_mint)?;
        let sig = self.submit("create_collectible_xnft", signer, &[ix]).await?;
        Ok((sig, xnft))
    }

    /// Apply a partial update, signed by the owner. A verified curator is named
    /// in the instruction but does not sign.
    pub async fn update_xnft(&self, xnft: &Pubkey, updates: UpdateParams) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("update_xnft")?;
        updates.validate()?;
        let record = self.get_record(xnft).await?;

        let master_token = pda::derive_associated_token(&authority, &record.master_mint)?;
        let curator = record.curator.filter(|c| c.verified).map(|c| c.pubkey);
        let ix = self.builder.ix_update_xnft(
            authority,
            *xnft,
            master_token,
            record.master_metadata,
            curator,
            updates,
        )?;
        self.submit("update_xnft", signer, &[ix]).await
    }

    pub async fn transfer(&self, xnft: &Pubkey, recipient: &Pubkey) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("transfer")?;
        let record = self.get_record(xnft).await?;
        let ix = self
            .builder
            .ix_transfer(authority, *xnft, record.kind, record.master_mint, *recipient)?;
        self.submit("transfer", signer, &[ix]).await
    }

    pub async fn set_curator(&self, xnft: &Pubkey, curator: &Pubkey) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("set_curator")?;
        let record = self.get_record(xnft).await?;
        let master_token = pda::derive_associated_token(&authority, &record.master_mint)?;
        let ix = self
            .builder
            .ix_set_curator(authority, *xnft, master_token, *curator)?;
        self.submit("set_curator", signer, &[ix]).await
    }

    /// Sign as the assigned curator to verify the assignment.
    pub async fn verify_curator(&self, xnft: &Pubkey) -> XnftResult<Signature> {
        self.set_curator_verification("verify_curator", xnft, true)
            .await
    }

    pub async fn unverify_curator(&self, xnft: &Pubkey) -> XnftResult<Signature> {
        self.set_curator_verification("unverify_curator", xnft, false)
            .await
    }

    async fn set_curator_verification(
        &self,
        operation: &'static str,
        xnft: &Pubkey,
        value: bool,
    ) -> XnftResult<Signature> {
        let (signer, curator) = self.signer_for(operation)?;
        let ix = self
            .builder
            .ix_set_curator_verification(curator, *xnft, value)?;
        self.submit(operation, signer, &[ix]).await
    }

    pub async fn grant_access(&self, xnft: &Pubkey, wallet: &Pubkey) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("grant_access")?;
        let ix = self.builder.ix_grant_access(authority, *xnft, *wallet)?;
        self.submit("grant_access", signer, &[ix]).await
    }

    pub async fn revoke_access(&self, xnft: &Pubkey, wallet: &Pubkey) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("revoke_access")?;
        let ix = self.builder.ix_revoke_access(authority, *xnft, *wallet)?;
        self.submit("revoke_access", signer, &[ix]).await
    }

    /// Install an App xNFT for the signer.
    pub async fn install(&self, xnft: &Pubkey) -> XnftResult<Signature> {
        self.create_install("create_install", xnft, false).await
    }

    /// Install a private xNFT using the signer's access grant.
    pub async fn install_permissioned(&self, xnft: &Pubkey) -> XnftResult<Signature> {
        self.create_install("create_permissioned_install", xnft, true)
            .await
    }

    async fn create_install(
        &self,
        operation: &'static str,
        xnft: &Pubkey,
        permissioned: bool,
    ) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for(operation)?;
        let record = self.get_record(xnft).await?;
        let ix = self
            .builder
            .ix_create_install(authority, *xnft, &record, permissioned)?;
        self.submit(operation, signer, &[ix]).await
    }

    /// Remove an install record. Rent goes to `receiver`, or the signer.
    pub async fn uninstall(
        &self,
        install: &Pubkey,
        receiver: Option<Pubkey>,
    ) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("delete_install")?;
        let ix = self
            .builder
            .ix_delete_install(authority, *install, receiver.unwrap_or(authority))?;
        self.submit("delete_install", signer, &[ix]).await
    }

    /// Review an installed xNFT. The master token holder is looked up so the
    /// program can check the reviewer does not own the xNFT.
    pub async fn review(&self, xnft: &Pubkey, uri: &str, rating: u8) -> XnftResult<Signature> {
        let (signer, author) = self.signer_for("create_review")?;
        let record = self.get_record(xnft).await?;
        let master_token = self
            .resolver
            .find_token_owner(&record.master_mint)
            .await?
            .ok_or_else(|| XnftError::AccountNotFound(format!("master token of {xnft}")))?;

        let ix = self
            .builder
            .ix_create_review(author, *xnft, master_token.address, uri, rating)?;
        self.submit("create_review", signer, &[ix]).await
    }

    /// Delete the signer's review of `xnft`.
    pub async fn delete_review(
        &self,
        xnft: &Pubkey,
        receiver: Option<Pubkey>,
    ) -> XnftResult<Signature> {
        let (signer, author) = self.signer_for("delete_review")?;
        let (review, _) = pda::derive_review(&self.config.program_id, xnft, &author)?;
        let ix = self.builder.ix_delete_review(
            author,
            review,
            *xnft,
            receiver.unwrap_or(author),
        )?;
        self.submit("delete_review", signer, &[ix]).await
    }

    pub async fn set_suspended(&self, xnft: &Pubkey, flag: bool) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("set_suspended")?;
        let record = self.get_record(xnft).await?;
        let master_token = pda::derive_associated_token(&authority, &record.master_mint)?;
        let ix = self
            .builder
            .ix_set_suspended(authority, *xnft, record.kind, master_token, flag)?;
        self.submit("set_suspended", signer, &[ix]).await
    }

    /// Donate `amount` lamports, split by the program across the creators
    /// listed on the xNFT's metadata record.
    pub async fn donate(&self, xnft: &Pubkey, amount: u64) -> XnftResult<Signature> {
        let (signer, donator) = self.signer_for("donate")?;
        let record = self.get_record(xnft).await?;
        let metadata = self
            .rpc
            .fetch_account(&record.master_metadata)
            .await?
            .ok_or_else(|| XnftError::AccountNotFound(record.master_metadata.to_string()))?;
        let creators: Vec<Pubkey> = MetadataRecord::decode(&metadata)?
            .creators
            .into_iter()
            .map(|c| c.address)
            .collect();

        let ix = self.builder.ix_donate(
            donator,
            *xnft,
            record.master_metadata,
            &creators,
            amount,
        )?;
        self.submit("donate", signer, &[ix]).await
    }

    /// Close an xNFT. With `with_burn` the master token is burned too.
    pub async fn delete_xnft(
        &self,
        xnft: &Pubkey,
        receiver: Option<Pubkey>,
        with_burn: bool,
    ) -> XnftResult<Signature> {
        let (signer, authority) = self.signer_for("delete_xnft")?;
        let record = self.get_record(xnft).await?;
        let ix = self.builder.ix_delete_xnft(
            authority,
            *xnft,
            &record,
            receiver.unwrap_or(authority),
            with_burn,
        )?;
        self.submit("delete_xnft", signer, &[ix]).await
    }
}
