//! In-memory ledger and storage for tests.
//!
//! `MockLedger` executes submitted transactions against a map of accounts and
//! applies the program's rules, reporting rejections the way a validator does:
//! a failed transaction with a `custom program error` log line. State changes
//! of a transaction are committed only if every instruction succeeds.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use solana_program::hash::Hash;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use xnft_core::constants::{
    MAX_MULTIPLE_ACCOUNTS, MAX_RATING, MAX_URI_LEN, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use xnft_core::model::token::fixtures::{metadata_bytes, token_account_bytes};
use xnft_core::model::{
    AccessRecord, AccountRecord, CreateXnftParams, CuratorStatus, InstallRecord, Kind,
    MetadataRecord, ReviewRecord, TokenAccount, UpdateParams, XnftRecord,
};
use xnft_core::{ProtocolError, XnftError, XnftResult};

use crate::instructions::XnftIx;
use crate::pda;
use crate::rpc::{AccountFilter, LedgerRpc};
use crate::storage::StorageGateway;
use crate::translate::{code_of, RawFailure, ACCOUNT_IN_USE_CODE};

const CLOCK_BASE: i64 = 1_700_000_000;

/// Anchor's code for reading an account that was never initialized.
const ACCOUNT_NOT_INITIALIZED: u32 = 3012;

type Rule = Result<(), RawFailure>;

fn failure(program_id: &Pubkey, code: u32) -> RawFailure {
    RawFailure {
        code: None,
        logs: vec![
            format!("Program {program_id} invoke [1]"),
            format!("Program {program_id} failed: custom program error: {code:#x}"),
        ],
        message: format!(
            "Transaction simulation failed: Error processing Instruction 0: custom program error: {code:#x}"
        ),
    }
}

#[derive(Debug, Clone)]
struct Stored {
    owner: Pubkey,
    data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
struct State {
    accounts: HashMap<Pubkey, Stored>,
    balances: HashMap<Pubkey, u64>,
    slot: i64,
}

/// Executes one instruction against a working copy of the state.
struct Exec<'a> {
    state: &'a mut State,
    program_id: Pubkey,
    signers: &'a [Pubkey],
    now: i64,
}

fn accounts<const N: usize>(keys: &[Pubkey]) -> Result<[Pubkey; N], RawFailure> {
    keys.get(..N)
        .and_then(|s| <[Pubkey; N]>::try_from(s).ok())
        .ok_or_else(|| RawFailure::transport(format!("expected at least {N} accounts")))
}

impl Exec<'_> {
    fn reject(&self, kind: ProtocolError) -> RawFailure {
        match code_of(kind) {
            Some(code) => failure(&self.program_id, code),
            None => RawFailure::transport(format!("no program code for {kind:?}")),
        }
    }

    fn raw(&self, key: &Pubkey) -> Result<&[u8], RawFailure> {
        self.state
            .accounts
            .get(key)
            .map(|s| s.data.as_slice())
            .ok_or_else(|| failure(&self.program_id, ACCOUNT_NOT_INITIALIZED))
    }

    fn get<T: AccountRecord>(&self, key: &Pubkey) -> Result<T, RawFailure> {
        let stored = self
            .state
            .accounts
            .get(key)
            .filter(|s| s.owner == self.program_id)
            .ok_or_else(|| failure(&self.program_id, ACCOUNT_NOT_INITIALIZED))?;
        T::decode(&stored.data).map_err(|e| RawFailure::transport(e.to_string()))
    }

    fn put<T: AccountRecord>(&mut self, key: Pubkey, record: &T) -> Rule {
        let data = record
            .encode()
            .map_err(|e| RawFailure::transport(e.to_string()))?;
        self.state.accounts.insert(
            key,
            Stored {
                owner: self.program_id,
                data,
            },
        );
        Ok(())
    }

    fn put_foreign(&mut self, key: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.state.accounts.insert(key, Stored { owner, data });
    }

    fn close(&mut self, key: &Pubkey) {
        self.state.accounts.remove(key);
    }

    fn ensure_absent(&self, key: &Pubkey) -> Rule {
        if self.state.accounts.contains_key(key) {
            return Err(RawFailure::with_code(
                ACCOUNT_IN_USE_CODE,
                format!("Allocate: account Address {{ address: {key}, base: None }} already in use"),
            ));
        }
        Ok(())
    }

    fn require(&self, ok: bool, kind: ProtocolError) -> Rule {
        if ok {
            Ok(())
        } else {
            Err(self.reject(kind))
        }
    }

    fn signed(&self, key: &Pubkey) -> bool {
        self.signers.contains(key)
    }

    fn require_authority(&self, expected: &Pubkey, actual: &Pubkey) -> Rule {
        self.require(
            expected == actual && self.signed(actual),
            ProtocolError::UpdateAuthorityMismatch,
        )
    }

    /// `token` must be the signer's account holding the single master token.
    fn require_holder(&self, token: &Pubkey, mint: &Pubkey, authority: &Pubkey) -> Rule {
        let holder = TokenAccount::decode(self.raw(token)?)
            .map_err(|e| RawFailure::transport(e.to_string()))?;
        self.require(
            holder.mint == *mint && holder.owner == *authority && holder.amount == 1,
            ProtocolError::UpdateAuthorityMismatch,
        )
    }

    fn require_uri(&self, uri: &str) -> Rule {
        self.require(uri.len() <= MAX_URI_LEN, ProtocolError::UriExceedsMaxLength)
    }

    #[allow(clippy::too_many_arguments)]
    fn new_record(
        &self,
        xnft: &Pubkey,
        publisher: Pubkey,
        mint: Pubkey,
        metadata: Pubkey,
        edition: Pubkey,
        kind: Kind,
        name: String,
        params: CreateXnftParams,
    ) -> Result<XnftRecord, RawFailure> {
        let (derived, bump) = pda::derive_xnft(&self.program_id, &mint)
            .map_err(|e| RawFailure::transport(e.to_string()))?;
        if derived != *xnft {
            return Err(RawFailure::transport("xnft address does not match its seeds"));
        }
        Ok(XnftRecord {
            authority: publisher,
            publisher,
            install_vault: params.install_vault,
            master_edition: edition,
            master_metadata: metadata,
            master_mint: mint,
            bump,
            kind,
            tag: params.tag,
            install_authority: params.install_authority,
            name,
            total_installs: 0,
            install_price: params.install_price,
            created_ts: self.now,
            updated_ts: self.now,
            suspended: false,
            total_rating: 0,
            num_ratings: 0,
            supply: params.supply,
            curator: params.curator.map(|pubkey| CuratorStatus {
                pubkey,
                verified: false,
            }),
            uri: params.uri,
        })
    }

    fn run(&mut self, payload: XnftIx, keys: &[Pubkey]) -> Rule {
        match payload {
            XnftIx::CreateAppXnft { name, params } => {
                let [mint, token, metadata, edition, xnft, publisher] = accounts::<6>(keys)?;
                self.require_uri(&params.uri)?;
                self.ensure_absent(&xnft)?;
                let creators: Vec<(Pubkey, u8)> =
                    params.creators.iter().map(|c| (c.address, c.share)).collect();
                self.put_foreign(
                    metadata,
                    TOKEN_METADATA_PROGRAM_ID,
                    metadata_bytes(&publisher, &mint, &name, &params.uri, &creators),
                );
                self.put_foreign(token, TOKEN_PROGRAM_ID, token_account_bytes(&mint, &publisher, 1));
                let record = self.new_record(
                    &xnft, publisher, mint, metadata, edition, Kind::App, name, params,
                )?;
                self.put(xnft, &record)
            }
            XnftIx::CreateCollectibleXnft { params } => {
                let [mint, token, metadata, xnft, publisher] = accounts::<5>(keys)?;
                self.require_uri(&params.uri)?;
                let meta = MetadataRecord::decode(self.raw(&metadata)?)
                    .map_err(|e| RawFailure::transport(e.to_string()))?;
                let holder = TokenAccount::decode(self.raw(&token)?)
                    .map_err(|e| RawFailure::transport(e.to_string()))?;
                self.require(
                    holder.owner == publisher && holder.mint == mint && meta.mint == mint,
                    ProtocolError::UpdateAuthorityMismatch,
                )?;
                self.ensure_absent(&xnft)?;
                let (edition, _) = pda::derive_master_edition(&mint)
                    .map_err(|e| RawFailure::transport(e.to_string()))?;
                let record = self.new_record(
                    &xnft,
                    publisher,
                    mint,
                    metadata,
                    edition,
                    Kind::Collectible,
                    meta.name,
                    params,
                )?;
                self.put(xnft, &record)
            }
            XnftIx::UpdateXnft { updates } => {
                let [xnft, token, _metadata, curator, authority] = accounts::<5>(keys)?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                if let Some(c) = rec.curator.filter(|c| c.verified) {
                    self.require(curator == c.pubkey, ProtocolError::CuratorAuthorityMismatch)?;
                }
                self.require_authority(&rec.authority, &authority)?;
                self.require_holder(&token, &rec.master_mint, &authority)?;
                self.apply_update(&mut rec, updates)?;
                self.put(xnft, &rec)
            }
            XnftIx::Transfer => {
                let [xnft, mint, source, destination, recipient, authority] = accounts::<6>(keys)?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                self.require(rec.kind.is_app(), ProtocolError::MustBeApp)?;
                self.require_authority(&rec.authority, &authority)?;
                self.close(&source);
                self.put_foreign(destination, TOKEN_PROGRAM_ID, token_account_bytes(&mint, &recipient, 1));
                rec.authority = recipient;
                self.put(xnft, &rec)
            }
            XnftIx::SetCurator => {
                let [xnft, _token, curator, authority] = accounts::<4>(keys)?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                self.require_authority(&rec.authority, &authority)?;
                self.require(!rec.has_verified_curator(), ProtocolError::CuratorAlreadySet)?;
                rec.curator = Some(CuratorStatus {
                    pubkey: curator,
                    verified: false,
                });
                self.put(xnft, &rec)
            }
            XnftIx::SetCuratorVerification { value } => {
                let [xnft, curator] = accounts::<2>(keys)?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                let assigned = rec.curator.filter(|c| c.pubkey == curator && self.signed(&curator));
                let Some(mut status) = assigned else {
                    return Err(self.reject(ProtocolError::CuratorMismatch));
                };
                status.verified = value;
                rec.curator = Some(status);
                self.put(xnft, &rec)
            }
            XnftIx::GrantAccess => {
                let [xnft, wallet, access, authority] = accounts::<4>(keys)?;
                let rec: XnftRecord = self.get(&xnft)?;
                self.require(
                    rec.install_authority == Some(authority) && self.signed(&authority),
                    ProtocolError::InstallAuthorityMismatch,
                )?;
                self.ensure_absent(&access)?;
                let (_, bump) = pda::derive_access(&self.program_id, &wallet, &xnft)
                    .map_err(|e| RawFailure::transport(e.to_string()))?;
                self.put(access, &AccessRecord { wallet, xnft, bump })
            }
            XnftIx::RevokeAccess => {
                let [xnft, _wallet, access, authority] = accounts::<4>(keys)?;
                let rec: XnftRecord = self.get(&xnft)?;
                self.require(
                    rec.install_authority == Some(authority) && self.signed(&authority),
                    ProtocolError::InstallAuthorityMismatch,
                )?;
                self.get::<AccessRecord>(&access)?;
                self.close(&access);
                Ok(())
            }
            XnftIx::CreateInstall => {
                let [xnft, vault, install, authority] = accounts::<4>(keys)?;
                self.install(xnft, vault, install, None, authority)
            }
            XnftIx::CreatePermissionedInstall => {
                let [xnft, vault, install, access, authority] = accounts::<5>(keys)?;
                self.install(xnft, vault, install, Some(access), authority)
            }
            XnftIx::DeleteInstall => {
                let [install, _receiver, authority] = accounts::<3>(keys)?;
                let rec: InstallRecord = self.get(&install)?;
                self.require(
                    rec.authority == authority && self.signed(&authority),
                    ProtocolError::InstallOwnerMismatch,
                )?;
                self.close(&install);
                Ok(())
            }
            XnftIx::CreateReview { uri, rating } => {
                let [install, master_token, xnft, review, author] = accounts::<5>(keys)?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                self.require(rec.kind.is_app(), ProtocolError::MustBeApp)?;
                let holder = TokenAccount::decode(self.raw(&master_token)?)
                    .map_err(|e| RawFailure::transport(e.to_string()))?;
                self.require(holder.owner != author, ProtocolError::CannotReviewOwned)?;
                let inst: InstallRecord = self.get(&install)?;
                self.require(
                    inst.authority == author && inst.xnft == xnft,
                    ProtocolError::ReviewInstallMismatch,
                )?;
                self.require(rating <= MAX_RATING, ProtocolError::RatingOutOfBounds)?;
                self.require_uri(&uri)?;
                self.ensure_absent(&review)?;

                rec.total_rating += rating as u64;
                rec.num_ratings += 1;
                self.put(
                    review,
                    &ReviewRecord {
                        author,
                        xnft,
                        rating,
                        uri,
                    },
                )?;
                self.put(xnft, &rec)
            }
            XnftIx::DeleteReview => {
                let [review, xnft, _receiver, author] = accounts::<4>(keys)?;
                let rev: ReviewRecord = self.get(&review)?;
                self.require(
                    rev.author == author && self.signed(&author),
                    ProtocolError::UpdateReviewAuthorityMismatch,
                )?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                rec.total_rating = rec.total_rating.saturating_sub(rev.rating as u64);
                rec.num_ratings = rec.num_ratings.saturating_sub(1);
                self.close(&review);
                self.put(xnft, &rec)
            }
            XnftIx::SetSuspended { flag } => {
                let [xnft, _token, authority] = accounts::<3>(keys)?;
                let mut rec: XnftRecord = self.get(&xnft)?;
                self.require(rec.kind.is_app(), ProtocolError::MustBeApp)?;
                self.require_authority(&rec.authority, &authority)?;
                rec.suspended = flag;
                self.put(xnft, &rec)
            }
            XnftIx::Donate { amount } => {
                let [xnft, metadata, _donator, _system] = accounts::<4>(keys)?;
                let rec: XnftRecord = self.get(&xnft)?;
                self.require(rec.kind.is_app(), ProtocolError::MustBeApp)?;
                let meta = MetadataRecord::decode(self.raw(&metadata)?)
                    .map_err(|e| RawFailure::transport(e.to_string()))?;
                for passed in &keys[4..] {
                    self.require(
                        meta.creators.iter().any(|c| c.address == *passed),
                        ProtocolError::UnknownCreator,
                    )?;
                }
                for creator in &meta.creators {
                    *self.state.balances.entry(creator.address).or_default() +=
                        amount * creator.share as u64 / 100;
                }
                Ok(())
            }
            XnftIx::DeleteXnft { with_burn } => {
                let [xnft, _metadata, token, _mint, _receiver, authority] = accounts::<6>(keys)?;
                let rec: XnftRecord = self.get(&xnft)?;
                self.require_authority(&rec.authority, &authority)?;
                self.require_holder(&token, &rec.master_mint, &authority)?;
                self.close(&xnft);
                if with_burn {
                    self.close(&token);
                }
                Ok(())
            }
        }
    }

    fn install(
        &mut self,
        xnft: Pubkey,
        vault: Pubkey,
        install: Pubkey,
        access: Option<Pubkey>,
        authority: Pubkey,
    ) -> Rule {
        let mut rec: XnftRecord = self.get(&xnft)?;
        self.require(rec.kind.is_app(), ProtocolError::MustBeApp)?;
        match access {
            Some(access) => {
                let grant = self
                    .get::<AccessRecord>(&access)
                    .map_err(|_| self.reject(ProtocolError::UnauthorizedInstall))?;
                self.require(
                    grant.wallet == authority && grant.xnft == xnft,
                    ProtocolError::UnauthorizedInstall,
                )?;
            }
            None => self.require(
                rec.install_authority.is_none(),
                ProtocolError::InstallAuthorityMismatch,
            )?,
        }
        self.require(!rec.suspended, ProtocolError::SuspendedInstallation)?;
        self.require(!rec.supply_exhausted(), ProtocolError::InstallExceedsSupply)?;
        self.require(vault == rec.install_vault, ProtocolError::InstallOwnerMismatch)?;
        self.ensure_absent(&install)?;

        *self.state.balances.entry(vault).or_default() += rec.install_price;
        self.put(
            install,
            &InstallRecord {
                authority,
                xnft,
                master_metadata: rec.master_metadata,
                id: rec.total_installs,
            },
        )?;
        rec.total_installs += 1;
        self.put(xnft, &rec)
    }

    fn apply_update(&self, rec: &mut XnftRecord, updates: UpdateParams) -> Rule {
        if let Some(uri) = &updates.uri {
            self.require_uri(uri)?;
        }
        if let Some(supply) = updates.supply {
            self.require(supply >= rec.total_installs, ProtocolError::SupplyReduction)?;
        }

        let UpdateParams {
            install_authority,
            install_price,
            install_vault,
            name,
            supply,
            tag,
            uri,
        } = updates;
        if install_authority.is_some() {
            rec.install_authority = install_authority;
        }
        if let Some(v) = install_price {
            rec.install_price = v;
        }
        if let Some(v) = install_vault {
            rec.install_vault = v;
        }
        if let Some(v) = name {
            rec.name = v;
        }
        if supply.is_some() {
            rec.supply = supply;
        }
        if let Some(v) = tag {
            rec.tag = v;
        }
        if let Some(v) = uri {
            rec.uri = v;
        }
        rec.updated_ts = self.now;
        Ok(())
    }
}

pub(crate) struct MockLedger {
    program_id: Pubkey,
    state: Mutex<State>,
}

impl MockLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            state: Mutex::new(State::default()),
        }
    }

    pub fn put_raw(&self, key: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.state.lock().accounts.insert(key, Stored { owner, data });
    }

    pub fn put_record<T: AccountRecord>(&self, key: Pubkey, record: &T) -> XnftResult<()> {
        let data = record.encode()?;
        self.put_raw(key, self.program_id, data);
        Ok(())
    }

    pub fn record<T: AccountRecord>(&self, key: &Pubkey) -> Option<T> {
        let state = self.state.lock();
        state.accounts.get(key).and_then(|s| T::decode(&s.data).ok())
    }

    pub fn exists(&self, key: &Pubkey) -> bool {
        self.state.lock().accounts.contains_key(key)
    }

    pub fn balance(&self, key: &Pubkey) -> u64 {
        self.state.lock().balances.get(key).copied().unwrap_or(0)
    }

    /// Place a collectible owned by `owner`: its token account and metadata
    /// record. Returns `(mint, metadata)`.
    pub fn seed_collectible(&self, owner: &Pubkey, name: &str, uri: &str) -> (Pubkey, Pubkey) {
        let mint = Pubkey::new_unique();
        let (metadata, _) = pda::derive_metadata(&mint).unwrap();
        let token = pda::derive_associated_token(owner, &mint).unwrap();
        self.put_raw(
            metadata,
            TOKEN_METADATA_PROGRAM_ID,
            metadata_bytes(owner, &mint, name, uri, &[(*owner, 100)]),
        );
        self.put_raw(token, TOKEN_PROGRAM_ID, token_account_bytes(&mint, owner, 1));
        (mint, metadata)
    }

    fn execute(&self, tx: &Transaction) -> Result<Signature, RawFailure> {
        tx.verify()
            .map_err(|e| RawFailure::transport(format!("signature verification failed: {e}")))?;

        let message = &tx.message;
        let signer_count = message.header.num_required_signatures as usize;
        let signers = &message.account_keys[..signer_count];

        let mut state = self.state.lock();
        let mut working = state.clone();
        working.slot += 1;
        let now = CLOCK_BASE + working.slot;

        for ci in &message.instructions {
            let program = message.account_keys[ci.program_id_index as usize];
            if program != self.program_id {
                return Err(RawFailure::transport(format!("unsupported program {program}")));
            }
            let keys: Vec<Pubkey> = ci
                .accounts
                .iter()
                .map(|i| message.account_keys[*i as usize])
                .collect();
            let payload = XnftIx::from_slice(&ci.data)
                .map_err(|e| RawFailure::transport(e.to_string()))?;

            Exec {
                state: &mut working,
                program_id: self.program_id,
                signers,
                now,
            }
            .run(payload, &keys)?;
        }

        *state = working;
        Ok(tx.signatures[0])
    }
}

#[async_trait]
impl LedgerRpc for MockLedger {
    async fn fetch_account(&self, address: &Pubkey) -> XnftResult<Option<Vec<u8>>> {
        Ok(self.state.lock().accounts.get(address).map(|s| s.data.clone()))
    }

    async fn fetch_accounts_by_filter(
        &self,
        program_id: &Pubkey,
        filters: &[AccountFilter],
    ) -> XnftResult<Vec<(Pubkey, Vec<u8>)>> {
        let state = self.state.lock();
        Ok(state
            .accounts
            .iter()
            .filter(|(_, s)| s.owner == *program_id && filters.iter().all(|f| f.matches(&s.data)))
            .map(|(k, s)| (*k, s.data.clone()))
            .collect())
    }

    async fn fetch_multiple(&self, addresses: &[Pubkey]) -> XnftResult<Vec<Option<Vec<u8>>>> {
        if addresses.len() > MAX_MULTIPLE_ACCOUNTS {
            return Err(XnftError::rpc(format!(
                "Too many inputs provided; max {MAX_MULTIPLE_ACCOUNTS}"
            )));
        }
        let state = self.state.lock();
        Ok(addresses
            .iter()
            .map(|a| state.accounts.get(a).map(|s| s.data.clone()))
            .collect())
    }

    async fn latest_blockhash(&self) -> XnftResult<Hash> {
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature, RawFailure> {
        self.execute(tx)
    }
}

/// Serves documents from a map and records every requested url.
#[derive(Default)]
pub(crate) struct MockGateway {
    docs: Mutex<HashMap<String, Value>>,
    requested: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn put(&self, url: impl Into<String>, doc: Value) {
        self.docs.lock().insert(url.into(), doc);
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl StorageGateway for MockGateway {
    async fn get_json(&self, uri: &str, _deadline: Duration) -> XnftResult<Value> {
        self.requested.lock().push(uri.to_string());
        self.docs
            .lock()
            .get(uri)
            .cloned()
            .ok_or_else(|| XnftError::metadata_fetch(uri, "http status 404 Not Found"))
    }
}
