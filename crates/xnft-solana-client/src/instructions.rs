//! Instruction construction for the xNFT program.
//!
//! Each builder takes already-resolved addresses, derives only the addresses
//! it owns, and returns an `Instruction` with exactly the account list the
//! program expects. Builders never touch the network. Structural problems
//! (operating on the wrong kind) fail here, before anything is signed.
//!
//! Instruction data is `sha256("global:<name>")[..8]` followed by the Borsh
//! encoded arguments.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use xnft_core::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, RENT_SYSVAR_ID, SYSTEM_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
use xnft_core::hashing::{instruction_discriminator, DISCRIMINATOR_LEN};
use xnft_core::model::{CreateXnftParams, Kind, UpdateParams, XnftRecord};
use xnft_core::{XnftError, XnftResult};

use crate::constants::ix;
use crate::pda;

/// Decoded instruction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XnftIx {
    CreateAppXnft { name: String, params: CreateXnftParams },
    CreateCollectibleXnft { params: CreateXnftParams },
    UpdateXnft { updates: UpdateParams },
    Transfer,
    SetCurator,
    SetCuratorVerification { value: bool },
    GrantAccess,
    RevokeAccess,
    CreateInstall,
    CreatePermissionedInstall,
    DeleteInstall,
    CreateReview { uri: String, rating: u8 },
    DeleteReview,
    SetSuspended { flag: bool },
    Donate { amount: u64 },
    DeleteXnft { with_burn: bool },
}

impl XnftIx {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAppXnft { .. } => ix::CREATE_APP_XNFT,
            Self::CreateCollectibleXnft { .. } => ix::CREATE_COLLECTIBLE_XNFT,
            Self::UpdateXnft { .. } => ix::UPDATE_XNFT,
            Self::Transfer => ix::TRANSFER,
            Self::SetCurator => ix::SET_CURATOR,
            Self::SetCuratorVerification { .. } => ix::SET_CURATOR_VERIFICATION,
            Self::GrantAccess => ix::GRANT_ACCESS,
            Self::RevokeAccess => ix::REVOKE_ACCESS,
            Self::CreateInstall => ix::CREATE_INSTALL,
            Self::CreatePermissionedInstall => ix::CREATE_PERMISSIONED_INSTALL,
            Self::DeleteInstall => ix::DELETE_INSTALL,
            Self::CreateReview { .. } => ix::CREATE_REVIEW,
            Self::DeleteReview => ix::DELETE_REVIEW,
            Self::SetSuspended { .. } => ix::SET_SUSPENDED,
            Self::Donate { .. } => ix::DONATE,
            Self::DeleteXnft { .. } => ix::DELETE_XNFT,
        }
    }

    pub fn to_vec(&self) -> XnftResult<Vec<u8>> {
        let mut out = instruction_discriminator(self.name()).to_vec();
        let written = match self {
            Self::CreateAppXnft { name, params } => name
                .serialize(&mut out)
                .and_then(|_| params.serialize(&mut out)),
            Self::CreateCollectibleXnft { params } => params.serialize(&mut out),
            Self::UpdateXnft { updates } => updates.serialize(&mut out),
            Self::SetCuratorVerification { value } => value.serialize(&mut out),
            Self::CreateReview { uri, rating } => uri
                .serialize(&mut out)
                .and_then(|_| rating.serialize(&mut out)),
            Self::SetSuspended { flag } => flag.serialize(&mut out),
            Self::Donate { amount } => amount.serialize(&mut out),
            Self::DeleteXnft { with_burn } => with_burn.serialize(&mut out),
            _ => Ok(()),
        };
        written.map_err(|e| XnftError::serialization(format!("{}: {e}", self.name())))?;
        Ok(out)
    }

    pub fn from_slice(data: &[u8]) -> XnftResult<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(XnftError::decode("instruction data shorter than its discriminator"));
        }
        let (disc, mut args) = data.split_at(DISCRIMINATOR_LEN);
        let name = ix::ALL
            .iter()
            .find(|n| disc == instruction_discriminator(n))
            .ok_or_else(|| XnftError::decode(format!("unknown instruction {}", hex::encode(disc))))?;

        let args = &mut args;
        let bad = |e: std::io::Error| XnftError::decode(format!("{name} arguments: {e}"));
        let decoded = match *name {
            ix::CREATE_APP_XNFT => Self::CreateAppXnft {
                name: String::deserialize(args).map_err(bad)?,
                params: CreateXnftParams::deserialize(args).map_err(bad)?,
            },
            ix::CREATE_COLLECTIBLE_XNFT => Self::CreateCollectibleXnft {
                params: CreateXnftParams::deserialize(args).map_err(bad)?,
            },
            ix::UPDATE_XNFT => Self::UpdateXnft {
                updates: UpdateParams::deserialize(args).map_err(bad)?,
            },
            ix::TRANSFER => Self::Transfer,
            ix::SET_CURATOR => Self::SetCurator,
            ix::SET_CURATOR_VERIFICATION => Self::SetCuratorVerification {
                value: bool::deserialize(args).map_err(bad)?,
            },
            ix::GRANT_ACCESS => Self::GrantAccess,
            ix::REVOKE_ACCESS => Self::RevokeAccess,
            ix::CREATE_INSTALL => Self::CreateInstall,
            ix::CREATE_PERMISSIONED_INSTALL => Self::CreatePermissionedInstall,
            ix::DELETE_INSTALL => Self::DeleteInstall,
            ix::CREATE_REVIEW => Self::CreateReview {
                uri: String::deserialize(args).map_err(bad)?,
                rating: u8::deserialize(args).map_err(bad)?,
            },
            ix::DELETE_REVIEW => Self::DeleteReview,
            ix::SET_SUSPENDED => Self::SetSuspended {
                flag: bool::deserialize(args).map_err(bad)?,
            },
            ix::DONATE => Self::Donate {
                amount: u64::deserialize(args).map_err(bad)?,
            },
            ix::DELETE_XNFT => Self::DeleteXnft {
                with_burn: bool::deserialize(args).map_err(bad)?,
            },
            other => return Err(XnftError::decode(format!("no decoder for instruction {other}"))),
        };
        Ok(decoded)
    }
}

fn require_app(kind: Kind, operation: &'static str) -> XnftResult<()> {
    if kind.is_app() {
        Ok(())
    } else {
        Err(XnftError::UnsupportedForKind { operation, kind })
    }
}

/// Instruction builders bound to one program id.
#[derive(Debug, Clone, Copy)]
pub struct XnftInstructions {
    pub program_id: Pubkey,
}

impl XnftInstructions {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    fn instruction(&self, payload: XnftIx, accounts: Vec<AccountMeta>) -> XnftResult<Instruction> {
        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: payload.to_vec()?,
        })
    }

    /// Create an App xNFT. The master mint is derived from `(name, publisher)`.
    pub fn ix_create_app_xnft(
        &self,
        publisher: Pubkey,
        name: &str,
        params: CreateXnftParams,
    ) -> XnftResult<Instruction> {
        let (master_mint, _) = pda::derive_master_mint(&self.program_id, name, &publisher)?;
        let master_token = pda::derive_associated_token(&publisher, &master_mint)?;
        let pdas = pda::pdas_for_mint(&self.program_id, &master_mint)?;

        self.instruction(
            XnftIx::CreateAppXnft {
                name: name.to_string(),
                params,
            },
            vec![
                AccountMeta::new(master_mint, false),
                AccountMeta::new(master_token, false),
                AccountMeta::new(pdas.master_metadata.0, false),
                AccountMeta::new(pdas.master_edition.0, false),
                AccountMeta::new(pdas.xnft.0, false),
                AccountMeta::new(publisher, true),
                AccountMeta::new_readonly(publisher, true),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(TOKEN_METADATA_PROGRAM_ID, false),
                AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
            ],
        )
    }

    /// Wrap an existing collectible. The caller supplies its mint and metadata.
    pub fn ix_create_collectible_xnft(
        &self,
        publisher: Pubkey,
        master_mint: Pubkey,
        master_metadata: Pubkey,
        params: CreateXnftParams,
    ) -> XnftResult<Instruction> {
        let master_token = pda::derive_associated_token(&publisher, &master_mint)?;
        let (xnft, _) = pda::derive_xnft(&self.program_id, &master_mint)?;

        self.instruction(
            XnftIx::CreateCollectibleXnft { params },
            vec![
                AccountMeta::new_readonly(master_mint, false),
                AccountMeta::new_readonly(master_token, false),
                AccountMeta::new_readonly(master_metadata, false),
                AccountMeta::new(xnft, false),
                AccountMeta::new(publisher, true),
                AccountMeta::new_readonly(publisher, true),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
        )
    }

    /// Signed by the owner. Once a curator is verified the program expects its
    /// key in the curator slot; otherwise the owner's key fills it. The
    /// curator never signs.
    pub fn ix_update_xnft(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        master_token: Pubkey,
        master_metadata: Pubkey,
        curator: Option<Pubkey>,
        updates: UpdateParams,
    ) -> XnftResult<Instruction> {
        updates.validate()?;

        self.instruction(
            XnftIx::UpdateXnft { updates },
            vec![
                AccountMeta::new(xnft, false),
                AccountMeta::new_readonly(master_token, false),
                AccountMeta::new(master_metadata, false),
                AccountMeta::new_readonly(curator.unwrap_or(authority), false),
                AccountMeta::new_readonly(authority, true),
                AccountMeta::new_readonly(TOKEN_METADATA_PROGRAM_ID, false),
            ],
        )
    }

    pub fn ix_transfer(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        kind: Kind,
        master_mint: Pubkey,
        recipient: Pubkey,
    ) -> XnftResult<Instruction> {
        require_app(kind, ix::TRANSFER)?;
        let source = pda::derive_associated_token(&authority, &master_mint)?;
        let destination = pda::derive_associated_token(&recipient, &master_mint)?;

        self.instruction(
            XnftIx::Transfer,
            vec![
                AccountMeta::new_readonly(xnft, false),
                AccountMeta::new_readonly(master_mint, false),
                AccountMeta::new(source, false),
                AccountMeta::new(destination, false),
                AccountMeta::new_readonly(recipient, false),
                AccountMeta::new(authority, true),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
        )
    }

    pub fn ix_set_curator(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        master_token: Pubkey,
        curator: Pubkey,
    ) -> XnftResult<Instruction> {
        self.instruction(
            XnftIx::SetCurator,
            vec![
                AccountMeta::new(xnft, false),
                AccountMeta::new_readonly(master_token, false),
                AccountMeta::new_readonly(curator, false),
                AccountMeta::new(authority, true),
            ],
        )
    }

    /// Verify (`value = true`) or unverify the curator. Signed by the curator.
    pub fn ix_set_curator_verification(
        &self,
        curator: Pubkey,
        xnft: Pubkey,
        value: bool,
    ) -> XnftResult<Instruction> {
        self.instruction(
            XnftIx::SetCuratorVerification { value },
            vec![
                AccountMeta::new(xnft, false),
                AccountMeta::new_readonly(curator, true),
            ],
        )
    }

    pub fn ix_grant_access(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        wallet: Pubkey,
    ) -> XnftResult<Instruction> {
        let (access, _) = pda::derive_access(&self.program_id, &wallet, &xnft)?;
        self.instruction(
            XnftIx::GrantAccess,
            vec![
                AccountMeta::new_readonly(xnft, false),
                AccountMeta::new_readonly(wallet, false),
                AccountMeta::new(access, false),
                AccountMeta::new(authority, true),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
        )
    }

    pub fn ix_revoke_access(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        wallet: Pubkey,
    ) -> XnftResult<Instruction> {
        let (access, _) = pda::derive_access(&self.program_id, &wallet, &xnft)?;
        self.instruction(
            XnftIx::RevokeAccess,
            vec![
                AccountMeta::new_readonly(xnft, false),
                AccountMeta::new_readonly(wallet, false),
                AccountMeta::new(access, false),
                AccountMeta::new(authority, true),
            ],
        )
    }

    /// Install an App xNFT. With `permissioned`, the installer's access record
    /// is passed as proof of authorization.
    pub fn ix_create_install(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        record: &XnftRecord,
        permissioned: bool,
    ) -> XnftResult<Instruction> {
        let operation = if permissioned {
            ix::CREATE_PERMISSIONED_INSTALL
        } else {
            ix::CREATE_INSTALL
        };
        require_app(record.kind, operation)?;

        let (install, _) = pda::derive_install(&self.program_id, &authority, &xnft)?;
        let mut accounts = vec![
            AccountMeta::new(xnft, false),
            AccountMeta::new(record.install_vault, false),
            AccountMeta::new(install, false),
        ];

        let payload = if permissioned {
            let (access, _) = pda::derive_access(&self.program_id, &authority, &xnft)?;
            accounts.push(AccountMeta::new_readonly(access, false));
            XnftIx::CreatePermissionedInstall
        } else {
            XnftIx::CreateInstall
        };

        accounts.push(AccountMeta::new(authority, true));
        accounts.push(AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false));
        self.instruction(payload, accounts)
    }

    pub fn ix_delete_install(
        &self,
        authority: Pubkey,
        install: Pubkey,
        receiver: Pubkey,
    ) -> XnftResult<Instruction> {
        self.instruction(
            XnftIx::DeleteInstall,
            vec![
                AccountMeta::new(install, false),
                AccountMeta::new(receiver, false),
                AccountMeta::new_readonly(authority, true),
            ],
        )
    }

    /// Review an installed xNFT. `master_token` is the account currently
    /// holding the xNFT's master token.
    pub fn ix_create_review(
        &self,
        author: Pubkey,
        xnft: Pubkey,
        master_token: Pubkey,
        uri: &str,
        rating: u8,
    ) -> XnftResult<Instruction> {
        let (install, _) = pda::derive_install(&self.program_id, &author, &xnft)?;
        let (review, _) = pda::derive_review(&self.program_id, &xnft, &author)?;

        self.instruction(
            XnftIx::CreateReview {
                uri: uri.to_string(),
                rating,
            },
            vec![
                AccountMeta::new_readonly(install, false),
                AccountMeta::new_readonly(master_token, false),
                AccountMeta::new(xnft, false),
                AccountMeta::new(review, false),
                AccountMeta::new(author, true),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            ],
        )
    }

    pub fn ix_delete_review(
        &self,
        author: Pubkey,
        review: Pubkey,
        xnft: Pubkey,
        receiver: Pubkey,
    ) -> XnftResult<Instruction> {
        self.instruction(
            XnftIx::DeleteReview,
            vec![
                AccountMeta::new(review, false),
                AccountMeta::new(xnft, false),
                AccountMeta::new(receiver, false),
                AccountMeta::new_readonly(author, true),
            ],
        )
    }

    pub fn ix_set_suspended(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        kind: Kind,
        master_token: Pubkey,
        flag: bool,
    ) -> XnftResult<Instruction> {
        require_app(kind, ix::SET_SUSPENDED)?;
        self.instruction(
            XnftIx::SetSuspended { flag },
            vec![
                AccountMeta::new(xnft, false),
                AccountMeta::new_readonly(master_token, false),
                AccountMeta::new_readonly(authority, true),
            ],
        )
    }

    /// Donate lamports; the program splits `amount` across `creators` by share.
    pub fn ix_donate(
        &self,
        donator: Pubkey,
        xnft: Pubkey,
        master_metadata: Pubkey,
        creators: &[Pubkey],
        amount: u64,
    ) -> XnftResult<Instruction> {
        if amount == 0 {
            return Err(XnftError::invalid_argument("donation amount must be positive"));
        }

        let mut accounts = vec![
            AccountMeta::new_readonly(xnft, false),
            AccountMeta::new_readonly(master_metadata, false),
            AccountMeta::new(donator, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ];
        accounts.extend(creators.iter().map(|c| AccountMeta::new(*c, false)));

        self.instruction(XnftIx::Donate { amount }, accounts)
    }

    /// Close an xNFT. With `with_burn` the master token is burned and its
    /// token account closed as well.
    pub fn ix_delete_xnft(
        &self,
        authority: Pubkey,
        xnft: Pubkey,
        record: &XnftRecord,
        receiver: Pubkey,
        with_burn: bool,
    ) -> XnftResult<Instruction> {
        let master_token = pda::derive_associated_token(&authority, &record.master_mint)?;
        self.instruction(
            XnftIx::DeleteXnft { with_burn },
            vec![
                AccountMeta::new(xnft, false),
                AccountMeta::new(record.master_metadata, false),
                AccountMeta::new(master_token, false),
                AccountMeta::new(record.master_mint, false),
                AccountMeta::new(receiver, false),
                AccountMeta::new_readonly(authority, true),
                AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            ],
        )
    }
}

/// Wrap instructions in an unsigned transaction paid for by `payer`.
pub fn build_transaction(instructions: &[Instruction], payer: &Pubkey) -> Transaction {
    Transaction::new_with_payer(instructions, Some(payer))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use xnft_core::constants::XNFT_PROGRAM_ID;
    use xnft_core::model::{CuratorStatus, Tag};

    use super::*;

    fn builder() -> XnftInstructions {
        XnftInstructions::new(XNFT_PROGRAM_ID)
    }

    fn record(kind: Kind) -> XnftRecord {
        XnftRecord {
            authority: Pubkey::new_unique(),
            publisher: Pubkey::new_unique(),
            install_vault: Pubkey::new_unique(),
            master_edition: Pubkey::new_unique(),
            master_metadata: Pubkey::new_unique(),
            master_mint: Pubkey::new_unique(),
            bump: 255,
            kind,
            tag: Tag::None,
            install_authority: None,
            name: "app".into(),
            total_installs: 0,
            install_price: 0,
            created_ts: 0,
            updated_ts: 0,
            suspended: false,
            total_rating: 0,
            num_ratings: 0,
            supply: None,
            curator: Some(CuratorStatus {
                pubkey: Pubkey::new_unique(),
                verified: false,
            }),
            uri: "ipfs://x".into(),
        }
    }

    #[test]
    fn payload_round_trips_through_data() {
        let payloads = [
            XnftIx::CreateReview {
                uri: "ar://review".into(),
                rating: 5,
            },
            XnftIx::SetSuspended { flag: true },
            XnftIx::Donate { amount: 42 },
            XnftIx::UpdateXnft {
                updates: UpdateParams {
                    tag: Some(Tag::Game),
                    ..Default::default()
                },
            },
            XnftIx::DeleteXnft { with_burn: true },
        ];
        for p in payloads {
            assert_eq!(XnftIx::from_slice(&p.to_vec().unwrap()).unwrap(), p);
        }
    }

    #[test]
    fn data_starts_with_discriminator() {
        let data = XnftIx::CreateInstall.to_vec().unwrap();
        assert_eq!(data, instruction_discriminator("create_install").to_vec());
        assert_matches!(XnftIx::from_slice(&[0u8; 8]), Err(XnftError::Decode(_)));
    }

    #[test]
    fn collectible_kind_rejected_locally() {
        let b = builder();
        let signer = Pubkey::new_unique();
        let rec = record(Kind::Collectible);
        let xnft = Pubkey::new_unique();

        assert_matches!(
            b.ix_create_install(signer, xnft, &rec, false),
            Err(XnftError::UnsupportedForKind { operation: "create_install", kind: Kind::Collectible })
        );
        assert_matches!(
            b.ix_set_suspended(signer, xnft, Kind::Collectible, Pubkey::new_unique(), true),
            Err(XnftError::UnsupportedForKind { .. })
        );
        assert_matches!(
            b.ix_transfer(signer, xnft, Kind::Collectible, rec.master_mint, Pubkey::new_unique()),
            Err(XnftError::UnsupportedForKind { .. })
        );
    }

    #[test]
    fn install_accounts_follow_program_order() {
        let b = builder();
        let signer = Pubkey::new_unique();
        let rec = record(Kind::App);
        let xnft = Pubkey::new_unique();

        let ix = b.ix_create_install(signer, xnft, &rec, false).unwrap();
        let (install, _) = pda::derive_install(&XNFT_PROGRAM_ID, &signer, &xnft).unwrap();
        let keys: Vec<Pubkey> = ix.accounts.iter().map(|a| a.pubkey).collect();
        assert_eq!(keys, vec![xnft, rec.install_vault, install, signer, SYSTEM_PROGRAM_ID]);
        assert!(ix.accounts[3].is_signer && ix.accounts[3].is_writable);

        let ix = b.ix_create_install(signer, xnft, &rec, true).unwrap();
        let (access, _) = pda::derive_access(&XNFT_PROGRAM_ID, &signer, &xnft).unwrap();
        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(ix.accounts[3].pubkey, access);
        assert_eq!(XnftIx::from_slice(&ix.data).unwrap(), XnftIx::CreatePermissionedInstall);
    }

    #[test]
    fn app_creation_derives_mint_from_name() {
        let publisher = Pubkey::new_unique();
        let params = CreateXnftParams::new(publisher, "ipfs://doc");
        let ix = builder().ix_create_app_xnft(publisher, "backpack", params).unwrap();

        let (mint, _) = pda::derive_master_mint(&XNFT_PROGRAM_ID, "backpack", &publisher).unwrap();
        let (xnft, _) = pda::derive_xnft(&XNFT_PROGRAM_ID, &mint).unwrap();
        assert_eq!(ix.accounts[0].pubkey, mint);
        assert_eq!(ix.accounts[4].pubkey, xnft);
        assert_eq!(ix.program_id, XNFT_PROGRAM_ID);
    }

    #[test]
    fn update_is_signed_by_owner_only() {
        let owner = Pubkey::new_unique();
        let curator = Pubkey::new_unique();
        let update = |curator| {
            builder()
                .ix_update_xnft(
                    owner,
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    Pubkey::new_unique(),
                    curator,
                    UpdateParams::default(),
                )
                .unwrap()
        };

        let ix = update(Some(curator));
        assert_eq!(ix.accounts[3].pubkey, curator);
        assert!(!ix.accounts[3].is_signer);
        assert_eq!(ix.accounts[4].pubkey, owner);
        assert!(ix.accounts[4].is_signer);

        let ix = update(None);
        assert_eq!(ix.accounts[3].pubkey, owner);
        assert!(!ix.accounts[3].is_signer);
        let tx = build_transaction(&[ix], &owner);
        assert_eq!(tx.message.header.num_required_signatures, 1);
    }

    #[test]
    fn delete_carries_burn_flag() {
        let owner = Pubkey::new_unique();
        let rec = record(Kind::App);
        let ix = builder()
            .ix_delete_xnft(owner, Pubkey::new_unique(), &rec, owner, true)
            .unwrap();
        assert_eq!(ix.data.len(), 9);
        assert_eq!(ix.data[8], 1);
        assert_eq!(XnftIx::from_slice(&ix.data).unwrap(), XnftIx::DeleteXnft { with_burn: true });

        // the flag is not optional
        assert_matches!(XnftIx::from_slice(&ix.data[..8]), Err(XnftError::Decode(_)));
    }

    #[test]
    fn donate_appends_creators() {
        let creators = [Pubkey::new_unique(), Pubkey::new_unique()];
        let ix = builder()
            .ix_donate(
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                &creators,
                1_000,
            )
            .unwrap();
        assert_eq!(ix.accounts.len(), 6);
        assert!(ix.accounts[4..].iter().all(|a| a.is_writable && !a.is_signer));
        assert!(builder()
            .ix_donate(Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), &[], 0)
            .is_err());
    }

    #[test]
    fn transaction_is_unsigned() {
        let payer = Pubkey::new_unique();
        let ix = builder().ix_set_curator_verification(payer, Pubkey::new_unique(), true).unwrap();
        let tx = build_transaction(&[ix], &payer);
        assert!(!tx.is_signed());
        assert_eq!(tx.message.account_keys[0], payer);
    }
}
