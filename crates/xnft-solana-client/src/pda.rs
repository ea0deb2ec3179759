//! Address derivation for the xNFT program.
//!
//! Every derivation is a pure function of its seeds and the owning program id.
//! Seeds are length-checked before hashing so an oversized name fails with
//! `InvalidSeed` here instead of as a failed transaction.

use solana_program::pubkey::Pubkey;
use tracing::debug;
use xnft_core::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, MAX_SEED_LEN, SEED_ACCESS, SEED_EDITION, SEED_INSTALL,
    SEED_METADATA, SEED_MINT, SEED_REVIEW, SEED_XNFT, TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use xnft_core::{XnftError, XnftResult};

/// Addresses that hang off a single master mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XnftPdas {
    pub xnft: (Pubkey, u8),
    pub master_metadata: (Pubkey, u8),
    pub master_edition: (Pubkey, u8),
}

/// Find the first off-curve address for `seeds` under `program_id`.
pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> XnftResult<(Pubkey, u8)> {
    for seed in seeds {
        if seed.len() > MAX_SEED_LEN {
            return Err(XnftError::InvalidSeed {
                seed: String::from_utf8_lossy(seed).into_owned(),
                len: seed.len(),
                max: MAX_SEED_LEN,
            });
        }
    }

    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| XnftError::invalid_argument("no off-curve address exists for these seeds"))
}

/// Master mint of an App xNFT: `"mint" ‖ publisher ‖ name`.
pub fn derive_master_mint(
    program_id: &Pubkey,
    name: &str,
    publisher: &Pubkey,
) -> XnftResult<(Pubkey, u8)> {
    let out = derive(&[SEED_MINT, publisher.as_ref(), name.as_bytes()], program_id)?;
    debug!(name, publisher = %publisher, master_mint = %out.0, "derived master mint");
    Ok(out)
}

/// The xNFT record: `"xnft" ‖ master_mint`.
pub fn derive_xnft(program_id: &Pubkey, master_mint: &Pubkey) -> XnftResult<(Pubkey, u8)> {
    derive(&[SEED_XNFT, master_mint.as_ref()], program_id)
}

/// Install record: `"install" ‖ authority ‖ xnft`.
pub fn derive_install(
    program_id: &Pubkey,
    authority: &Pubkey,
    xnft: &Pubkey,
) -> XnftResult<(Pubkey, u8)> {
    derive(&[SEED_INSTALL, authority.as_ref(), xnft.as_ref()], program_id)
}

/// Review record: `"review" ‖ xnft ‖ author`.
pub fn derive_review(
    program_id: &Pubkey,
    xnft: &Pubkey,
    author: &Pubkey,
) -> XnftResult<(Pubkey, u8)> {
    derive(&[SEED_REVIEW, xnft.as_ref(), author.as_ref()], program_id)
}

/// Access record: `"access" ‖ wallet ‖ xnft`.
pub fn derive_access(
    program_id: &Pubkey,
    wallet: &Pubkey,
    xnft: &Pubkey,
) -> XnftResult<(Pubkey, u8)> {
    derive(&[SEED_ACCESS, wallet.as_ref(), xnft.as_ref()], program_id)
}

/// Token-metadata record of a mint.
pub fn derive_metadata(mint: &Pubkey) -> XnftResult<(Pubkey, u8)> {
    derive(
        &[SEED_METADATA, TOKEN_METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// Master edition record of a mint.
pub fn derive_master_edition(mint: &Pubkey) -> XnftResult<(Pubkey, u8)> {
    derive(
        &[
            SEED_METADATA,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            SEED_EDITION,
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// Associated token account of `wallet` for `mint`.
pub fn derive_associated_token(wallet: &Pubkey, mint: &Pubkey) -> XnftResult<Pubkey> {
    derive(
        &[wallet.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _)| address)
}

/// Collect the addresses most flows need for a master mint.
pub fn pdas_for_mint(program_id: &Pubkey, master_mint: &Pubkey) -> XnftResult<XnftPdas> {
    Ok(XnftPdas {
        xnft: derive_xnft(program_id, master_mint)?,
        master_metadata: derive_metadata(master_mint)?,
        master_edition: derive_master_edition(master_mint)?,
    })
}
