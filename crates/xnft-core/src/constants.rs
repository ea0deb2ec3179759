//! Protocol constants shared between the on-chain program and clients.
//!
//! Keep these stable because they affect address derivation and account layout.

use solana_program::pubkey;
use solana_program::pubkey::Pubkey;

/// The deployed xNFT program.
pub const XNFT_PROGRAM_ID: Pubkey = pubkey!("xnft5aaToUM4UFETUQfj7NUDUBdvYHTVhNFThEYTm55");

/// Token-metadata program that owns the descriptive record of every master mint.
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

pub const RENT_SYSVAR_ID: Pubkey = pubkey!("SysvarRent111111111111111111111111111111111");

/// Seed for the master mint of an App xNFT: `"mint" ‖ publisher ‖ name`.
pub const SEED_MINT: &[u8] = b"mint";

/// Seed for the xNFT record: `"xnft" ‖ master_mint`.
pub const SEED_XNFT: &[u8] = b"xnft";

/// Seed for an install record: `"install" ‖ authority ‖ xnft`.
pub const SEED_INSTALL: &[u8] = b"install";

/// Seed for a review record: `"review" ‖ xnft ‖ author`.
pub const SEED_REVIEW: &[u8] = b"review";

/// Seed for an access record: `"access" ‖ wallet ‖ xnft`.
pub const SEED_ACCESS: &[u8] = b"access";

/// Seed for the token-metadata record: `"metadata" ‖ metadata_program ‖ mint`.
pub const SEED_METADATA: &[u8] = b"metadata";

/// Seed suffix for the token-metadata master edition record.
pub const SEED_EDITION: &[u8] = b"edition";

/// Maximum length of a single derivation seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum byte length of an xNFT name. Bounded by [`MAX_SEED_LEN`] since the
/// name is a master mint seed.
pub const MAX_NAME_LEN: usize = MAX_SEED_LEN;

/// Maximum byte length of a metadata uri accepted by the token-metadata program.
pub const MAX_URI_LEN: usize = 200;

pub const MIN_RATING: u8 = 0;
pub const MAX_RATING: u8 = 5;

/// Most addresses the RPC accepts in one `getMultipleAccounts` request.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// First custom error code emitted by the program.
pub const PROGRAM_ERROR_OFFSET: u32 = 6000;

/// Byte offsets of fixed-position fields, used for collection filters.
pub mod offsets {
    pub const DISCRIMINATOR: usize = 0;

    pub const XNFT_AUTHORITY: usize = 8;
    pub const XNFT_PUBLISHER: usize = 40;
    pub const XNFT_MASTER_MINT: usize = 168;
    /// Option tag of `install_authority`. Later fields have no fixed offset.
    pub const XNFT_INSTALL_AUTHORITY: usize = 200;

    pub const INSTALL_AUTHORITY: usize = 8;
    pub const INSTALL_XNFT: usize = 40;

    pub const REVIEW_AUTHOR: usize = 8;
    pub const REVIEW_XNFT: usize = 40;

    pub const ACCESS_WALLET: usize = 8;
    pub const ACCESS_XNFT: usize = 40;

    pub const TOKEN_MINT: usize = 0;
    pub const TOKEN_OWNER: usize = 32;
    pub const TOKEN_AMOUNT: usize = 64;
}

/// Size of an SPL token account.
pub const TOKEN_ACCOUNT_LEN: usize = 165;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_ids_are_distinct() {
        let ids = [
            XNFT_PROGRAM_ID,
            TOKEN_METADATA_PROGRAM_ID,
            TOKEN_PROGRAM_ID,
            ASSOCIATED_TOKEN_PROGRAM_ID,
            SYSTEM_PROGRAM_ID,
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn name_limit_fits_in_a_seed() {
        assert!(MAX_NAME_LEN <= MAX_SEED_LEN);
    }
}
