//! Client-side constants.
//!
//! Instruction names feed the instruction discriminators, so they must match
//! the deployed program exactly.

/// Version string reported in the HTTP user agent and CLI output.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Little-endian token amount of a unique-supply master token.
pub const SINGLE_TOKEN_AMOUNT: [u8; 8] = 1u64.to_le_bytes();

pub mod ix {
    pub const CREATE_APP_XNFT: &str = "create_app_xnft";
    pub const CREATE_COLLECTIBLE_XNFT: &str = "create_collectible_xnft";
    pub const UPDATE_XNFT: &str = "update_xnft";
    pub const TRANSFER: &str = "transfer";
    pub const SET_CURATOR: &str = "set_curator";
    pub const SET_CURATOR_VERIFICATION: &str = "set_curator_verification";
    pub const GRANT_ACCESS: &str = "grant_access";
    pub const REVOKE_ACCESS: &str = "revoke_access";
    pub const CREATE_INSTALL: &str = "create_install";
    pub const CREATE_PERMISSIONED_INSTALL: &str = "create_permissioned_install";
    pub const DELETE_INSTALL: &str = "delete_install";
    pub const CREATE_REVIEW: &str = "create_review";
    pub const DELETE_REVIEW: &str = "delete_review";
    pub const SET_SUSPENDED: &str = "set_suspended";
    pub const DONATE: &str = "donate";
    pub const DELETE_XNFT: &str = "delete_xnft";

    /// Every instruction the program exposes.
    pub const ALL: [&str; 16] = [
        CREATE_APP_XNFT,
        CREATE_COLLECTIBLE_XNFT,
        UPDATE_XNFT,
        TRANSFER,
        SET_CURATOR,
        SET_CURATOR_VERIFICATION,
        GRANT_ACCESS,
        REVOKE_ACCESS,
        CREATE_INSTALL,
        CREATE_PERMISSIONED_INSTALL,
        DELETE_INSTALL,
        CREATE_REVIEW,
        DELETE_REVIEW,
        SET_SUSPENDED,
        DONATE,
        DELETE_XNFT,
    ];
}
