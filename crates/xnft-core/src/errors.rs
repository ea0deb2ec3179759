//! Error taxonomy for the xNFT SDK.
//!
//! Three families share one enum:
//! - structural errors raised locally before anything reaches the network
//!   (`InvalidSeed`, `MissingSigner`, `UnsupportedForKind`)
//! - protocol rejections raised by the ledger program and translated from its
//!   error codes (`Protocol`, `UnknownProtocolError`)
//! - collaborator failures (`MetadataFetchFailed`, `Rpc`, `Decode`, ...)

use thiserror::Error;

use crate::model::Kind;

pub type XnftResult<T> = Result<T, XnftError>;

#[derive(Debug, Error)]
pub enum XnftError {
    #[error("invalid seed: {seed:?} is {len} bytes, the maximum is {max}")]
    InvalidSeed { seed: String, len: usize, max: usize },

    #[error("a signer is required for {operation}")]
    MissingSigner { operation: &'static str },

    #[error("{operation} is not supported for {kind:?} xNFTs")]
    UnsupportedForKind { operation: &'static str, kind: Kind },

    #[error("protocol rejected the transaction: {0}")]
    Protocol(ProtocolError),

    #[error("unknown protocol error {code}: {message}")]
    UnknownProtocolError { code: u32, message: String },

    #[error("metadata fetch failed for {uri}: {reason}")]
    MetadataFetchFailed { uri: String, reason: String },

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl XnftError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn rpc(msg: impl Into<String>) -> Self {
        Self::Rpc(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn metadata_fetch(uri: impl Into<String>, reason: impl ToString) -> Self {
        Self::MetadataFetchFailed {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors raised before any network call was made.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeed { .. } | Self::MissingSigner { .. } | Self::UnsupportedForKind { .. }
        )
    }

    /// The protocol rejection, if this error is one.
    pub fn protocol(&self) -> Option<ProtocolError> {
        match self {
            Self::Protocol(p) => Some(*p),
            _ => None,
        }
    }
}

/// Rule rejections defined by the xNFT program.
///
/// Codes start at 6000 and follow declaration order; the mapping itself lives
/// in the client's error table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolError {
    #[error("You cannot create a review for an xNFT that you currently own or published")]
    CannotReviewOwned,
    #[error("A collection pubkey was provided without the collection Kind variant")]
    CollectionWithoutKind,
    #[error("There is already a verified curator assigned")]
    CuratorAlreadySet,
    #[error("The expected curator authority did not match expected")]
    CuratorAuthorityMismatch,
    #[error("The provided curator account did not match the one assigned")]
    CuratorMismatch,
    #[error("The provided xNFT install authority did not match")]
    InstallAuthorityMismatch,
    #[error("The max supply has been reached for the xNFT")]
    InstallExceedsSupply,
    #[error("The asserted authority/owner did not match that of the Install account")]
    InstallOwnerMismatch,
    #[error("The metadata of the xNFT is marked as immutable")]
    MetadataIsImmutable,
    #[error("The xNFT must be of `Kind::App` for this operation")]
    MustBeApp,
    #[error("The rating for a review must be between 0 and 5")]
    RatingOutOfBounds,
    #[error("The installation provided for the review does not match the xNFT")]
    ReviewInstallMismatch,
    #[error("Updated supply is less than the original supply set on creation")]
    SupplyReduction,
    #[error("Attempting to install a currently suspended xNFT")]
    SuspendedInstallation,
    #[error("The access account provided is not associated with the wallet")]
    UnauthorizedInstall,
    #[error("The signer did not match the update authority of the metadata account or the owner")]
    UpdateAuthorityMismatch,
    #[error("The signing authority for the xNFT update did not match the review authority")]
    UpdateReviewAuthorityMismatch,
    #[error("The metadata URI provided exceeds the maximum length")]
    UriExceedsMaxLength,
    #[error("An unknown or unprovided creator was included in the list")]
    UnknownCreator,
    #[error("The account being initialized is already in use")]
    AccountAlreadyExists,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_classification() {
        assert!(XnftError::MissingSigner { operation: "install" }.is_structural());
        assert!(XnftError::UnsupportedForKind {
            operation: "transfer",
            kind: Kind::Collectible
        }
        .is_structural());
        assert!(!XnftError::Protocol(ProtocolError::MustBeApp).is_structural());
        assert!(!XnftError::rpc("down").is_structural());
    }

    #[test]
    fn protocol_accessor() {
        let e = XnftError::Protocol(ProtocolError::RatingOutOfBounds);
        assert_eq!(e.protocol(), Some(ProtocolError::RatingOutOfBounds));
        assert_eq!(XnftError::decode("x").protocol(), None);
    }

    #[test]
    fn display_includes_details() {
        let e = XnftError::InvalidSeed {
            seed: "a".repeat(33),
            len: 33,
            max: 32,
        };
        assert!(e.to_string().contains("33 bytes"));

        let e = XnftError::UnknownProtocolError {
            code: 9999,
            message: "boom".into(),
        };
        assert_eq!(e.to_string(), "unknown protocol error 9999: boom");
    }
}
