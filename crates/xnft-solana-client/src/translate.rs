//! Ledger failure translation.
//!
//! The ledger reports a rejected transaction as an opaque custom error code
//! and a set of program log lines. [`translate`] maps known codes to
//! [`ProtocolError`] through one static table and passes anything else through
//! as `UnknownProtocolError` with its raw details.

use xnft_core::constants::PROGRAM_ERROR_OFFSET;
use xnft_core::{ProtocolError, XnftError};

/// One row of the program's error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEntry {
    pub code: u32,
    pub kind: ProtocolError,
    pub name: &'static str,
}

const fn entry(offset: u32, kind: ProtocolError, name: &'static str) -> ErrorEntry {
    ErrorEntry {
        code: PROGRAM_ERROR_OFFSET + offset,
        kind,
        name,
    }
}

/// System program rejection for initializing an address that already holds an account.
pub const ACCOUNT_IN_USE_CODE: u32 = 0;

pub static ERROR_TABLE: &[ErrorEntry] = &[
    ErrorEntry {
        code: ACCOUNT_IN_USE_CODE,
        kind: ProtocolError::AccountAlreadyExists,
        name: "AccountAlreadyInUse",
    },
    entry(0, ProtocolError::CannotReviewOwned, "CannotReviewOwned"),
    entry(1, ProtocolError::CollectionWithoutKind, "CollectionWithoutKind"),
    entry(2, ProtocolError::CuratorAlreadySet, "CuratorAlreadySet"),
    entry(3, ProtocolError::CuratorAuthorityMismatch, "CuratorAuthorityMismatch"),
    entry(4, ProtocolError::CuratorMismatch, "CuratorMismatch"),
    entry(5, ProtocolError::InstallAuthorityMismatch, "InstallAuthorityMismatch"),
    entry(6, ProtocolError::InstallExceedsSupply, "InstallExceedsSupply"),
    entry(7, ProtocolError::InstallOwnerMismatch, "InstallOwnerMismatch"),
    entry(8, ProtocolError::MetadataIsImmutable, "MetadataIsImmutable"),
    entry(9, ProtocolError::MustBeApp, "MustBeApp"),
    entry(10, ProtocolError::RatingOutOfBounds, "RatingOutOfBounds"),
    entry(11, ProtocolError::ReviewInstallMismatch, "ReviewInstallMismatch"),
    entry(12, ProtocolError::SupplyReduction, "SupplyReduction"),
    entry(13, ProtocolError::SuspendedInstallation, "SuspendedInstallation"),
    entry(14, ProtocolError::UnauthorizedInstall, "UnauthorizedInstall"),
    entry(15, ProtocolError::UpdateAuthorityMismatch, "UpdateAuthorityMismatch"),
    entry(16, ProtocolError::UpdateReviewAuthorityMismatch, "UpdateReviewAuthorityMismatch"),
    entry(17, ProtocolError::UriExceedsMaxLength, "UriExceedsMaxLength"),
    entry(18, ProtocolError::UnknownCreator, "UnknownCreator"),
];

pub fn lookup(code: u32) -> Option<&'static ErrorEntry> {
    ERROR_TABLE.iter().find(|e| e.code == code)
}

/// Reverse lookup, used to report a rule rejection as the program would.
pub fn code_of(kind: ProtocolError) -> Option<u32> {
    ERROR_TABLE.iter().find(|e| e.kind == kind).map(|e| e.code)
}

/// A transaction failure as reported by the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFailure {
    /// Structured custom error code, when the transport surfaced one.
    pub code: Option<u32>,
    pub logs: Vec<String>,
    pub message: String,
}

impl RawFailure {
    pub fn with_code(code: u32, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            logs: Vec::new(),
            message: message.into(),
        }
    }

    /// A failure that never reached the program.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            logs: Vec::new(),
            message: message.into(),
        }
    }

    /// The custom code, from the structured field or else from the logs.
    pub fn custom_code(&self) -> Option<u32> {
        self.code
            .or_else(|| self.logs.iter().rev().find_map(|l| parse_custom_code(l)))
            .or_else(|| parse_custom_code(&self.message))
    }
}

/// Extract `N` from a `"custom program error: 0xN"` log line.
pub fn parse_custom_code(line: &str) -> Option<u32> {
    const MARKER: &str = "custom program error: 0x";
    let start = line.find(MARKER)? + MARKER.len();
    let hex: String = line[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    u32::from_str_radix(&hex, 16).ok()
}

/// Map a ledger failure into the domain error taxonomy.
pub fn translate(raw: RawFailure) -> XnftError {
    match raw.custom_code() {
        Some(code) => match lookup(code) {
            Some(e) => XnftError::Protocol(e.kind),
            None => XnftError::UnknownProtocolError {
                code,
                message: raw.message,
            },
        },
        None => XnftError::Rpc(raw.message),
    }
}
