//! Discriminator hashing for the xNFT wire format.
//!
//! Every account starts with `sha256("account:<TypeName>")[..8]` and every
//! instruction with `sha256("global:<snake_name>")[..8]`. Both are pure
//! functions of their names and must never change.

use sha2::{Digest, Sha256};

pub const DISCRIMINATOR_LEN: usize = 8;

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

/// Domain-separated 8-byte prefix of `sha256("<namespace>:<name>")`.
pub fn sighash(namespace: &str, name: &str) -> Discriminator {
    let mut h = Sha256::new();
    h.update(namespace.as_bytes());
    h.update(b":");
    h.update(name.as_bytes());
    let digest = h.finalize();

    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Discriminator of an account type, e.g. `"Xnft"`.
pub fn account_discriminator(type_name: &str) -> Discriminator {
    sighash(crate::namespace::ACCOUNT, type_name)
}

/// Discriminator of an instruction, e.g. `"create_install"`.
pub fn instruction_discriminator(ix_name: &str) -> Discriminator {
    sighash(crate::namespace::INSTRUCTION, ix_name)
}

/// Hash raw bytes and return lowercase hex string.
pub fn hash_bytes_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
