//! Version helpers.
//!
//! This module centralizes version parsing and validation for off-chain xNFT
//! metadata documents. Versions are semantic versions; storage backends are a
//! closed set of tags.

use serde_json::Value;

use crate::errors::{XnftError, XnftResult};

/// Semantic version of a published xNFT bundle, e.g. `"1.2.0"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ManifestVersion(semver::Version);

impl ManifestVersion {
    pub fn parse(s: &str) -> XnftResult<Self> {
        semver::Version::parse(s)
            .map(Self)
            .map_err(|e| XnftError::invalid_argument(format!("invalid semantic version {s:?}: {e}")))
    }

    pub fn inner(&self) -> &semver::Version {
        &self.0
    }
}

impl std::fmt::Display for ManifestVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a bundle's files are hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTag {
    Arweave,
    Aws,
    Ipfs,
}

impl StorageTag {
    pub fn parse(s: &str) -> XnftResult<Self> {
        match s {
            "arweave" => Ok(Self::Arweave),
            "aws" => Ok(Self::Aws),
            "ipfs" => Ok(Self::Ipfs),
            _ => Err(XnftError::invalid_argument(format!(
                "unsupported storage backend: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arweave => "arweave",
            Self::Aws => "aws",
            Self::Ipfs => "ipfs",
        }
    }
}

/// Validate the versioned parts of a metadata document.
///
/// The document must be a JSON object. When `properties.version` is present it
/// must be a semantic version; when a storage tag is present (either
/// `properties.storage` or `properties.manifest.storage`) it must be known.
/// Absent fields are accepted since token-level documents carry neither.
pub fn validate_document(doc: &Value) -> XnftResult<()> {
    let obj = doc
        .as_object()
        .ok_or_else(|| XnftError::invalid_argument("metadata document must be a JSON object"))?;

    let Some(props) = obj.get("properties") else {
        return Ok(());
    };

    if let Some(v) = props.get("version") {
        let s = v
            .as_str()
            .ok_or_else(|| XnftError::invalid_argument("properties.version must be a string"))?;
        ManifestVersion::parse(s)?;
    }

    let storage = props
        .get("storage")
        .or_else(|| props.get("manifest").and_then(|m| m.get("storage")));
    if let Some(tag) = storage {
        let s = tag
            .as_str()
            .ok_or_else(|| XnftError::invalid_argument("storage tag must be a string"))?;
        StorageTag::parse(s)?;
    }

    Ok(())
}
