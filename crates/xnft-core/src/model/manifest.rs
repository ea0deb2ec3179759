//! Off-chain metadata document.
//!
//! Documents are kept as raw JSON so unknown keys survive a merge; this type
//! is a typed read-only view over the well-known fields.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::{XnftError, XnftResult};
use crate::version::validate_document;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ManifestDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub properties: Option<ManifestProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ManifestProperties {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub entrypoints: Option<Value>,
    #[serde(default)]
    pub screenshots: Option<Value>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub manifest: Option<Value>,
}

impl ManifestDocument {
    /// Validate and view a fetched document.
    pub fn from_value(doc: &Value) -> XnftResult<Self> {
        validate_document(doc)?;
        Self::deserialize(doc).map_err(|e| XnftError::decode(format!("metadata document: {e}")))
    }
}

/// Shallow merge: top-level keys of `overlay` replace those of `base`.
pub fn shallow_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut b), Value::Object(o)) => {
            for (k, v) in o {
                b.insert(k, v);
            }
            Value::Object(b)
        }
        (Value::Object(b), _) => Value::Object(b),
        (_, Value::Object(o)) => Value::Object(o),
        _ => Value::Object(Map::new()),
    }
}
