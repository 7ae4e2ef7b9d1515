//! # Published Documents
//!
//! `PublishedData` is the persisted form of a funnel's block sequence.
//!
//! ## Decoding
//!
//! ```text
//! JSON value → version dispatch → per-block decode → order normalization
//!                    ↓                   ↓
//!          UnsupportedVersion     SkippedBlock (warn, keep going)
//! ```
//!
//! Strict serde decoding of `PublishedData` rejects a document with any
//! unrecognized block. Stored documents go through [`decode_document`]
//! instead, which skips such blocks so newer documents still render.

use crate::block::{renumber, Block};
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Schema version written by this crate
pub const DOCUMENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Versioned, serializable landing-page document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedData {
    pub version: String,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl PublishedData {
    /// Bootstrap document for a brand-new funnel
    pub fn empty() -> Self {
        Self::with_blocks(Vec::new())
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            blocks,
            theme: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sort blocks by `order` (ties keep array position) and renumber 0..N-1
    pub fn normalize_order(&mut self) {
        self.blocks.sort_by_key(Block::order);
        renumber(&mut self.blocks);
    }

    pub fn normalized(mut self) -> Self {
        self.normalize_order();
        self
    }
}

impl Default for PublishedData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Known document schema versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
}

impl SchemaVersion {
    /// Resolve the `version` field; a missing version is read as 1.0
    pub fn detect(value: Option<&Value>) -> Result<Self, DecodeError> {
        match value {
            None | Some(Value::Null) => Ok(SchemaVersion::V1),
            Some(Value::String(version)) => Self::parse(version),
            Some(_) => Err(DecodeError::InvalidVersion),
        }
    }

    pub fn parse(version: &str) -> Result<Self, DecodeError> {
        match version {
            "1" | "1.0" => Ok(SchemaVersion::V1),
            other => Err(DecodeError::UnsupportedVersion(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V1 => "1.0",
        }
    }
}

/// A block entry that could not be decoded and was left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBlock {
    pub index: usize,
    pub id: Option<String>,
    pub block_type: Option<String>,
    pub reason: String,
}

/// Result of lenient document decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub document: PublishedData,
    pub skipped: Vec<SkippedBlock>,
}

pub fn decode_document_str(source: &str) -> Result<Decoded, DecodeError> {
    let value: Value = serde_json::from_str(source)?;
    decode_document(value)
}

/// Decode a stored document, skipping blocks this schema does not know
pub fn decode_document(value: Value) -> Result<Decoded, DecodeError> {
    let Value::Object(mut fields) = value else {
        return Err(DecodeError::NotAnObject);
    };

    match SchemaVersion::detect(fields.get("version"))? {
        SchemaVersion::V1 => decode_v1(&mut fields),
    }
}

fn decode_v1(fields: &mut serde_json::Map<String, Value>) -> Result<Decoded, DecodeError> {
    let entries = match fields.remove("blocks") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(DecodeError::InvalidBlocks),
    };

    let mut blocks = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry.get("id").and_then(Value::as_str).map(str::to_string);
        let block_type = entry.get("type").and_then(Value::as_str).map(str::to_string);

        let reason = match serde_json::from_value::<Block>(entry) {
            Ok(block) if seen.insert(block.id().clone()) => {
                blocks.push(block);
                continue;
            }
            Ok(block) => format!("duplicate block id {}", block.id()),
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            index,
            id = ?id,
            block_type = ?block_type,
            %reason,
            "Skipping undecodable block"
        );
        skipped.push(SkippedBlock {
            index,
            id,
            block_type,
            reason,
        });
    }

    let theme = match fields.remove("theme") {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value::<Theme>(value) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed theme");
                None
            }
        },
    };

    let document = PublishedData {
        version: SchemaVersion::V1.as_str().to_string(),
        blocks,
        theme,
    }
    .normalized();

    Ok(Decoded { document, skipped })
}
