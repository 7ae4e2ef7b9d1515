//! # Funnel Entity
//!
//! A funnel is one landing page. It is owned by the surrounding CRUD
//! system; the editor only reads it and replaces its `publishedData`.

use crate::document::{decode_document, Decoded};
use crate::error::DecodeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funnel {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_published: bool,

    /// Stored document, kept as raw JSON so blocks from newer schemas survive
    #[serde(default)]
    pub published_data: Option<Value>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Funnel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            slug: normalize_slug(slug),
            is_published: false,
            published_data: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Decode the stored document, if there is one
    pub fn document(&self) -> Option<Result<Decoded, DecodeError>> {
        self.published_data
            .as_ref()
            .filter(|value| !value.is_null())
            .map(|value| decode_document(value.clone()))
    }
}

/// Strip surrounding slashes and whitespace so `/lp/spring/` and `lp/spring` match
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("/lp/new-year-2026"), "lp/new-year-2026");
        assert_eq!(normalize_slug(" spring/ "), "spring");
        assert_eq!(normalize_slug("plain"), "plain");
    }

    #[test]
    fn test_wire_names() {
        let funnel = Funnel::new("f1", "Spring", "/lp/spring");
        let value = serde_json::to_value(&funnel).unwrap();

        assert_eq!(value["slug"], "lp/spring");
        assert_eq!(value["isPublished"], false);
        assert!(value.get("publishedData").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_parse_without_timestamps() {
        let funnel: Funnel = serde_json::from_value(json!({
            "id": "f1",
            "name": "Spring",
            "slug": "spring",
            "isPublished": true,
            "publishedData": null
        }))
        .unwrap();

        assert!(funnel.is_published);
        assert!(funnel.document().is_none());
    }

    #[test]
    fn test_document_decodes_stored_value() {
        let mut funnel = Funnel::new("f1", "Spring", "spring");
        funnel.published_data = Some(json!({
            "version": "1.0",
            "blocks": [{ "id": "c", "type": "code", "order": 0 }]
        }));

        let decoded = funnel.document().unwrap().unwrap();
        assert_eq!(decoded.document.blocks.len(), 1);
    }
}
