//! The retrievable document type and its flat property-record form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The flat record stored for a document: the text property plus every
/// metadata property, keyed by property name. Sorted keys make the JSON
/// serialization canonical, which [`content_id`] relies on.
pub type PropertyRecord = BTreeMap<String, Value>;

/// A unit of retrievable content: text plus a metadata mapping.
///
/// Loaders produce documents, the splitter divides them into smaller
/// documents carrying the same metadata, and stores persist them as flat
/// property records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The text content.
    pub text: String,
    /// Metadata properties (source URL, page number, title, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Document {
    /// Create a document with empty metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), metadata: BTreeMap::new() }
    }

    /// Attach a metadata property.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Flatten into a property record, with the text stored under
    /// `text_property` alongside the metadata properties.
    pub fn to_record(&self, text_property: &str) -> PropertyRecord {
        let mut record = self.metadata.clone();
        record.insert(text_property.to_string(), Value::String(self.text.clone()));
        record
    }

    /// Reconstitute a document from a stored record, separating the text
    /// property back out of the metadata mapping.
    pub fn from_record(text_property: &str, mut record: PropertyRecord) -> Self {
        let text = match record.remove(text_property) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Self { text, metadata: record }
    }
}

/// Derive the deterministic storage identifier for a property record.
///
/// UUIDv5 over the canonical JSON serialization: re-inserting a document
/// with identical properties yields the same identifier, so duplicate
/// ingestion overwrites rather than duplicates. Any property that differs
/// produces a distinct identifier.
pub fn content_id(record: &PropertyRecord) -> String {
    let canonical = serde_json::to_string(record).unwrap_or_default();
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, canonical.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_records_get_identical_ids() {
        let doc = Document::new("Paris is the capital of France.")
            .with_metadata("source", "https://example.com");
        let a = content_id(&doc.to_record("text"));
        let b = content_id(&doc.clone().to_record("text"));
        assert_eq!(a, b);
    }

    #[test]
    fn any_differing_property_changes_the_id() {
        let base = Document::new("same text").with_metadata("source", "https://example.com");
        let other_meta = Document::new("same text").with_metadata("source", "https://other.org");
        let other_text = Document::new("other text").with_metadata("source", "https://example.com");

        let id = content_id(&base.to_record("text"));
        assert_ne!(id, content_id(&other_meta.to_record("text")));
        assert_ne!(id, content_id(&other_text.to_record("text")));
    }

    #[test]
    fn record_roundtrip_separates_text_from_metadata() {
        let doc = Document::new("body text")
            .with_metadata("source", "file.pdf")
            .with_metadata("page", 4);
        let record = doc.to_record("text");
        assert_eq!(record.get("text"), Some(&json!("body text")));

        let back = Document::from_record("text", record);
        assert_eq!(back.text, "body text");
        assert_eq!(back.metadata.get("page"), Some(&json!(4)));
        assert!(!back.metadata.contains_key("text"));
    }
}
