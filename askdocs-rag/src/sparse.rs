//! Sparse keyword encoding for the lexical side of hybrid search.
//!
//! Terms are hashed into a fixed u32 dimension space, namespaced by the
//! property they occur in, so a query can target and weight specific
//! properties. Term-frequency weighting happens here; IDF weighting is
//! applied server-side by the store's sparse index.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::document::PropertyRecord;
use crate::schema::CollectionSchema;
use crate::store::PropertyWeight;

/// A sparse vector in index/value form, indices strictly ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseEncoding {
    /// Term dimensions.
    pub indices: Vec<u32>,
    /// Per-dimension weights.
    pub values: Vec<f32>,
}

impl SparseEncoding {
    /// Whether the encoding carries no terms.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Encode a stored record: every declared text property contributes its
/// terms under that property's namespace, weighted by term frequency.
pub fn encode_record(record: &PropertyRecord, schema: &CollectionSchema) -> SparseEncoding {
    let mut weights: BTreeMap<u32, f32> = BTreeMap::new();
    for property in schema.text_properties() {
        if let Some(Value::String(text)) = record.get(&property.name) {
            for term in tokenize(text) {
                *weights.entry(dimension(&property.name, &term)).or_insert(0.0) += 1.0;
            }
        }
    }
    collect(weights)
}

/// Encode a query against the given target properties: each term is
/// expanded into every target's namespace with that target's weight.
pub fn encode_query(query: &str, targets: &[PropertyWeight]) -> SparseEncoding {
    let mut weights: BTreeMap<u32, f32> = BTreeMap::new();
    for term in tokenize(query) {
        for target in targets {
            *weights.entry(dimension(&target.property, &term)).or_insert(0.0) += target.weight;
        }
    }
    collect(weights)
}

fn collect(weights: BTreeMap<u32, f32>) -> SparseEncoding {
    let (indices, values) = weights.into_iter().unzip();
    SparseEncoding { indices, values }
}

/// Lowercased alphanumeric terms of at least two characters.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2)
        .map(|t| t.to_lowercase())
}

/// Hash a property-namespaced term into the sparse dimension space.
fn dimension(property: &str, term: &str) -> u32 {
    // FNV-1a; must be stable across processes since dimensions live in
    // the store's index.
    let mut hash: u32 = 0x811c_9dc5;
    for byte in property.bytes().chain([0u8]).chain(term.bytes()) {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
