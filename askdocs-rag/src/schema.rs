//! Collection schemas: the declared, typed property sets of the two
//! document collections.

/// The type of a declared collection property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Free text, indexed for keyword search.
    Text,
    /// Integer payload (page numbers).
    Int,
}

/// A single declared property of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name, used as the payload field name.
    pub name: String,
    /// Declared type.
    pub data_type: DataType,
}

impl Property {
    /// A text property.
    pub fn text(name: impl Into<String>) -> Self {
        Self { name: name.into(), data_type: DataType::Text }
    }

    /// An integer property.
    pub fn int(name: impl Into<String>) -> Self {
        Self { name: name.into(), data_type: DataType::Int }
    }
}

/// The declared shape of a named collection: which property holds the
/// text, and which typed metadata properties accompany it.
///
/// Collections are created lazily with this schema and never migrated in
/// place; changing a schema requires deleting and recreating the
/// collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    /// The collection name in the store.
    pub collection: String,
    /// The property holding the document text.
    pub text_property: String,
    /// All declared properties, the text property included.
    pub properties: Vec<Property>,
}

impl CollectionSchema {
    /// The schema for web page documents.
    pub fn web_documents() -> Self {
        Self {
            collection: "WebDocs".to_string(),
            text_property: "text".to_string(),
            properties: vec![
                Property::text("text"),
                Property::text("source"),
                Property::text("title"),
                Property::text("description"),
            ],
        }
    }

    /// The schema for local PDF documents.
    pub fn pdf_documents() -> Self {
        Self {
            collection: "PDFDocs".to_string(),
            text_property: "text".to_string(),
            properties: vec![
                Property::text("text"),
                Property::text("source"),
                Property::int("page"),
            ],
        }
    }

    /// The declared text properties, in order.
    pub fn text_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.data_type == DataType::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_declare_their_text_property() {
        for schema in [CollectionSchema::web_documents(), CollectionSchema::pdf_documents()] {
            assert!(schema.properties.iter().any(|p| p.name == schema.text_property));
        }
    }

    #[test]
    fn pdf_schema_has_integer_page() {
        let schema = CollectionSchema::pdf_documents();
        let page = schema.properties.iter().find(|p| p.name == "page").unwrap();
        assert_eq!(page.data_type, DataType::Int);
    }
}
