use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// A document stored in a collection.
///
/// The `content` field is the text that gets embedded; the other fields are
/// carried alongside the vector and returned by searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    /// Caller-assigned primary key
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Getting started")]
    pub title: String,
    /// Text body used to compute the embedding
    #[schema(example = "hello world")]
    pub content: String,
    #[schema(example = "guides")]
    pub category: String,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document(\nID: {},\nTitle: {},\nContent: {},\nCategory: {})",
            self.id, self.title, self.content, self.category
        )
    }
}

/// Request body naming a single collection (create, delete)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionCommand {
    #[schema(example = "docs")]
    pub collection_name: String,
}

/// Request body for inserting or replacing documents
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertDocumentsCommand {
    #[schema(example = "docs")]
    pub collection_name: String,
    pub documents: Vec<Document>,
}

/// Request body for a similarity search
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchCommand {
    #[schema(example = "docs")]
    pub collection_name: String,
    #[schema(example = "hello")]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_display() {
        let doc = Document::new("1", "T", "hello world", "c");
        assert_eq!(
            doc.to_string(),
            "Document(\nID: 1,\nTitle: T,\nContent: hello world,\nCategory: c)"
        );
    }

    #[test]
    fn test_document_json_field_names() {
        let doc: Document = serde_json::from_value(json!({
            "id": "1",
            "title": "T",
            "content": "hello world",
            "category": "c"
        }))
        .unwrap();

        assert_eq!(doc, Document::new("1", "T", "hello world", "c"));
    }

    #[test]
    fn test_upsert_command_requires_documents() {
        let result =
            serde_json::from_value::<UpsertDocumentsCommand>(json!({"collection_name": "docs"}));
        assert!(result.is_err());
    }
}
