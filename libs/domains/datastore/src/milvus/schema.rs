//! Collection layout and index/search parameters for document collections.

use serde::Serialize;

pub const ID_FIELD: &str = "id";
pub const TITLE_FIELD: &str = "title";
pub const CONTENT_FIELD: &str = "content";
pub const CATEGORY_FIELD: &str = "category";
pub const EMBEDDING_FIELD: &str = "embedding";

/// Scalar fields returned by searches
pub const OUTPUT_FIELDS: [&str; 4] = [ID_FIELD, TITLE_FIELD, CONTENT_FIELD, CATEGORY_FIELD];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    pub auto_id: bool,
    pub enable_dynamic_field: bool,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub field_name: String,
    pub data_type: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_primary: bool,
    pub element_type_params: ElementTypeParams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ElementTypeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim: Option<usize>,
}

impl FieldSchema {
    fn varchar(name: &str, max_length: u32) -> Self {
        Self {
            field_name: name.to_string(),
            data_type: "VarChar",
            is_primary: false,
            element_type_params: ElementTypeParams {
                max_length: Some(max_length),
                dim: None,
            },
        }
    }

    fn float_vector(name: &str, dim: usize) -> Self {
        Self {
            field_name: name.to_string(),
            data_type: "FloatVector",
            is_primary: false,
            element_type_params: ElementTypeParams {
                max_length: None,
                dim: Some(dim),
            },
        }
    }

    fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

impl CollectionSchema {
    /// The document layout: caller-assigned string key, three text fields and
    /// the content embedding.
    pub fn documents(dimension: usize) -> Self {
        Self {
            auto_id: false,
            enable_dynamic_field: false,
            fields: vec![
                FieldSchema::varchar(ID_FIELD, 255).primary(),
                FieldSchema::varchar(TITLE_FIELD, 255),
                FieldSchema::varchar(CONTENT_FIELD, 3000),
                FieldSchema::varchar(CATEGORY_FIELD, 100),
                FieldSchema::float_vector(EMBEDDING_FIELD, dimension),
            ],
        }
    }

    pub fn dimension(&self) -> Option<usize> {
        self.fields
            .iter()
            .find_map(|f| f.element_type_params.dim)
    }
}

/// Vector index built on the embedding field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    pub field_name: String,
    pub index_name: String,
    pub metric_type: &'static str,
    pub params: IndexParams,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexParams {
    pub index_type: &'static str,
    pub nlist: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            field_name: EMBEDDING_FIELD.to_string(),
            index_name: EMBEDDING_FIELD.to_string(),
            metric_type: "COSINE",
            params: IndexParams {
                index_type: "IVF_FLAT",
                nlist: 1024,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub metric_type: &'static str,
    /// Inverted lists searched per query
    pub nprobe: u32,
    pub limit: u32,
    pub offset: u32,
    pub consistency_level: &'static str,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            metric_type: "COSINE",
            nprobe: 10,
            limit: 3,
            offset: 0,
            consistency_level: "Strong",
        }
    }
}
