//! Product Model

use serde::{Deserialize, Deserializer, Serialize};

/// Admin-managed catalog product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned, immutable after creation
    pub id: String,
    /// Category reference (server id, never list position)
    pub category_id: String,
    pub name: String,
    pub description: String,
    /// Display string, e.g. "$75" or "Contact for Price"
    pub price: String,
    /// Empty string means no image
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Product {
    /// True when every writable field equals the draft
    pub fn matches_draft(&self, draft: &ProductDraft) -> bool {
        ProductDraft::from(self) == *draft
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Product as written, for when the server echoes nothing but an id
    pub fn from_draft(id: impl Into<String>, draft: &ProductDraft) -> Self {
        Self {
            id: id.into(),
            category_id: draft.category_id.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price.clone(),
            image_url: draft.image_url.clone(),
            is_featured: draft.is_featured,
            is_available: draft.is_available,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Create / update payload (the writable fields of a [`Product`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    pub is_featured: bool,
    pub is_available: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            category_id: String::new(),
            name: String::new(),
            description: String::new(),
            price: String::new(),
            image_url: String::new(),
            is_featured: false,
            is_available: true,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            category_id: product.category_id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image_url: product.image_url.clone(),
            is_featured: product.is_featured,
            is_available: product.is_available,
        }
    }
}

/// Showcase entry returned by the sample-products endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleProduct {
    pub name: String,
    pub specs: String,
    pub price: String,
}

fn default_true() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
