//! Product form state and submit gating

use shared::models::{Category, Product, ProductDraft};

use crate::{ClientError, ClientResult};

/// Which draft fields must be filled before submit
///
/// `image_required` changed between releases of the storefront, so it is a
/// toggle rather than a fixed rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub image_required: bool,
}

impl ValidationPolicy {
    pub fn new(image_required: bool) -> Self {
        Self { image_required }
    }

    /// Names of required fields that are empty (whitespace counts as empty)
    pub fn missing_fields(&self, draft: &ProductDraft) -> Vec<&'static str> {
        let mut required: Vec<(&'static str, &str)> = vec![
            ("name", draft.name.as_str()),
            ("description", draft.description.as_str()),
            ("price", draft.price.as_str()),
            ("category_id", draft.category_id.as_str()),
        ];
        if self.image_required {
            required.push(("image_url", draft.image_url.as_str()));
        }
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_complete(&self, draft: &ProductDraft) -> bool {
        self.missing_fields(draft).is_empty()
    }

    pub fn check(&self, draft: &ProductDraft) -> ClientResult<()> {
        let missing = self.missing_fields(draft);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Add/edit form: the draft plus what it is editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub open: bool,
    pub draft: ProductDraft,
    /// `Some` when editing an existing product
    pub editing: Option<Product>,
}

impl FormState {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn create() -> Self {
        Self {
            open: true,
            draft: ProductDraft::default(),
            editing: None,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            open: true,
            draft: ProductDraft::from(product),
            editing: Some(product.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|p| p.id.as_str())
    }

    /// Category identity is the server id
    pub fn select_category(&mut self, category: &Category) {
        self.draft.category_id = category.id.clone();
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Product"
        } else {
            "Add New Product"
        }
    }
}
