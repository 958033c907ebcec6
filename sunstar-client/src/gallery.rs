//! Public gallery assembly
//!
//! Admin products labelled with their category name, topped up with showcase
//! samples while the catalog is still small.

use shared::models::{Category, Product, SampleProduct};

use crate::api::SiteApi;
use crate::client::HttpClient;

/// Below this many admin products the showcase samples are shown too
pub const SAMPLE_FILL_THRESHOLD: usize = 5;

pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Display name for a category id
pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNKNOWN_CATEGORY)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: Option<String>,
    pub category_id: String,
    pub category_name: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub is_featured: bool,
    /// `true` for showcase entries that are not in the admin catalog
    pub sample: bool,
}

impl GalleryItem {
    pub fn from_product(product: &Product, categories: &[Category]) -> Self {
        Self {
            id: Some(product.id.clone()),
            category_id: product.category_id.clone(),
            category_name: category_name(categories, &product.category_id).to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image_url: product.image_url.clone(),
            is_featured: product.is_featured,
            sample: false,
        }
    }

    pub fn from_sample(category: &Category, sample: &SampleProduct) -> Self {
        Self {
            id: None,
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            name: sample.name.clone(),
            description: sample.specs.clone(),
            price: sample.price.clone(),
            image_url: String::new(),
            is_featured: false,
            sample: true,
        }
    }
}

/// Admin products first, then samples if the catalog is still small
pub fn build_gallery(
    products: &[Product],
    categories: &[Category],
    samples: Vec<GalleryItem>,
) -> Vec<GalleryItem> {
    let mut items: Vec<GalleryItem> = products
        .iter()
        .map(|p| GalleryItem::from_product(p, categories))
        .collect();
    if products.len() < SAMPLE_FILL_THRESHOLD {
        items.extend(samples);
    }
    items
}

/// Items shown under a category tab; `None` is the "all" tab
pub fn filter_by_category<'a>(
    items: &'a [GalleryItem],
    category_id: Option<&str>,
) -> Vec<&'a GalleryItem> {
    match category_id {
        None => items.iter().collect(),
        Some(id) => items.iter().filter(|i| i.category_id == id).collect(),
    }
}

/// Fetch everything the gallery page needs
///
/// If the admin list cannot be loaded the gallery falls back to samples
/// only. Categories whose samples fail to load are skipped.
pub async fn load_gallery<C: HttpClient>(api: &SiteApi<C>) -> Vec<GalleryItem> {
    let categories = match api.product_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Failed to load categories: {}", e);
            Vec::new()
        }
    };

    let mut samples = Vec::new();
    for category in &categories {
        match api.sample_products(&category.id).await {
            Ok(list) => samples.extend(list.iter().map(|s| GalleryItem::from_sample(category, s))),
            Err(e) => tracing::debug!("No samples for category {}: {}", category.id, e),
        }
    }

    match api.list_products().await {
        Ok(products) => build_gallery(&products, &categories, samples),
        Err(e) => {
            tracing::error!("Failed to load products: {}", e);
            samples
        }
    }
}
