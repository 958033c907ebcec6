//! Sunstar Client - storefront and admin client for the Sun Star backend
//!
//! Typed HTTP calls, resource-fetch hooks for public content, the admin
//! catalog manager and the image upload workflow.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod logger;
pub mod resource;
pub mod upload;

#[cfg(test)]
mod testing;

pub use api::{SaveResponse, SiteApi};
pub use catalog::{AutoConfirm, CatalogManager, Notice, OperatorPrompt, StdioPrompt};
pub use client::{FilePart, HttpClient, NetworkHttpClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use resource::{ResourceHook, ResourceState};
pub use upload::{ImageFile, ImageUploader, UploadStatus};

// Re-export shared types for convenience
pub use shared::ApiResponse;
pub use shared::models::{Category, Product, ProductDraft};
