//! Client module - transport to the storefront backend.

pub mod http;

// Re-export main types
pub use http::{FilePart, HttpClient, NetworkHttpClient};
