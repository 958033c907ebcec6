//! Shared types for the Sun Star storefront
//!
//! Wire models and the response envelope used between the backend and
//! `sunstar-client`.

pub mod models;
pub mod response;

// Re-exports
pub use response::{ApiResponse, ErrorBody};
pub use serde::{Deserialize, Serialize};
