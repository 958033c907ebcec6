//! Category Model

use serde::{Deserialize, Serialize};

/// Product category (read-only on the client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Headline product names shown on the category card
    #[serde(default)]
    pub products: Vec<String>,
}
