//! Testimonial and Advantage Models

use serde::{Deserialize, Serialize};

/// Customer testimonial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub company: String,
    pub text: String,
    /// 1..=5
    pub rating: u8,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// "Why choose us" entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advantage {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Icon name understood by the presentation layer
    pub icon: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
