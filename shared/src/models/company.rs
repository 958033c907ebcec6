//! Company Info Model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Company profile (singleton)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub license_no: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub address: HashMap<String, String>,
    /// Keys such as `phoneUAE`, `email`, `whatsapp`
    #[serde(default)]
    pub contact: HashMap<String, String>,
    #[serde(default)]
    pub license: HashMap<String, String>,
}

impl CompanyInfo {
    pub fn contact_value(&self, key: &str) -> Option<&str> {
        self.contact
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Aggregate counters from the stats endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    pub total_inquiries: u64,
    pub new_inquiries: u64,
    pub total_testimonials: u64,
    pub product_categories: u64,
}
