//! Contact Inquiry and Rating Models
//!
//! Both payloads are validated with `validator` before they leave the client.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactInquiry {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[validate(length(min = 1, message = "Inquiry type is required"))]
    pub inquiry_type: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Acknowledgement payload of an accepted inquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryReceipt {
    pub inquiry_id: String,
}

/// Customer experience rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RatingSubmission {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default)]
    pub company: String,
    pub service_category: String,
    #[validate(length(min = 1, message = "Please describe your experience"))]
    pub experience: String,
    pub would_recommend: bool,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
}

impl Default for RatingSubmission {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            company: String::new(),
            service_category: "general".to_string(),
            experience: String::new(),
            would_recommend: true,
            rating: 5,
        }
    }
}
