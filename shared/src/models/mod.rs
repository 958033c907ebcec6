//! Data models
//!
//! Wire types exchanged with the storefront backend.

pub mod category;
pub mod company;
pub mod inquiry;
pub mod product;
pub mod testimonial;
pub mod upload;

// Re-exports
pub use category::*;
pub use company::*;
pub use inquiry::*;
pub use product::*;
pub use testimonial::*;
pub use upload::*;
