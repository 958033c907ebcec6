//! Contact action links
//!
//! Pure formatting of `tel:`, `mailto:` and WhatsApp deep links. Opening
//! them is left to whatever surface renders the link.

const COMPANY_GREETING: &str = "Hello Sun Star International,";

/// Keep digits and `+`, drop spaces, dashes and brackets
pub fn clean_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

pub fn tel_link(phone: &str) -> String {
    format!("tel:{}", clean_phone(phone))
}

pub fn mailto_link(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        clean_phone(phone),
        urlencoding::encode(message)
    )
}

/// Pre-filled quote request; an empty `product_type` asks about everything
pub fn quote_request_email(company_email: &str, product_type: &str, origin_host: &str) -> String {
    let product_type = match product_type.trim() {
        "" => "your products/services",
        other => other,
    };
    let subject = format!("Quote Request from {}", origin_host);
    let body = format!(
        "{COMPANY_GREETING}\n\n\
         I am interested in requesting a quote for {product_type}.\n\n\
         Please provide me with:\n\
         - Product specifications\n\
         - Pricing information\n\
         - Delivery timeframe\n\
         - Payment terms\n\n\
         Company Details:\n\
         - Company Name: [Please fill]\n\
         - Contact Person: [Please fill]\n\
         - Phone: [Please fill]\n\
         - Location: [Please fill]\n\n\
         Thank you for your time.\n\n\
         Best regards,\n\
         [Your Name]"
    );
    mailto_link(company_email, &subject, &body)
}

pub fn general_inquiry_email(company_email: &str, origin_host: &str) -> String {
    let subject = format!("General Inquiry from {}", origin_host);
    let body = format!(
        "{COMPANY_GREETING}\n\n\
         I would like to inquire about your services.\n\n\
         [Please describe your inquiry here]\n\n\
         Best regards,\n\
         [Your Name]\n\
         [Your Contact Information]"
    );
    mailto_link(company_email, &subject, &body)
}
