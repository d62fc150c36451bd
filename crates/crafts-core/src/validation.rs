//! # Validation Module
//!
//! Checks applied to catalog data before it is served.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog source construction (sample data or JSON file)                │
//! │  └── validate_catalog: every product, gallery item, testimonial        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Command arguments                                                      │
//! │  ├── CategoryFilter parsing (types.rs), product id lookups             │
//! │  └── validate_contact: required fields, email shape                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Persisted cart restore                                                 │
//! │  └── Cart::from_lines repairs quantities and duplicates                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crafts_core::validation::validate_title;
//!
//! assert!(validate_title("Classic Table Lamp").is_ok());
//! assert!(validate_title("   ").is_err());
//! ```

use std::collections::HashSet;

use crate::contact::ContactRequest;
use crate::error::ValidationError;
use crate::types::{GalleryItem, Product, Testimonial};
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product title.
pub const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_TITLE_LEN`] characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a testimonial star rating (1 to [`MAX_RATING`]).
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: i64::from(MAX_RATING),
        });
    }
    Ok(())
}

/// Loose email shape check: one `@`, a non-empty local part and a dotted
/// domain with no empty labels. No whitespace anywhere.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        expected: "email address".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let labels: Vec<&str> = domain.split('.').collect();
    if local.is_empty() || labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    if domain.contains('@') {
        return Err(invalid());
    }

    Ok(())
}

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a contact form submission.
///
/// ## Rules
/// - name, email and message must not be blank (subject is optional)
/// - email must look like an address
pub fn validate_contact(request: &ContactRequest) -> ValidationResult<()> {
    required("name", &request.name)?;
    required("email", &request.email)?;
    validate_email(&request.email)?;
    required("message", &request.message)
}

pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    validate_title(&product.title)?;

    if product.price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

pub fn validate_gallery_item(item: &GalleryItem) -> ValidationResult<()> {
    if item.image.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "gallery image".to_string(),
        });
    }
    Ok(())
}

pub fn validate_testimonial(testimonial: &Testimonial) -> ValidationResult<()> {
    if testimonial.text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "testimonial text".to_string(),
        });
    }
    validate_rating(testimonial.rating)
}

/// Validates a whole catalog: every record plus product id uniqueness.
///
/// ```rust
/// use crafts_core::validation::validate_catalog;
///
/// assert!(validate_catalog(&[], &[], &[]).is_ok());
/// ```
pub fn validate_catalog(
    products: &[Product],
    gallery: &[GalleryItem],
    testimonials: &[Testimonial],
) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        validate_product(product)?;

        if !seen.insert(product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.to_string(),
            });
        }
    }

    gallery.iter().try_for_each(validate_gallery_item)?;
    testimonials.iter().try_for_each(validate_testimonial)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
