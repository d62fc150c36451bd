//! # Domain Types
//!
//! Catalog types shared by every layer of the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  GalleryItem    │   │  Testimonial    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32 > 0)   │   │  id             │   │  id             │       │
//! │  │  title          │   │  image          │   │  text, author   │       │
//! │  │  category       │   │  caption, alt   │   │  location       │       │
//! │  │  price (Money)  │   └─────────────────┘   │  rating (1-5)   │       │
//! │  │  featured       │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   Category      │   │ CategoryFilter  │                             │
//! │  │  lamps          │   │  all            │                             │
//! │  │  keychains      │   │  only(category) │                             │
//! │  │  novelty        │   └─────────────────┘                             │
//! │  │  other          │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are immutable once the catalog defines them; the cart keeps
//! its own snapshot copy of a product.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Product identifier. Unique and strictly positive within a catalog.
pub type ProductId = u32;

// =============================================================================
// Category
// =============================================================================

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lamps,
    Keychains,
    Novelty,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Lamps,
        Category::Keychains,
        Category::Novelty,
        Category::Other,
    ];

    /// The lowercase wire name (`"lamps"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Lamps => "lamps",
            Category::Keychains => "keychains",
            Category::Novelty => "novelty",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// A view-level restriction of the product list.
///
/// Serialized as a plain string: `"all"` or a category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only products of one category.
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }

        s.parse::<Category>()
            .map(CategoryFilter::Only)
            .map_err(|_| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: std::iter::once("all")
                    .chain(Category::ALL.iter().map(|c| c.as_str()))
                    .map(str::to_string)
                    .collect(),
            })
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique positive identifier.
    pub id: ProductId,

    /// Display title.
    pub title: String,

    pub category: Category,

    /// Unit price in cents.
    pub price: Money,

    pub description: String,

    /// Image reference (relative URL).
    pub image: String,

    /// Flagged for promotional display.
    pub featured: bool,
}

// =============================================================================
// Gallery Item
// =============================================================================

/// A workshop photo shown in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GalleryItem {
    pub id: u32,
    pub image: String,
    pub caption: String,
    /// Alternative text for screen readers.
    pub alt: String,
}

// =============================================================================
// Testimonial
// =============================================================================

/// A customer quote shown in the testimonial carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Testimonial {
    pub id: u32,
    pub text: String,
    pub author: String,
    pub location: String,
    /// Star rating, 1 to [`crate::MAX_RATING`].
    pub rating: u8,
}

// =============================================================================
// Unit Tests
// =============================================================================
