//! # Sample Catalog
//!
//! The shop's built-in catalog: 12 products, 8 workshop photos and 5
//! testimonials. Used when no catalog file is configured.
//!
//! ## Products
//! ```text
//!   lamps      1, 3, 7        keychains  2, 4, 8, 10
//!   novelty    5, 6, 9        other      11, 12
//!   featured   1, 5, 12
//! ```

use crafts_core::{Category, GalleryItem, Money, Product, Testimonial};

use crate::repository::catalog::CatalogData;

const PRODUCT_IMAGES: &str = "./assets/images/products";
const GALLERY_IMAGES: &str = "./assets/images/gallery";

/// (id, title, category, whole dollars, description, image stem, featured)
type ProductRow = (u32, &'static str, Category, i64, &'static str, &'static str, bool);

const PRODUCTS: &[ProductRow] = &[
    (
        1,
        "Classic Dodgers Table Lamp",
        Category::Lamps,
        65,
        "Handcrafted table lamp featuring authentic Dodgers design elements. Perfect for the home or office.",
        "lamp-01",
        true,
    ),
    (
        2,
        "Stadium Miniature Keychain",
        Category::Keychains,
        12,
        "Detailed miniature stadium keychain made from premium materials. A perfect gift for any fan.",
        "keychain-01",
        false,
    ),
    (
        3,
        "Vintage Baseball Desk Lamp",
        Category::Lamps,
        48,
        "Unique desk lamp with vintage baseball design. Adds character to any workspace.",
        "lamp-02",
        false,
    ),
    (
        4,
        "Team Cap Keychain",
        Category::Keychains,
        8,
        "Miniature team cap keychain, meticulously crafted with attention to detail.",
        "keychain-02",
        false,
    ),
    (
        5,
        "Dodgers Coaster Set",
        Category::Novelty,
        24,
        "Set of 4 handcrafted coasters featuring team colors and logo. Protects surfaces in style.",
        "novelty-01",
        true,
    ),
    (
        6,
        "Baseball Bat Bottle Opener",
        Category::Novelty,
        18,
        "Functional bottle opener shaped like a miniature baseball bat. Great conversation starter.",
        "novelty-02",
        false,
    ),
    (
        7,
        "Night Light with Team Logo",
        Category::Lamps,
        32,
        "Soft LED night light featuring team logo. Perfect for bedrooms or hallways.",
        "lamp-03",
        false,
    ),
    (
        8,
        "Pennant Keychain",
        Category::Keychains,
        10,
        "Classic pennant design miniaturized into a quality keychain accessory.",
        "keychain-03",
        false,
    ),
    (
        9,
        "Vintage Stadium Clock",
        Category::Novelty,
        48,
        "Wall clock featuring vintage stadium imagery. Functional art for true fans.",
        "novelty-03",
        false,
    ),
    (
        10,
        "Baseball Bat Keychain",
        Category::Keychains,
        15,
        "Detailed miniature baseball bat keychain with authentic wood finish.",
        "keychain-04",
        false,
    ),
    (
        11,
        "Custom Card Holder",
        Category::Other,
        42,
        "Handcrafted card holder with team design. Keeps cards organized in style.",
        "other-01",
        false,
    ),
    (
        12,
        "Stadium Blueprint Art",
        Category::Other,
        55,
        "Framed blueprint-style art of the stadium. Unique wall decor for fans.",
        "other-02",
        true,
    ),
];

/// (caption, alt)
const GALLERY: &[(&str, &str)] = &[
    (
        "Custom Dodgers lamp in progress",
        "Handcrafted Dodgers lamp being assembled in workshop",
    ),
    (
        "Keychain collection",
        "Various handcrafted Dodgers keychains on display",
    ),
    ("Workshop detail", "Close-up of crafting tools and materials"),
    ("Finished lamp display", "Completed Dodgers lamp on display"),
    (
        "Novelty items collection",
        "Assortment of novelty Dodgers items",
    ),
    (
        "Custom order in progress",
        "Custom Dodgers merchandise being crafted",
    ),
    (
        "Paint and finish details",
        "Detailed painting work on merchandise",
    ),
    (
        "Final product showcase",
        "Showcase of finished handcrafted products",
    ),
];

/// (text, author, location)
const TESTIMONIALS: &[(&str, &str, &str)] = &[
    (
        "Absolutely love the custom lamp I ordered! The craftsmanship is exceptional and it looks amazing in my office. Danny was professional and delivered exactly what I wanted.",
        "Michael Rodriguez",
        "Los Angeles, CA",
    ),
    (
        "The keychain I bought as a gift was a huge hit! Great quality and attention to detail. Will definitely be ordering more for other friends and family.",
        "Sarah Chen",
        "Pasadena, CA",
    ),
    (
        "Supporting a veteran-owned business while getting amazing handcrafted items is a win-win. The coaster set is beautiful and functional. Highly recommend!",
        "James Thompson",
        "Santa Monica, CA",
    ),
    (
        "As a lifelong Dodgers fan, I appreciate the care that goes into each piece. Danny's work captures the spirit of the team perfectly. The lamp I ordered is a conversation starter!",
        "Maria Gonzales",
        "Long Beach, CA",
    ),
    (
        "Exceptional quality and reasonable prices. The custom order process was smooth and Danny kept me updated throughout. Could not be happier with my purchase!",
        "David Park",
        "Glendale, CA",
    ),
];

pub fn sample_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(
            |&(id, title, category, dollars, description, image, featured)| Product {
                id,
                title: title.to_string(),
                category,
                price: Money::from_major_minor(dollars, 0),
                description: description.to_string(),
                image: format!("{}/{}.jpg", PRODUCT_IMAGES, image),
                featured,
            },
        )
        .collect()
}

pub fn sample_gallery() -> Vec<GalleryItem> {
    GALLERY
        .iter()
        .zip(1u32..)
        .map(|(&(caption, alt), id)| GalleryItem {
            id,
            image: format!("{}/item-{:02}.jpg", GALLERY_IMAGES, id),
            caption: caption.to_string(),
            alt: alt.to_string(),
        })
        .collect()
}

pub fn sample_testimonials() -> Vec<Testimonial> {
    TESTIMONIALS
        .iter()
        .zip(1u32..)
        .map(|(&(text, author, location), id)| Testimonial {
            id,
            text: text.to_string(),
            author: author.to_string(),
            location: location.to_string(),
            rating: crafts_core::MAX_RATING,
        })
        .collect()
}

/// The full sample catalog.
pub fn sample_catalog() -> CatalogData {
    CatalogData {
        products: sample_products(),
        gallery: sample_gallery(),
        testimonials: sample_testimonials(),
    }
}
