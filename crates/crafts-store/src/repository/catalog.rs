//! # Catalog Provider
//!
//! Read-only access to products, gallery items and testimonials.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CatalogSource                                    │
//! │                                                                         │
//! │  products(filter)     featured_products()     product_by_id(id)        │
//! │  gallery()            testimonials()                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemoryCatalog                                                       │
//! │  ├── CatalogData from sample.rs or a JSON file                         │
//! │  ├── validated once at construction                                    │
//! │  └── optional per-call latency (tokio::time::sleep)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups never fail: an unknown id is `None`, an empty category is an
//! empty list.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crafts_core::validation::validate_catalog;
use crafts_core::{CategoryFilter, GalleryItem, Product, ProductId, Testimonial};

use crate::error::StoreResult;
use crate::sample::sample_catalog;

// =============================================================================
// Source Trait
// =============================================================================

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Products passing `filter`, in catalog order.
    async fn products(&self, filter: CategoryFilter) -> Vec<Product>;

    async fn product_by_id(&self, id: ProductId) -> Option<Product>;

    async fn featured_products(&self) -> Vec<Product>;

    async fn gallery(&self) -> Vec<GalleryItem>;

    async fn testimonials(&self) -> Vec<Testimonial>;
}

// =============================================================================
// Catalog Data
// =============================================================================

/// Everything a catalog holds. Also the layout of a catalog JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogData {
    pub products: Vec<Product>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

impl CatalogData {
    /// Reads and validates a catalog file.
    pub fn from_json_file(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let data: CatalogData = serde_json::from_str(&raw)?;
        data.validate()?;

        info!(
            path = %path.display(),
            products = data.products.len(),
            "Loaded catalog file"
        );
        Ok(data)
    }

    pub fn validate(&self) -> StoreResult<()> {
        validate_catalog(&self.products, &self.gallery, &self.testimonials)?;
        Ok(())
    }
}

// =============================================================================
// Latency
// =============================================================================

/// Artificial delay per call, for exercising loading states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLatency {
    /// Product lists and featured products.
    pub list: Duration,
    /// Single-product lookups, gallery and testimonials.
    pub lookup: Duration,
}

impl CatalogLatency {
    pub const fn none() -> Self {
        CatalogLatency {
            list: Duration::ZERO,
            lookup: Duration::ZERO,
        }
    }

    pub const fn simulated() -> Self {
        CatalogLatency {
            list: Duration::from_millis(300),
            lookup: Duration::from_millis(200),
        }
    }
}

impl Default for CatalogLatency {
    fn default() -> Self {
        CatalogLatency::none()
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    data: CatalogData,
    latency: CatalogLatency,
}

impl InMemoryCatalog {
    /// Builds a catalog, rejecting invalid data.
    pub fn new(data: CatalogData) -> StoreResult<Self> {
        data.validate()?;
        Ok(InMemoryCatalog {
            data,
            latency: CatalogLatency::none(),
        })
    }

    /// The built-in sample catalog.
    pub fn sample() -> Self {
        InMemoryCatalog {
            data: sample_catalog(),
            latency: CatalogLatency::none(),
        }
    }

    pub fn from_json_file(path: &Path) -> StoreResult<Self> {
        InMemoryCatalog::new(CatalogData::from_json_file(path)?)
    }

    pub fn with_latency(mut self, latency: CatalogLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn products(&self, filter: CategoryFilter) -> Vec<Product> {
        pause(self.latency.list).await;
        debug!(filter = %filter, "Listing products");

        self.data
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    async fn product_by_id(&self, id: ProductId) -> Option<Product> {
        pause(self.latency.lookup).await;
        self.data.products.iter().find(|p| p.id == id).cloned()
    }

    async fn featured_products(&self) -> Vec<Product> {
        pause(self.latency.list).await;
        self.data
            .products
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect()
    }

    async fn gallery(&self) -> Vec<GalleryItem> {
        pause(self.latency.lookup).await;
        self.data.gallery.clone()
    }

    async fn testimonials(&self) -> Vec<Testimonial> {
        pause(self.latency.lookup).await;
        self.data.testimonials.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crafts_core::Category;
    use std::io::Write;

    fn ids(products: &[Product]) -> Vec<ProductId> {
        products.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_filter_lamps() {
        let catalog = InMemoryCatalog::sample();
        let lamps = catalog.products(CategoryFilter::Only(Category::Lamps)).await;
        assert_eq!(ids(&lamps), vec![1, 3, 7]);

        let all = catalog.products(CategoryFilter::All).await;
        assert_eq!(all.len(), 12);
    }

    #[tokio::test]
    async fn test_lookups() {
        let catalog = InMemoryCatalog::sample();

        let product = catalog.product_by_id(5).await.unwrap();
        assert_eq!(product.title, "Dodgers Coaster Set");
        assert!(catalog.product_by_id(99).await.is_none());

        assert_eq!(ids(&catalog.featured_products().await), vec![1, 5, 12]);
        assert_eq!(catalog.gallery().await.len(), 8);
        assert_eq!(catalog.testimonials().await[0].author, "Michael Rodriguez");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let catalog = InMemoryCatalog::sample().with_latency(CatalogLatency::simulated());

        let start = tokio::time::Instant::now();
        catalog.products(CategoryFilter::All).await;
        assert!(start.elapsed() >= Duration::from_millis(300));

        let start = tokio::time::Instant::now();
        catalog.product_by_id(1).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_millis(300));
    }

    #[test]
    fn test_rejects_invalid_data() {
        let mut data = sample_catalog();
        data.products[1].id = data.products[0].id;

        assert!(matches!(
            InMemoryCatalog::new(data),
            Err(StoreError::Catalog(_))
        ));
    }

    #[test]
    fn test_loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut data = sample_catalog();
        data.products.truncate(2);
        data.gallery.clear();
        write!(file, "{}", serde_json::to_string(&data).unwrap()).unwrap();

        let catalog = InMemoryCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.data(), &data);
    }

    #[test]
    fn test_bad_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"products\": 7}}").unwrap();

        assert!(matches!(
            CatalogData::from_json_file(file.path()),
            Err(StoreError::Serialization(_))
        ));
        assert!(matches!(
            CatalogData::from_json_file(Path::new("/definitely/not/here.json")),
            Err(StoreError::Io(_))
        ));
    }
}
