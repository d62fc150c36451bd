//! # Catalog Commands
//!
//! Read-only queries against the catalog.
//!
//! ## Product Grid Paging
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [All] [Lamps] [Keychains] [Novelty] [Other]     ◄── category filter   │
//! │                                                                         │
//! │  ┌────┐ ┌────┐ ┌────┐ ┌────┐                                           │
//! │  │ 1  │ │ 2  │ │ 3  │ │ 4  │    first page: initial_load_count (8)     │
//! │  └────┘ └────┘ └────┘ └────┘                                           │
//! │  ┌────┐ ┌────┐ ┌────┐ ┌────┐                                           │
//! │  │ 5  │ │ 6  │ │ 7  │ │ 8  │                                           │
//! │  └────┘ └────┘ └────┘ └────┘                                           │
//! │                                                                         │
//! │           [ Load More ]     ◄── each press: load_more_count (4)        │
//! │                                                                         │
//! │  browse_products("all", 1) → 12 visible, remaining 0, hasMore false    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crafts_core::{CategoryFilter, GalleryItem, Product, ProductId, ProductListing, Testimonial};
use crafts_store::CatalogSource;

use crate::error::{ApiError, ApiResult};
use crate::state::CatalogConfig;

/// One page of the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub category: CategoryFilter,
    pub products: Vec<Product>,
    /// Matches for the category, shown or not.
    pub total: usize,
    pub remaining: usize,
    pub has_more: bool,
}

impl From<&ProductListing> for ProductPage {
    fn from(listing: &ProductListing) -> Self {
        ProductPage {
            category: listing.filter(),
            products: listing.visible().into_iter().cloned().collect(),
            total: listing.total(),
            remaining: listing.remaining(),
            has_more: listing.has_more(),
        }
    }
}

/// Lists products in a category (`"all"` for everything).
///
/// ## Errors
/// `VALIDATION_ERROR` for an unknown category name.
pub async fn list_products(catalog: &dyn CatalogSource, category: &str) -> ApiResult<Vec<Product>> {
    debug!(category, "list_products command");

    let filter: CategoryFilter = category.parse()?;
    Ok(catalog.products(filter).await)
}

/// The product grid after `load_more` presses of "Load More".
pub async fn browse_products(
    catalog: &dyn CatalogSource,
    config: &CatalogConfig,
    category: &str,
    load_more: usize,
) -> ApiResult<ProductPage> {
    debug!(category, load_more, "browse_products command");

    let filter: CategoryFilter = category.parse()?;
    let mut listing = ProductListing::new(
        catalog.products(CategoryFilter::All).await,
        filter,
        config.initial_load_count,
        config.load_more_count,
    );

    for _ in 0..load_more {
        if listing.load_more() == 0 {
            break;
        }
    }

    Ok(ProductPage::from(&listing))
}

/// Gets a single product.
///
/// ## Errors
/// `NOT_FOUND` when no product has this id.
pub async fn get_product(catalog: &dyn CatalogSource, product_id: ProductId) -> ApiResult<Product> {
    debug!(product_id, "get_product command");

    catalog
        .product_by_id(product_id)
        .await
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

pub async fn get_featured_products(catalog: &dyn CatalogSource) -> Vec<Product> {
    debug!("get_featured_products command");
    catalog.featured_products().await
}

pub async fn get_gallery(catalog: &dyn CatalogSource) -> Vec<GalleryItem> {
    debug!("get_gallery command");
    catalog.gallery().await
}

pub async fn get_testimonials(catalog: &dyn CatalogSource) -> Vec<Testimonial> {
    debug!("get_testimonials command");
    catalog.testimonials().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crafts_store::InMemoryCatalog;

    fn ids(products: &[Product]) -> Vec<ProductId> {
        products.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let catalog = InMemoryCatalog::sample();

        let lamps = list_products(&catalog, "lamps").await.unwrap();
        assert_eq!(ids(&lamps), vec![1, 3, 7]);

        let all = list_products(&catalog, "all").await.unwrap();
        assert_eq!(all.len(), 12);
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let catalog = InMemoryCatalog::sample();
        let err = list_products(&catalog, "hats").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_browse_pages() {
        let catalog = InMemoryCatalog::sample();
        let config = CatalogConfig::default();

        let page = browse_products(&catalog, &config, "all", 0).await.unwrap();
        assert_eq!(page.products.len(), 8);
        assert_eq!(page.remaining, 4);
        assert!(page.has_more);

        let page = browse_products(&catalog, &config, "all", 1).await.unwrap();
        assert_eq!(page.products.len(), 12);
        assert!(!page.has_more);

        // Extra presses past the end are harmless.
        let page = browse_products(&catalog, &config, "all", 10).await.unwrap();
        assert_eq!(page.products.len(), 12);
    }

    #[tokio::test]
    async fn test_browse_filtered() {
        let catalog = InMemoryCatalog::sample();
        let config = CatalogConfig::default();

        let page = browse_products(&catalog, &config, "lamps", 0).await.unwrap();
        assert_eq!(ids(&page.products), vec![1, 3, 7]);
        assert_eq!(page.total, 3);
        assert_eq!(page.remaining, 0);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["category"], "lamps");
        assert_eq!(json["hasMore"], false);
    }

    #[tokio::test]
    async fn test_get_product() {
        let catalog = InMemoryCatalog::sample();

        assert_eq!(get_product(&catalog, 7).await.unwrap().id, 7);
        let err = get_product(&catalog, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_showcase_queries() {
        let catalog = InMemoryCatalog::sample();

        assert_eq!(ids(&get_featured_products(&catalog).await), vec![1, 5, 12]);
        assert_eq!(get_gallery(&catalog).await.len(), 8);
        assert!(!get_testimonials(&catalog).await.is_empty());
    }
}
