//! # Product Listing
//!
//! The product grid: a category-filtered view over the catalog, revealed a
//! page at a time.
//!
//! ```text
//!   12 products, filter = all, initial = 8, page = 4
//!
//!   new()        visible 8   remaining 4   has_more ✓
//!   load_more()  visible 12  remaining 0   has_more ✗
//!   set_filter(lamps)  →  visible 3 (reset to first page)
//! ```

use crate::types::{CategoryFilter, Product};

#[derive(Debug, Clone)]
pub struct ProductListing {
    products: Vec<Product>,
    filter: CategoryFilter,
    filtered: Vec<usize>,
    shown: usize,
    initial: usize,
    page: usize,
}

impl ProductListing {
    /// Creates a listing showing the first `initial` matches of `filter`.
    pub fn new(
        products: Vec<Product>,
        filter: CategoryFilter,
        initial: usize,
        page: usize,
    ) -> Self {
        let mut listing = ProductListing {
            products,
            filter,
            filtered: Vec::new(),
            shown: 0,
            initial,
            page,
        };
        listing.refilter();
        listing
    }

    /// Products currently revealed, in catalog order.
    pub fn visible(&self) -> Vec<&Product> {
        self.filtered
            .iter()
            .take(self.shown)
            .map(|&i| &self.products[i])
            .collect()
    }

    /// Reveals the next page. Returns how many products were added.
    pub fn load_more(&mut self) -> usize {
        let before = self.shown;
        self.shown = self.shown.saturating_add(self.page).min(self.filtered.len());
        self.shown - before
    }

    /// Switches filter and goes back to the first page.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.refilter();
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Products matching the filter, revealed or not.
    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    pub fn remaining(&self) -> usize {
        self.filtered.len() - self.shown
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    fn refilter(&mut self) {
        let filter = self.filter;
        self.filtered = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| filter.matches(p))
            .map(|(i, _)| i)
            .collect();
        self.shown = self.initial.min(self.filtered.len());
    }
}
