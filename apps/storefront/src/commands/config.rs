//! # Config Commands
//!
//! Site information for headers, footers and the contact section.

use serde::Serialize;
use tracing::debug;

use crafts_core::Category;

use crate::state::{CurrencyConfig, SiteConfig, StorefrontConfig};

/// What the views need to render site chrome and the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub site: SiteConfig,
    pub currency: CurrencyConfig,
    pub initial_load_count: usize,
    pub load_more_count: usize,
    /// Filter buttons, `"all"` first.
    pub categories: Vec<&'static str>,
}

/// Gets the site information.
///
/// ## When Used
/// - Page load (site name, tagline, contact details)
/// - Product grid setup (filters, page sizes)
/// - Price formatting on the view side
pub fn get_site_info(config: &StorefrontConfig) -> SiteInfo {
    debug!("get_site_info command");

    SiteInfo {
        site: config.site.clone(),
        currency: config.currency.clone(),
        initial_load_count: config.catalog.initial_load_count,
        load_more_count: config.catalog.load_more_count,
        categories: std::iter::once("all")
            .chain(Category::ALL.iter().map(Category::as_str))
            .collect(),
    }
}
