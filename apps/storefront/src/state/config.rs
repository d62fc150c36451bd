//! # Storefront Configuration
//!
//! Configuration loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CRAFTS_STORAGE_BACKEND=memory                                      │
//! │     CRAFTS_AUTOPLAY=false                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $CRAFTS_CONFIG, or                                                 │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.dannyscrafts.storefront/ (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [site]
//! name = "Danny's Dodgers Crafts"
//! email = "danny@dannyscrafts.com"
//!
//! [catalog]
//! path = "/srv/crafts/catalog.json"   # omit for the built-in sample catalog
//! simulate_latency = false
//!
//! [storage]
//! backend = "sqlite"                  # sqlite | memory
//! cart_key = "dannys-crafts-cart"
//!
//! [carousel]
//! autoplay = true
//! interval_ms = 5000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crafts_core::{Money, DEFAULT_INITIAL_LOAD_COUNT, DEFAULT_LOAD_MORE_COUNT};
use crafts_store::{validate_key, CatalogLatency, DEFAULT_CART_KEY};

use crate::error::{StartupError, StartupResult};

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Site
// =============================================================================

/// Shop identity and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_tagline")]
    pub tagline: String,

    #[serde(default = "default_email")]
    pub email: String,

    #[serde(default = "default_location")]
    pub location: String,

    /// How soon inquiries are answered, as displayed.
    #[serde(default = "default_response_time")]
    pub response_time: String,
}

fn default_site_name() -> String {
    "Danny's Dodgers Crafts".to_string()
}

fn default_tagline() -> String {
    "Handcrafted Merchandise with Heart".to_string()
}

fn default_email() -> String {
    "danny@dannyscrafts.com".to_string()
}

fn default_location() -> String {
    "Los Angeles, California".to_string()
}

fn default_response_time() -> String {
    "Within 24-48 hours".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            name: default_site_name(),
            tagline: default_tagline(),
            email: default_email(),
            location: default_location(),
            response_time: default_response_time(),
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Minor-unit digits (2 for USD)
    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,

    /// Separator between groups of three whole digits; empty to disable
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

fn default_thousands_separator() -> String {
    ",".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

impl CurrencyConfig {
    /// Formats an amount in minor units, e.g. `$1,234.56`.
    pub fn format(&self, amount: Money) -> String {
        let minor = amount.cents();
        let divisor = 10_i64.pow(u32::from(self.decimals));
        let whole = (minor / divisor).unsigned_abs();
        let frac = (minor % divisor).unsigned_abs();

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(ch);
        }

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.symbol,
            if self.decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    grouped,
                    frac,
                    width = usize::from(self.decimals)
                )
            } else {
                grouped
            }
        )
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in sample catalog when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Delay catalog calls like a remote API would.
    #[serde(default = "default_true")]
    pub simulate_latency: bool,

    #[serde(default = "default_list_latency")]
    pub list_latency_ms: u64,

    #[serde(default = "default_lookup_latency")]
    pub lookup_latency_ms: u64,

    /// Contact form round trip.
    #[serde(default = "default_submit_latency")]
    pub submit_latency_ms: u64,

    /// Products shown before the first "load more".
    #[serde(default = "default_initial_load_count")]
    pub initial_load_count: usize,

    /// Products each "load more" reveals.
    #[serde(default = "default_load_more_count")]
    pub load_more_count: usize,
}

fn default_true() -> bool {
    true
}

fn default_list_latency() -> u64 {
    300
}

fn default_lookup_latency() -> u64 {
    200
}

fn default_submit_latency() -> u64 {
    1000
}

fn default_initial_load_count() -> usize {
    DEFAULT_INITIAL_LOAD_COUNT
}

fn default_load_more_count() -> usize {
    DEFAULT_LOAD_MORE_COUNT
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            path: None,
            simulate_latency: true,
            list_latency_ms: default_list_latency(),
            lookup_latency_ms: default_lookup_latency(),
            submit_latency_ms: default_submit_latency(),
            initial_load_count: default_initial_load_count(),
            load_more_count: default_load_more_count(),
        }
    }
}

impl CatalogConfig {
    pub fn latency(&self) -> CatalogLatency {
        if !self.simulate_latency {
            return CatalogLatency::none();
        }
        CatalogLatency {
            list: Duration::from_millis(self.list_latency_ms),
            lookup: Duration::from_millis(self.lookup_latency_ms),
        }
    }

    /// Delay before a contact submission is acknowledged.
    pub fn submit_latency(&self) -> Duration {
        if !self.simulate_latency {
            return Duration::ZERO;
        }
        Duration::from_millis(self.submit_latency_ms)
    }
}

// =============================================================================
// Storage
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// `storefront.db` in the data directory.
    #[default]
    #[serde(alias = "file")]
    Sqlite,
    /// Process memory only; the cart is lost on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = StartupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "file" | "disk" => Ok(StorageBackend::Sqlite),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(StartupError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: sqlite, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory holding the SQLite database; the platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Byte cap for the memory backend.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            backend: StorageBackend::default(),
            data_dir: None,
            cart_key: default_cart_key(),
            quota_bytes: None,
        }
    }
}

impl StorageConfig {
    /// The configured data dir, else the platform default.
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
        })
    }
}

// =============================================================================
// Carousel
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_true")]
    pub autoplay: bool,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Host prefers reduced motion; autoplay stays paused.
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_interval_ms() -> u64 {
    5000
}

impl Default for CarouselConfig {
    fn default() -> Self {
        CarouselConfig {
            autoplay: true,
            interval_ms: default_interval_ms(),
            reduced_motion: false,
        }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub carousel: CarouselConfig,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, else `$CRAFTS_CONFIG`, else the platform default)
    /// 3. Environment variables
    pub fn load(path: Option<PathBuf>) -> StartupResult<Self> {
        let mut config = Self::default();

        let path = path
            .or_else(|| std::env::var_os("CRAFTS_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> StartupResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| StartupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> StartupResult<()> {
        let path = path
            .or_else(Self::default_config_path)
            .ok_or(StartupError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    pub fn validate(&self) -> StartupResult<()> {
        let invalid = |msg: &str| Err(StartupError::InvalidConfig(msg.to_string()));

        if self.site.name.trim().is_empty() {
            return invalid("site.name must not be empty");
        }
        if validate_key(&self.storage.cart_key).is_err() {
            return Err(StartupError::InvalidConfig(format!(
                "storage.cart_key '{}' may only use letters, digits, '.', '_' and '-' \
                 and must not start with '.'",
                self.storage.cart_key
            )));
        }
        if self.carousel.interval_ms == 0 {
            return invalid("carousel.interval_ms must be greater than 0");
        }
        if self.catalog.initial_load_count == 0 || self.catalog.load_more_count == 0 {
            return invalid("catalog page sizes must be greater than 0");
        }
        if self.currency.decimals > 4 {
            return invalid("currency.decimals must be at most 4");
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `CRAFTS_*` overrides from any lookup.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("CRAFTS_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(backend) = var("CRAFTS_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => self.storage.backend = parsed,
                Err(e) => warn!(error = %e, "Ignoring CRAFTS_STORAGE_BACKEND"),
            }
        }

        if let Some(key) = var("CRAFTS_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(path) = var("CRAFTS_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(value) = var("CRAFTS_SIMULATE_LATENCY") {
            match parse_flag(&value) {
                Some(flag) => self.catalog.simulate_latency = flag,
                None => warn!(value = %value, "Ignoring CRAFTS_SIMULATE_LATENCY"),
            }
        }

        if let Some(value) = var("CRAFTS_AUTOPLAY") {
            match parse_flag(&value) {
                Some(flag) => self.carousel.autoplay = flag,
                None => warn!(value = %value, "Ignoring CRAFTS_AUTOPLAY"),
            }
        }

        if let Some(value) = var("CRAFTS_AUTOPLAY_INTERVAL_MS") {
            match value.parse::<u64>() {
                Ok(ms) => self.carousel.interval_ms = ms,
                Err(_) => warn!(value = %value, "Ignoring CRAFTS_AUTOPLAY_INTERVAL_MS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Formats an amount with the configured currency.
    pub fn format_currency(&self, amount: Money) -> String {
        self.currency.format(amount)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "dannyscrafts", "storefront")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
