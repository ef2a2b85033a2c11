//! Process configuration read from `STOREFRONT_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, ensure};

use crate::catalog::HttpCatalogClient;
use crate::persistence::{DEFAULT_CART_KEY, FileKeyValueStore, KeyValueCartStore, is_valid_key};

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
pub const DEFAULT_CATALOG_PAGE_SIZE: u32 = 8;
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CART_DIR: &str = "./.storefront";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub catalog_url: String,
    pub catalog_page_size: u32,
    pub catalog_timeout: Duration,
    /// Directory holding the persisted cart.
    pub cart_dir: PathBuf,
    pub cart_key: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_page_size: DEFAULT_CATALOG_PAGE_SIZE,
            catalog_timeout: DEFAULT_CATALOG_TIMEOUT,
            cart_dir: PathBuf::from(DEFAULT_CART_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Read the configuration from the process environment.
    ///
    /// - `STOREFRONT_CATALOG_URL`
    /// - `STOREFRONT_CATALOG_PAGE_SIZE` (at least 1)
    /// - `STOREFRONT_CATALOG_TIMEOUT_MS`
    /// - `STOREFRONT_CART_DIR`
    /// - `STOREFRONT_CART_KEY`
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            config.catalog_url = url;
        }

        if let Some(raw) = lookup("STOREFRONT_CATALOG_PAGE_SIZE") {
            let page_size: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid STOREFRONT_CATALOG_PAGE_SIZE: {raw:?}"))?;
            ensure!(page_size >= 1, "STOREFRONT_CATALOG_PAGE_SIZE must be at least 1");
            config.catalog_page_size = page_size;
        }

        if let Some(raw) = lookup("STOREFRONT_CATALOG_TIMEOUT_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid STOREFRONT_CATALOG_TIMEOUT_MS: {raw:?}"))?;
            config.catalog_timeout = Duration::from_millis(millis);
        }

        if let Some(dir) = lookup("STOREFRONT_CART_DIR") {
            config.cart_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup("STOREFRONT_CART_KEY") {
            ensure!(
                is_valid_key(&key),
                "invalid STOREFRONT_CART_KEY: {key:?} (use letters, digits, '_', '-' or '.', not starting with '.')"
            );
            config.cart_key = key;
        }

        Ok(config)
    }

    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    pub fn with_catalog_page_size(mut self, page_size: u32) -> Self {
        self.catalog_page_size = page_size.max(1);
        self
    }

    pub fn with_catalog_timeout(mut self, timeout: Duration) -> Self {
        self.catalog_timeout = timeout;
        self
    }

    pub fn with_cart_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cart_dir = dir.into();
        self
    }

    pub fn with_cart_key(mut self, key: impl Into<String>) -> Self {
        self.cart_key = key.into();
        self
    }

    /// File-backed cart persistence rooted at `cart_dir`.
    pub fn cart_store(&self) -> KeyValueCartStore<FileKeyValueStore> {
        KeyValueCartStore::with_key(FileKeyValueStore::new(&self.cart_dir), &self.cart_key)
    }

    pub fn catalog_client(&self) -> anyhow::Result<HttpCatalogClient> {
        HttpCatalogClient::with_timeout(
            &self.catalog_url,
            self.catalog_page_size,
            self.catalog_timeout,
        )
        .context("failed to build catalog HTTP client")
    }
}
