//! Storefront configuration
//!
//! Everything is read from environment variables (after an optional `.env`)
//! with defaults suitable for local development. See [`Config`] for the table.

use std::path::PathBuf;
use std::time::Duration;

/// Merchant identity used by the checkout deep link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantConfig {
    /// Name greeted in the order message
    pub name: String,
    /// Phone number in international format, digits only
    pub phone: String,
    /// Messaging deep-link host
    pub messaging_host: String,
}

impl Default for MerchantConfig {
    fn default() -> Self {
        Self {
            name: "Distribuidora Maipú".into(),
            phone: "5492613065967".into(),
            messaging_host: "wa.me".into(),
        }
    }
}

/// Per-tenant names: where the catalog lives and how it is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantConfig {
    /// Product collection
    pub products_collection: String,
    /// Single-document category config collection
    pub config_collection: String,
    /// Id of the category config document
    pub config_document: String,
    /// Upload preset name sent with every image
    pub upload_preset: String,
    /// Destination folder tag on the CDN
    pub upload_folder: String,
    /// Category grouped ahead of all others on the storefront
    pub priority_category: Option<String>,
    pub merchant: MerchantConfig,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            products_collection: "productos_bebidas".into(),
            config_collection: "config_bebidas".into(),
            config_document: "global".into(),
            upload_preset: "chatlink_unsigned".into(),
            upload_folder: "tienda_bebidas".into(),
            priority_category: None,
            merchant: MerchantConfig::default(),
        }
    }
}

/// Storefront configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | VITRINA_STORE_URL | http://localhost:8080 | document store base URL |
/// | VITRINA_STORE_TOKEN | - | bearer token for the store |
/// | VITRINA_PRODUCTS_COLLECTION | productos_bebidas | product collection |
/// | VITRINA_CONFIG_COLLECTION | config_bebidas | category config collection |
/// | VITRINA_CONFIG_DOCUMENT | global | category config document id |
/// | VITRINA_UPLOAD_URL | https://api.cloudinary.com/v1_1/demo/image/upload | image upload endpoint |
/// | VITRINA_UPLOAD_PRESET | chatlink_unsigned | upload preset |
/// | VITRINA_UPLOAD_FOLDER | tienda_bebidas | destination folder tag |
/// | VITRINA_MERCHANT_PHONE | 5492613065967 | checkout phone |
/// | VITRINA_MERCHANT_NAME | Distribuidora Maipú | merchant name in the order message |
/// | VITRINA_MESSAGING_HOST | wa.me | messaging deep-link host |
/// | VITRINA_PRIORITY_CATEGORY | - | category shown first (e.g. promos) |
/// | VITRINA_ADMIN_USER | admin | admin user name |
/// | VITRINA_ADMIN_PASSWORD | 1234 | admin password |
/// | VITRINA_SESSION_TTL_SECS | 28800 | admin session lifetime |
/// | VITRINA_SESSION_FILE | ./.vitrina/session.json | session file |
/// | VITRINA_REQUEST_TIMEOUT_SECS | 30 | HTTP timeout |
/// | LOG_LEVEL | info | log level |
/// | LOG_DIR | - | daily rolling log directory |
///
/// # Example
///
/// ```ignore
/// VITRINA_STORE_URL=https://store.example.com VITRINA_PRIORITY_CATEGORY=promos vitrina catalog
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: String,
    pub store_token: Option<String>,
    pub upload_url: String,
    pub tenant: TenantConfig,
    pub admin_user: String,
    pub admin_password: String,
    pub session_ttl_secs: u64,
    pub session_file: PathBuf,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load `.env` if present, then read the environment
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Read configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let tenant_defaults = TenantConfig::default();
        let merchant_defaults = tenant_defaults.merchant.clone();

        Self {
            store_url: env_or("VITRINA_STORE_URL", "http://localhost:8080"),
            store_token: env_opt("VITRINA_STORE_TOKEN"),
            upload_url: env_or(
                "VITRINA_UPLOAD_URL",
                "https://api.cloudinary.com/v1_1/demo/image/upload",
            ),
            tenant: TenantConfig {
                products_collection: env_or(
                    "VITRINA_PRODUCTS_COLLECTION",
                    &tenant_defaults.products_collection,
                ),
                config_collection: env_or(
                    "VITRINA_CONFIG_COLLECTION",
                    &tenant_defaults.config_collection,
                ),
                config_document: env_or("VITRINA_CONFIG_DOCUMENT", &tenant_defaults.config_document),
                upload_preset: env_or("VITRINA_UPLOAD_PRESET", &tenant_defaults.upload_preset),
                upload_folder: env_or("VITRINA_UPLOAD_FOLDER", &tenant_defaults.upload_folder),
                priority_category: env_opt("VITRINA_PRIORITY_CATEGORY"),
                merchant: MerchantConfig {
                    name: env_or("VITRINA_MERCHANT_NAME", &merchant_defaults.name),
                    phone: env_or("VITRINA_MERCHANT_PHONE", &merchant_defaults.phone),
                    messaging_host: env_or(
                        "VITRINA_MESSAGING_HOST",
                        &merchant_defaults.messaging_host,
                    ),
                },
            },
            admin_user: env_or("VITRINA_ADMIN_USER", "admin"),
            admin_password: env_or("VITRINA_ADMIN_PASSWORD", "1234"),
            session_ttl_secs: env_parse("VITRINA_SESSION_TTL_SECS", 8 * 60 * 60),
            session_file: PathBuf::from(env_or(
                "VITRINA_SESSION_FILE",
                "./.vitrina/session.json",
            )),
            request_timeout_secs: env_parse("VITRINA_REQUEST_TIMEOUT_SECS", 30),
            log_level: env_or("LOG_LEVEL", "info"),
            log_dir: env_opt("LOG_DIR").map(PathBuf::from),
        }
    }

    /// Override the store endpoint and tenant
    ///
    /// Mostly used in tests
    pub fn with_overrides(store_url: impl Into<String>, tenant: TenantConfig) -> Self {
        let mut config = Self::from_env();
        config.store_url = store_url.into();
        config.tenant = tenant;
        config
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
