//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults serve the shop locally.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: `http://<host>:<port>`)
//! - `SHOP_NAME` - Name used on the page and in order messages
//! - `SHOP_WHATSAPP_NUMBER` - Destination of every WhatsApp deep link
//! - `SHOP_PHONE_DISPLAY` - Phone number as shown in the contact section
//! - `SHOP_EMAIL` - Contact email address
//! - `SHOP_INSTAGRAM` - Instagram handle, without the `@`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text

use std::net::{IpAddr, SocketAddr};

use darsi_core::WhatsAppNumber;
use darsi_core::checkout::DEFAULT_SHOP_NAME;
use thiserror::Error;

const DEFAULT_PHONE_DISPLAY: &str = "+91 94944 37815";
const DEFAULT_EMAIL: &str = "darsischocolatecrafts@gmail.com";
const DEFAULT_INSTAGRAM: &str = "darsis_chocolate";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Shop identity and contact details
    pub shop: ShopConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
    /// Emit logs as JSON lines
    pub json_logs: bool,
}

/// Who the shop is and how customers reach it.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Shop name shown on the page and in order messages
    pub name: String,
    /// WhatsApp number receiving orders and enquiries
    pub whatsapp_number: WhatsAppNumber,
    /// Human-formatted phone number
    pub phone_display: String,
    /// Contact email address
    pub email: String,
    /// Instagram handle without the leading `@`
    pub instagram: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SHOP_NAME.to_string(),
            whatsapp_number: WhatsAppNumber::default(),
            phone_display: DEFAULT_PHONE_DISPLAY.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            instagram: DEFAULT_INSTAGRAM.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or_default::<IpAddr, _>(&lookup, "STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_or_default::<u16, _>(&lookup, "STOREFRONT_PORT", "3000")?;
        let base_url = lookup("STOREFRONT_BASE_URL")
            .map_or_else(|| format!("http://{}", SocketAddr::new(host, port)), |url| {
                url.trim_end_matches('/').to_string()
            });

        let shop = ShopConfig::from_lookup(&lookup)?;

        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate(&lookup, "SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?;
        let json_logs =
            lookup("LOG_FORMAT").is_some_and(|format| format.eq_ignore_ascii_case("json"));

        Ok(Self {
            host,
            port,
            base_url,
            shop,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            json_logs,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ShopConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let whatsapp_number = match lookup("SHOP_WHATSAPP_NUMBER") {
            Some(raw) => WhatsAppNumber::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_WHATSAPP_NUMBER".to_string(), e.to_string())
            })?,
            None => defaults.whatsapp_number,
        };

        Ok(Self {
            name: lookup("SHOP_NAME").unwrap_or(defaults.name),
            whatsapp_number,
            phone_display: lookup("SHOP_PHONE_DISPLAY").unwrap_or(defaults.phone_display),
            email: lookup("SHOP_EMAIL").unwrap_or(defaults.email),
            instagram: lookup("SHOP_INSTAGRAM")
                .map(|handle| handle.trim_start_matches('@').to_string())
                .unwrap_or(defaults.instagram),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate<F>(lookup: &F, key: &str, default: &str) -> Result<f32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let rate = parse_or_default::<f32, _>(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}
