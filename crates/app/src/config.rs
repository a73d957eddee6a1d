//! Session configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use jiff::SignedDuration;
use rust_decimal::Decimal;

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Boutique session configuration
#[derive(Debug, Parser)]
#[command(name = "boutique", about = "Boutique storefront session", long_about = None)]
pub struct SessionConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Directory for the on-device cart and wishlist copies; kept in memory when unset
    #[arg(long, env = "BOUTIQUE_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// JSON file with the product listings the session can add from
    #[arg(long, env = "BOUTIQUE_CATALOG")]
    pub catalog_path: Option<PathBuf>,

    /// Base URL images are served from
    #[arg(long, env = "IMAGE_BASE_URL", default_value = "https://images.boutique.local")]
    pub image_base_url: String,

    /// How long resolved image URLs are reused, in seconds
    #[arg(long, env = "IMAGE_URL_TTL_SECONDS", default_value_t = 3_600_u64)]
    pub image_url_ttl_seconds: u64,

    /// Flat shipping fee added to every order
    #[arg(long, env = "SHIPPING_FEE", default_value = "0")]
    pub shipping_fee: Decimal,
}

impl SessionConfig {
    /// Lifetime of a resolved image URL.
    #[must_use]
    pub fn image_url_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::try_from(self.image_url_ttl_seconds).unwrap_or(i64::MAX))
    }
}
