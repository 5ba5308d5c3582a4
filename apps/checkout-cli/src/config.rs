//! # Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--products`)
//! 2. Environment variables (`CHECKOUT_*`)
//! 3. Defaults (this file)
//!
//! Unlike a typo in a flag, a bad environment value would otherwise go
//! unnoticed, so every override is validated and rejected with
//! [`AppError::Config`].

use std::path::PathBuf;
use std::time::Duration;

use checkout_core::{DiscountPolicy, Money, DISCOUNT_RATE_BPS, DISCOUNT_THRESHOLD};
use serde::Serialize;

use crate::error::{AppError, AppResult};

pub const ENV_STORE_NAME: &str = "CHECKOUT_STORE_NAME";
pub const ENV_PRODUCTS_PATH: &str = "CHECKOUT_PRODUCTS_PATH";
pub const ENV_LOAD_TIMEOUT_MS: &str = "CHECKOUT_LOAD_TIMEOUT_MS";
pub const ENV_CURRENCY_SYMBOL: &str = "CHECKOUT_CURRENCY_SYMBOL";
pub const ENV_DISCOUNT_THRESHOLD: &str = "CHECKOUT_DISCOUNT_THRESHOLD";
pub const ENV_DISCOUNT_PERCENT: &str = "CHECKOUT_DISCOUNT_PERCENT";

/// Bundled sample catalog.
const DEFAULT_PRODUCTS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/products.json");

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Heading printed above the table.
    pub store_name: String,

    /// JSON file with the product records.
    pub products_path: PathBuf,

    /// Upper bound on the catalog load. `None` waits indefinitely.
    pub load_timeout: Option<Duration>,

    /// Appended to every amount, e.g. `Total: 10.00$`.
    pub currency_symbol: String,

    /// Threshold and rate of the order discount.
    pub discount: DiscountPolicy,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Store: "Electro World"
    /// - Products: the bundled `data/products.json`
    /// - Timeout: none
    /// - Currency symbol: "$"
    /// - Discount: 10% above 1000.00
    fn default() -> Self {
        AppConfig {
            store_name: "Electro World".to_string(),
            products_path: PathBuf::from(DEFAULT_PRODUCTS_PATH),
            load_timeout: None,
            currency_symbol: "$".to_string(),
            discount: DiscountPolicy::new(DISCOUNT_THRESHOLD, DISCOUNT_RATE_BPS),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    ///
    /// Unset keys keep their defaults; set keys must parse.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(name) = lookup(ENV_STORE_NAME) {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(AppError::config(ENV_STORE_NAME, &name, "must not be empty"));
            }
            config.store_name = trimmed.to_string();
        }

        if let Some(path) = lookup(ENV_PRODUCTS_PATH) {
            if path.trim().is_empty() {
                return Err(AppError::config(ENV_PRODUCTS_PATH, &path, "must not be empty"));
            }
            config.products_path = PathBuf::from(path);
        }

        if let Some(ms) = lookup(ENV_LOAD_TIMEOUT_MS) {
            config.load_timeout = Some(parse_timeout(&ms)?);
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            config.currency_symbol = symbol;
        }

        let mut threshold = config.discount.threshold;
        let mut rate_bps = config.discount.rate_bps;

        if let Some(text) = lookup(ENV_DISCOUNT_THRESHOLD) {
            threshold = parse_threshold(&text)?;
        }

        if let Some(text) = lookup(ENV_DISCOUNT_PERCENT) {
            rate_bps = parse_percent(&text)?;
        }

        config.discount = DiscountPolicy::new(threshold, rate_bps);
        Ok(config)
    }

    /// Replaces the products path (the `--products` flag).
    pub fn with_products_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.products_path = path.into();
        self
    }
}

fn parse_timeout(text: &str) -> AppResult<Duration> {
    let ms: u64 = text
        .trim()
        .parse()
        .map_err(|_| AppError::config(ENV_LOAD_TIMEOUT_MS, text, "expected milliseconds"))?;

    if ms == 0 {
        return Err(AppError::config(ENV_LOAD_TIMEOUT_MS, text, "must be greater than 0"));
    }

    Ok(Duration::from_millis(ms))
}

fn parse_threshold(text: &str) -> AppResult<Money> {
    let threshold = Money::parse_decimal(text.trim())
        .map_err(|e| AppError::config(ENV_DISCOUNT_THRESHOLD, text, e.to_string()))?;

    if threshold.is_negative() {
        return Err(AppError::config(ENV_DISCOUNT_THRESHOLD, text, "must not be negative"));
    }

    Ok(threshold)
}

/// Parses a percentage with up to two decimals into basis points.
///
/// "10" → 1000, "12.5" → 1250. Parsing goes through `Money` because a
/// percent with two decimals has the same shape as an amount in cents.
fn parse_percent(text: &str) -> AppResult<u32> {
    let hundredths = Money::parse_decimal(text.trim())
        .map_err(|e| AppError::config(ENV_DISCOUNT_PERCENT, text, e.to_string()))?
        .cents();

    if !(0..=10_000).contains(&hundredths) {
        return Err(AppError::config(ENV_DISCOUNT_PERCENT, text, "must be between 0 and 100"));
    }

    Ok(hundredths as u32)
}
