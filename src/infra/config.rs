//! Centralized configuration (environment variables + defaults).

use crate::infra::assistant::DEFAULT_GEMINI_MODEL;
use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL. When absent the service runs on the in-memory store.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    /// Mapbox access token. Geocoding is disabled without it.
    pub mapbox_token: Option<String>,
    /// Capture endpoint of the payment provider. Payments are auto-approved without it.
    pub payment_capture_url: Option<String>,
    /// Gemini API key. The assistant answers with an error without it.
    pub gemini_api_key: Option<String>,
    /// Model name passed to `generateContent`.
    pub gemini_model: String,
    pub currency: String,
    /// Allowed CORS origin; any origin when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR must be host:port, got '{}'", bind_raw))?;

        let currency = get("CURRENCY")
            .map(|c| c.trim().to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            anyhow::bail!("CURRENCY must be a 3-letter ISO code, got '{}'", currency);
        }

        Ok(Self {
            database_url: get("DATABASE_URL"),
            bind_addr,
            mapbox_token: get("MAPBOX_TOKEN"),
            payment_capture_url: get("PAYMENT_CAPTURE_URL"),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            currency,
            cors_origin: get("CORS_ORIGIN"),
        })
    }

    /// Database URL, required by tools that only make sense against Postgres.
    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set")
    }
}
