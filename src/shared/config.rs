//! Application configuration. Listener, store, pipeline bounds, admin auth, CORS.

use crate::usecases::{DEFAULT_LIST_CAP, DEFAULT_STORE_BOUND};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Public site, allowed as a CORS origin in production.
pub const PRODUCTION_ORIGIN: &str = "https://keshavjindal-portfolio.vercel.app";
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Which `SubmissionStore` adapter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Listen port. Read from PORT (or PORTFOLIO_PORT).
    #[serde(default)]
    pub port: Option<u16>,

    /// Deployment environment ("development", "production"). Read from NODE_ENV.
    #[serde(default)]
    pub environment: Option<String>,

    /// Directory holding contacts.db. Read from PORTFOLIO_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// "sqlite" (default) or "memory". Read from PORTFOLIO_STORE.
    #[serde(default)]
    pub store: Option<String>,

    /// Upper bound on a single store call. Read from PORTFOLIO_WRITE_TIMEOUT_SECS.
    #[serde(default)]
    pub write_timeout_secs: Option<u64>,

    /// Max records returned by the admin listing. Read from PORTFOLIO_LIST_CAP.
    #[serde(default)]
    pub list_cap: Option<u32>,

    /// Bearer token for admin reads. Unset means admin reads are refused. Read from PORTFOLIO_ADMIN_TOKEN.
    #[serde(default)]
    pub admin_token: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // CORS
    // ─────────────────────────────────────────────────────────────────────────
    /// Front-end origin. Read from FRONTEND_URL.
    #[serde(default)]
    pub frontend_url: Option<String>,

    /// Preview deployment host (no scheme). Read from VERCEL_URL.
    #[serde(default)]
    pub vercel_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        // Values stay strings until deserialized, so tokens and paths keep leading zeros.
        c = c.add_source(config::Environment::with_prefix("PORTFOLIO"));
        if let Ok(path) = std::env::var("PORTFOLIO_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Unprefixed names used by hosting platforms win over PORTFOLIO_* ones.
        if let Ok(s) = std::env::var("PORT") {
            if let Ok(port) = s.parse::<u16>() {
                cfg.port = Some(port);
            }
        }
        if let Ok(s) = std::env::var("NODE_ENV") {
            cfg.environment = Some(s);
        }
        if let Ok(s) = std::env::var("FRONTEND_URL") {
            cfg.frontend_url = Some(s);
        }
        if let Ok(s) = std::env::var("VERCEL_URL") {
            cfg.vercel_url = Some(s);
        }
        Ok(cfg)
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn data_dir_or_default(&self) -> &str {
        self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR)
    }

    /// True only for an explicit "development" environment. Enables error detail in responses.
    pub fn is_development(&self) -> bool {
        self.environment
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("development"))
    }

    pub fn is_production(&self) -> bool {
        self.environment
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("production"))
    }

    /// Unknown values fall back to SQLite.
    pub fn store_backend(&self) -> StoreBackend {
        match self.store.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("memory") => StoreBackend::Memory,
            _ => StoreBackend::Sqlite,
        }
    }

    /// Returns the store call bound. Unset or zero falls back to 10 seconds.
    pub fn write_timeout(&self) -> Duration {
        self.write_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_STORE_BOUND)
    }

    pub fn list_cap_or_default(&self) -> u32 {
        self.list_cap.filter(|n| *n > 0).unwrap_or(DEFAULT_LIST_CAP)
    }

    pub fn admin_token(&self) -> Option<String> {
        self.admin_token.clone()
    }

    /// CORS allow-list: local dev servers, FRONTEND_URL, https://VERCEL_URL and, in
    /// production, the public site.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = LOCAL_ORIGINS.iter().map(|s| s.to_string()).collect();
        let mut extra = Vec::new();
        if let Some(url) = self.frontend_url.as_deref().filter(|s| !s.is_empty()) {
            extra.push(url.trim_end_matches('/').to_string());
        }
        if let Some(host) = self.vercel_url.as_deref().filter(|s| !s.is_empty()) {
            extra.push(format!("https://{host}"));
        }
        if self.is_production() {
            extra.push(PRODUCTION_ORIGIN.to_string());
        }
        for origin in extra {
            if !origins.contains(&origin) {
                origins.push(origin);
            }
        }
        origins
    }
}
