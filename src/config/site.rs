//! Site configuration (_config.yml plus environment overrides)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the configuration file looked up in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// Meta description used when a page has nothing more specific
pub const DEFAULT_DESCRIPTION: &str = "A beautifully designed blog platform showcasing quality \
content with elegant typography and modern design.";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL (origin used for absolute links such as og:url)
    pub url: String,
    pub root: String,

    // Date format (chrono strftime syntax)
    pub date_format: String,

    // Content store connection
    pub store: StoreConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Modern Blog Platform".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            language: "en".to_string(),
            url: "http://localhost:3000".to_string(),
            root: "/".to_string(),
            date_format: "%B %d, %Y".to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from a directory (defaults when absent) and apply
    /// the process environment on top
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            tracing::debug!("Loading configuration from {:?}", config_path);
            Self::load(&config_path)?
        } else {
            Self::default()
        };

        config.store.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }
}

/// Which deployment of the content API to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    Production,
    #[default]
    Staging,
}

impl ApiEnvironment {
    /// Default API origin for this environment
    pub fn default_url(self) -> &'static str {
        match self {
            ApiEnvironment::Production => "https://api.cosmicjs.com",
            ApiEnvironment::Staging => "https://api.cosmic-staging.com",
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(ApiEnvironment::Production),
            "staging" => Ok(ApiEnvironment::Staging),
            other => bail!("Unknown API environment: {}", other),
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiEnvironment::Production => write!(f, "production"),
            ApiEnvironment::Staging => write!(f, "staging"),
        }
    }
}

/// Content store credentials and connection settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub bucket_slug: String,
    pub read_key: String,
    /// Accepted for deployment parity; the read layer never uses it
    pub write_key: Option<String>,
    pub api_environment: ApiEnvironment,
    /// Overrides the environment's API origin
    pub api_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket_slug: String::new(),
            read_key: String::new(),
            write_key: None,
            api_environment: ApiEnvironment::default(),
            api_url: None,
            timeout_secs: 30,
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("bucket_slug", &self.bucket_slug)
            .field("read_key", &redact(&self.read_key))
            .field("write_key", &self.write_key.as_deref().map(redact))
            .field("api_environment", &self.api_environment)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl StoreConfig {
    /// Apply `COSMIC_*` overrides using the given variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bucket) = lookup("COSMIC_BUCKET_SLUG") {
            self.bucket_slug = bucket;
        }
        if let Some(key) = lookup("COSMIC_READ_KEY") {
            self.read_key = key;
        }
        if let Some(key) = lookup("COSMIC_WRITE_KEY") {
            self.write_key = Some(key);
        }
        if let Some(env) = lookup("COSMIC_API_ENVIRONMENT") {
            self.api_environment = env.parse()?;
        }
        Ok(())
    }

    /// Check that the settings needed for reading are present
    pub fn validate(&self) -> Result<()> {
        if self.bucket_slug.trim().is_empty() {
            bail!("Content store bucket slug is not configured (set COSMIC_BUCKET_SLUG)");
        }
        if self.read_key.trim().is_empty() {
            bail!("Content store read key is not configured (set COSMIC_READ_KEY)");
        }
        Ok(())
    }

    /// API origin without a trailing slash
    pub fn base_url(&self) -> String {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.api_environment.default_url())
            .trim_end_matches('/')
            .to_string()
    }
}
