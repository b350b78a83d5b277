//! Configuration management
//!
//! Settings come from three places, highest precedence first: command-line
//! flags (which clap also fills from environment variables), the optional
//! TOML file at ~/.config/bkt/config.toml, and built-in defaults.
//!
//! Credentials are never read from the file. They come from the process
//! environment or, failing that, from the SDK's default provider chain.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "us-east-1";

const DEFAULT_OUTPUT: &str = "human";

const DEFAULT_COLOR: &str = "auto";

/// Contents of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Output defaults
    #[serde(default)]
    pub defaults: Defaults,

    /// Store connection settings
    #[serde(default)]
    pub store: StoreSettings,
}

/// Default settings for output behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Color mode: "auto", "always", or "never"
    #[serde(default = "default_color")]
    pub color: String,

    /// Show a spinner while store calls are in flight
    #[serde(default = "default_true")]
    pub progress: bool,
}

/// Store settings as written in the file; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Use path-style addressing (`endpoint/bucket/key`)
    #[serde(default)]
    pub path_style: bool,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            progress: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            store: StoreSettings::default(),
        }
    }
}

/// Loads the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("bkt").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// A missing file yields the default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade bkt.",
                config.schema_version, SCHEMA_VERSION
            )));
        }
        config.schema_version = SCHEMA_VERSION;

        Ok(config)
    }
}

/// Static credentials taken from the environment
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: Option<String>,
}

impl Credentials {
    /// Read `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_SESSION_TOKEN`
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup
    ///
    /// Both the access key and the secret must be present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Some(Self {
            access_key: non_empty("AWS_ACCESS_KEY_ID")?,
            secret_key: non_empty("AWS_SECRET_ACCESS_KEY")?,
            session_token: non_empty("AWS_SESSION_TOKEN"),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Values given on the command line or through their environment variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub path_style: bool,
}

/// Fully resolved connection settings for one session
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub path_style: bool,
    pub credentials: Option<Credentials>,
}

impl StoreConfig {
    /// Merge overrides over the file settings
    ///
    /// Fails when no bucket is configured anywhere or the endpoint is not a URL.
    pub fn resolve(
        file: &StoreSettings,
        overrides: Overrides,
        credentials: Option<Credentials>,
    ) -> Result<Self> {
        let bucket = overrides
            .bucket
            .or_else(|| file.bucket.clone())
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                Error::Config("No bucket configured. Set S3_BUCKET or pass --bucket".into())
            })?;

        let endpoint = overrides
            .endpoint
            .or_else(|| file.endpoint.clone())
            .filter(|e| !e.is_empty());
        if let Some(endpoint) = &endpoint {
            url::Url::parse(endpoint)?;
        }

        let region = overrides
            .region
            .or_else(|| file.region.clone())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            bucket,
            endpoint,
            region,
            path_style: overrides.path_style || file.path_style,
            credentials,
        })
    }
}
