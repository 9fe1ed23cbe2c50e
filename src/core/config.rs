//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.localeats/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::debounce::DEFAULT_SEARCH_DEBOUNCE;
use crate::data::fetch::{DEFAULT_LOAD_TIMEOUT, DEFAULT_REVIEW_TIMEOUT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocalEatsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub source: Option<SourceKind>,
    pub data_dir: Option<String>,
    pub use_cache: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HttpConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimeoutConfig {
    pub load_ms: Option<u64>,
    pub reviews_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub search_debounce_ms: Option<u64>,
}

/// Where restaurant data comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Bundled dataset, no network.
    #[default]
    Local,
    /// JSON files served over HTTP.
    Http,
}

impl SourceKind {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Some(SourceKind::Local),
            "http" => Some(SourceKind::Http),
            _ => None,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/data";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub source: SourceKind,
    pub base_url: String,
    /// `None` when no home directory exists; storage then runs in memory.
    pub data_dir: Option<PathBuf>,
    pub use_cache: bool,
    pub load_timeout: Duration,
    pub review_timeout: Duration,
    pub search_debounce: Duration,
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub source: Option<SourceKind>,
    pub base_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub no_cache: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.localeats/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".localeats").join("config.toml"))
}

/// Load config from `~/.localeats/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LocalEatsConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LocalEatsConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LocalEatsConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<LocalEatsConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(LocalEatsConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LocalEatsConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# LocalEats Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# source = "local"                   # "local" or "http" (env: LOCALEATS_SOURCE)
# data_dir = "/home/me/.localeats/storage"   # env: LOCALEATS_DATA_DIR
# use_cache = true                   # show the last fetched list while refreshing

# [http]
# base_url = "http://localhost:8080/data"    # env: LOCALEATS_BASE_URL

# [timeouts]
# load_ms = 5000                     # restaurants + stats
# reviews_ms = 3000

# [ui]
# search_debounce_ms = 300
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LocalEatsConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Source: CLI → env → config → default
    let source = cli
        .source
        .or_else(|| {
            std::env::var("LOCALEATS_SOURCE")
                .ok()
                .and_then(|s| SourceKind::parse(&s))
        })
        .or(config.general.source)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("LOCALEATS_BASE_URL").ok())
        .or_else(|| config.http.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Data dir: CLI → env → config → ~/.localeats/storage
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| std::env::var("LOCALEATS_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.general.data_dir.as_ref().map(PathBuf::from))
        .or_else(crate::storage::default_dir);

    let use_cache = !cli.no_cache && config.general.use_cache.unwrap_or(true);

    ResolvedConfig {
        source,
        base_url,
        data_dir,
        use_cache,
        load_timeout: config
            .timeouts
            .load_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LOAD_TIMEOUT),
        review_timeout: config
            .timeouts
            .reviews_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REVIEW_TIMEOUT),
        search_debounce: config
            .ui
            .search_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE),
    }
}
