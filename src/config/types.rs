// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

/// Performance configuration
///
/// Connections are always kept alive; only their number is tunable.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PerformanceConfig {
    pub max_connections: Option<u64>,
}

/// Cache layout configuration
///
/// Fixed for the process lifetime; the translator is built from it once.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding the mirrored content
    #[serde(default = "default_cache_root")]
    pub root: String,
    /// Host cached at the root instead of its own subdirectory
    #[serde(default = "default_canonical_domain")]
    pub canonical_domain: String,
    /// Parent domain whose subdomains get namespaced, e.g. `example.com`
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,
    /// Hosts whose query strings never become part of the cache filename
    #[serde(default = "default_query_suffix_exempt")]
    pub query_suffix_exempt: Vec<String>,
    /// File served when a request resolves to a directory
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_cache_root() -> String {
    "./webroot".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_canonical_domain() -> String {
    "www.example.com".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_domain_suffix() -> String {
    "example.com".to_string()
}

fn default_query_suffix_exempt() -> Vec<String> {
    vec!["panojson-oss.example.com".to_string()]
}

#[allow(clippy::missing_const_for_fn)]
fn default_index_file() -> String {
    "index.html".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: default_cache_root(),
            canonical_domain: default_canonical_domain(),
            domain_suffix: default_domain_suffix(),
            query_suffix_exempt: default_query_suffix_exempt(),
            index_file: default_index_file(),
        }
    }
}

/// Values supplied on the command line, applied on top of file and environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cache_root: Option<String>,
}
