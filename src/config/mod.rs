// Configuration module entry point
// Loads the immutable process configuration and the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{CacheConfig, Config, LoggingConfig, Overrides, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str, overrides: &Overrides) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("MIRROR").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", false)?
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("cache.root", overrides.cache_root.clone())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate().map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Reject cache layouts the translator cannot honour
    pub fn validate(&self) -> Result<(), String> {
        let cache = &self.cache;
        if cache.domain_suffix.is_empty() {
            return Err("cache.domain_suffix must not be empty".to_string());
        }
        if !cache
            .canonical_domain
            .ends_with(&format!(".{}", cache.domain_suffix))
        {
            return Err(format!(
                "cache.canonical_domain '{}' is not a subdomain of '{}'",
                cache.canonical_domain, cache.domain_suffix
            ));
        }
        if cache.index_file.is_empty() || cache.index_file.contains(['/', '\\']) {
            return Err(format!(
                "cache.index_file '{}' must be a plain file name",
                cache.index_file
            ));
        }
        Ok(())
    }
}
