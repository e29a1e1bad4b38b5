// Application state module
// Holds the per-process values every connection reads

use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::routing::PathTranslator;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in here
/// changes while the server runs, so request handling needs no locks.
pub struct AppState {
    pub config: Config,
    pub translator: PathTranslator,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            translator: PathTranslator::new(&config.cache),
            active_connections: AtomicUsize::new(0),
        }
    }

    /// Whether per-request access log lines should be written
    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
