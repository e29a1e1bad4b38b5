//! Logger module
//!
//! Provides logging utilities for the mirror server including:
//! - Server lifecycle logging
//! - Cache hit/miss lines and URL translation tracing
//! - Access logging with multiple formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogLevel;

use crate::config::Config;
use std::io;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write a leveled message; before `init()` info and above go to the console
fn write(level: LogLevel, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        None => match level {
            LogLevel::Error | LogLevel::Warn => eprintln!("{message}"),
            LogLevel::Info => println!("{message}"),
            LogLevel::Debug => {}
        },
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write(LogLevel::Info, "======================================");
    write(LogLevel::Info, "Cache mirror started successfully");
    write(LogLevel::Info, &format!("Listening on: http://{addr}"));
    write(
        LogLevel::Info,
        &format!("Serving from: {}", config.cache.root),
    );
    write(
        LogLevel::Info,
        &format!(
            "Canonical domain: {} (suffix .{})",
            config.cache.canonical_domain, config.cache.domain_suffix
        ),
    );
    if !config.cache.query_suffix_exempt.is_empty() {
        write(
            LogLevel::Info,
            &format!(
                "Query suffix exempt: {}",
                config.cache.query_suffix_exempt.join(", ")
            ),
        );
    }
    write(LogLevel::Info, &format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write(LogLevel::Info, &format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write(LogLevel::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write(LogLevel::Info, &format!("Error log: {path}"));
    }
    write(LogLevel::Info, "======================================\n");
}

pub fn log_info(message: &str) {
    write(LogLevel::Info, message);
}

pub fn log_debug(message: &str) {
    write(LogLevel::Debug, message);
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(LogLevel::Warn, &format!("[WARN] {message}"));
}

/// One line per request: `[GET HIT] /cdn.example.com/a.png -> webroot/cdn.example.com/a.png`
pub fn log_cache_outcome(tag: &str, raw_url: &str, local_path: &Path) {
    write(
        LogLevel::Info,
        &format!("[{tag}] {raw_url} -> {}", local_path.display()),
    );
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    write(
        LogLevel::Info,
        &format!("[Shutdown] Listener closed, {active_connections} connection(s) still finishing"),
    );
}
