use std::sync::Arc;

use clap::Parser;
use tokio::sync::Notify;

use cdn_mirror::config::{self, Overrides};
use cdn_mirror::{logger, server};

/// Serve mirrored CDN/domain content from a local cache directory
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file, without extension
    #[arg(short, long, default_value = "config")]
    config: String,

    /// Cache root directory (overrides `cache.root`)
    #[arg(long)]
    root: Option<String>,

    /// Listen address (overrides `server.host`)
    #[arg(long)]
    host: Option<String>,

    /// Listen port (overrides `server.port`)
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        cache_root: cli.root,
    };
    let cfg = config::Config::load_from(&cli.config, &overrides)?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    if !state.translator.root().is_dir() {
        logger::log_warning(&format!(
            "Cache root '{}' is not a directory; every request will miss",
            state.translator.root().display()
        ));
    }

    logger::log_server_start(&listener.local_addr()?, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    server::start_server_loop(listener, state, shutdown).await?;
    Ok(())
}
