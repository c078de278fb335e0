use clap::Parser;
use std::sync::Arc;

use rust_pingserver::config::{AppState, Config};
use rust_pingserver::error::ServerError;
use rust_pingserver::{handler, logger, server};

/// Liveness HTTP server answering `GET /ping/` and `GET /health/`
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file path, without extension
    #[arg(short, long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config)?;
    let warnings = cfg.validate()?;

    logger::init(&cfg.logging)?;
    for warning in &warnings {
        logger::log_config_warning(warning);
    }

    // Build the Tokio runtime, sized by `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let router = handler::default_routes()?;
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    logger::log_route_table(&router);

    let state = Arc::new(AppState::new(cfg, router));
    server::start_server_loop(listener, state, async {
        let signal = server::wait_for_shutdown_signal().await;
        logger::log_shutdown_requested(signal);
    })
    .await
}
