//! User service demo.
//!
//! # Architecture Overview
//!
//! ```text
//!   HTTP request ──▶ trace middleware ──▶ user handler
//!                                             │ info / warn / error / debug
//!                                             ▼
//!                                     bounded entry queue
//!                                             │
//!                                             ▼
//!                               batch worker (size or 100ms tick)
//!                                             │ + dd.trace_id / dd.span_id
//!                                             ▼
//!                                      sink ──▶ stdout
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use batchlog::config::load_config;
use batchlog::http::{AppState, HttpServer};
use batchlog::lifecycle::{self, signals, Shutdown};
use batchlog::observability::{diagnostics, metrics};

#[derive(Parser)]
#[command(name = "batchlog")]
#[command(about = "User service writing through the batched logger", long_about = None)]
struct Cli {
    /// TOML configuration file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    diagnostics::init_tracing(&config.observability.diagnostics_filter);

    tracing::info!(
        bind_address = %config.server.bind_address(),
        log_level = %config.logger.level,
        queue_capacity = config.logger.queue_capacity,
        batch_size = config.logger.batch_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    // A bad level or an unopenable log output stops the process here.
    let services = lifecycle::start_services(&config)?;

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    let shutdown = Shutdown::new();
    let server = HttpServer::new(AppState::from(&services));
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let result = tokio::select! {
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            server_task.await
        }
        result = &mut server_task => result,
    };
    match result {
        Ok(Err(e)) => tracing::error!(error = %e, "HTTP server failed"),
        Err(e) => tracing::error!(error = %e, "HTTP server task panicked"),
        Ok(Ok(())) => {}
    }

    lifecycle::stop_services(&services).await;
    tracing::info!("Shutdown complete");
    Ok(())
}
