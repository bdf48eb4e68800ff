//! Employee facade server (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                EMPLOYEE FACADE                │
//!   Client Request    │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ handlers │──▶│ employees  │  │
//!                     │  │ server │   │          │   │  service   │  │
//!                     │  └────────┘   └──────────┘   └─────┬──────┘  │
//!                     │                     ┌──────────────┤         │
//!                     │                     ▼              ▼         │
//!                     │              ┌────────────┐ ┌────────────┐   │     Upstream
//!                     │              │   search   │ │  upstream  │───┼───▶ employee
//!                     │              │   cache    │ │   client   │   │     API
//!                     │              └────────────┘ └─────┬──────┘   │
//!                     │                                   │          │
//!                     │                            resilience        │
//!                     │                       (timeouts, retries)    │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use employee_facade::config::{self, FacadeConfig};
use employee_facade::lifecycle::{startup, Shutdown};
use employee_facade::observability::logging;

#[derive(Parser)]
#[command(name = "employee-facade")]
#[command(about = "Employee REST facade over an upstream employee API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Upstream employee collection URL, overriding the config file.
    #[arg(long, env = "EMPLOYEE_API_BASE_URL")]
    upstream_url: Option<String>,

    /// Listener bind address, overriding the config file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => FacadeConfig::default(),
    };
    if let Some(url) = cli.upstream_url {
        config.upstream.base_url = url;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("employee-facade v{} starting", env!("CARGO_PKG_VERSION"));

    config::validate_config(&config).map_err(config::ConfigError::Validation)?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
