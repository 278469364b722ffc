//! Gateway API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p gateway-api
//! ```
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored in development).

use gateway_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so tracing can be tuned per environment
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        addr = %config.server.address(),
        "Configuration loaded"
    );

    // Run the server
    gateway_api::run(config).await?;

    Ok(())
}
