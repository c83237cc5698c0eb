use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use neo4j_graph_agent::{
    cli::{execute_ask, Cli, Commands},
    config::{Config, LogFormat},
    server::{AppState, McpServer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Neo4j graph agent starting..."
    );

    let state = match AppState::from_config(config) {
        Ok(s) => {
            info!(
                graph_url = %s.config.graph.url,
                llm_base_url = %s.config.llm.base_url,
                "Clients initialized"
            );
            Arc::new(s)
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize clients");
            return Err(e.into());
        }
    };

    match cli.command() {
        Commands::Serve => serve(state).await,
        Commands::Ask {
            question,
            thread_id,
        } => {
            let result = execute_ask(&state.questions, &question, thread_id).await;
            for line in &result.trace {
                eprintln!("{}", line);
            }
            if result.exit_code == 0 {
                println!("{}", result.message);
            } else {
                eprintln!("{}", result.message);
            }
            std::process::exit(result.exit_code);
        }
    }
}

async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let server = McpServer::new(state);

    info!("Server ready, waiting for requests on stdin...");

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
