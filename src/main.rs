//! Fathom MCP server - main entry point.
//!
//! Speaks MCP over stdin/stdout. Logs go to stderr.

use clap::Parser;
use fathom_mcp::api::FathomClient;
use fathom_mcp::mcp::McpServer;
use fathom_mcp::tools::ToolExecutor;
use fathom_mcp::types::API_KEY_ENV;
use fathom_mcp::Config;
use std::sync::Arc;
use tokio::io::BufReader;

#[derive(Debug, Parser)]
#[command(name = "fathom-mcp", version, about = "MCP server for the Fathom meeting API")]
struct Args {
    /// Override the Fathom API base URL.
    #[arg(long, env = "FATHOM_API_BASE_URL")]
    base_url: Option<String>,

    /// Log format on stderr: `text` or `json`.
    #[arg(long, env = "FATHOM_LOG_FORMAT", default_value = "text")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url.trim_end_matches('/').to_string();
    }
    config.observability.json_logs = args.log_format.eq_ignore_ascii_case("json");

    if config.require_api_key().is_err() {
        print_setup_help();
        std::process::exit(1);
    }

    // Initialize observability
    fathom_mcp::observability::init_tracing(&config.observability);

    let client = FathomClient::new(&config.api)?;
    let executor = Arc::new(ToolExecutor::new(Arc::new(client), &config.output)?);
    let server = McpServer::new(executor, config.server.clone());

    let cancel = server.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received");
            cancel.cancel();
        }
    });

    tracing::info!(base_url = %config.api.base_url, "Fathom MCP server starting");
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}

fn print_setup_help() {
    eprintln!("ERROR: No {API_KEY_ENV} variable found.");
    eprintln!();
    eprintln!("To use this MCP server, add a Fathom API key.");
    eprintln!("1. Get your API key from Fathom (Settings -> API).");
    eprintln!("2. Provide it as an environment variable, either:");
    eprintln!("     - in a .env file next to the server: {API_KEY_ENV}=<your key>");
    eprintln!("     - in your MCP client configuration, for example:");
    eprintln!(
        r#"{{
  "mcpServers": {{
    "fathom": {{
      "command": "fathom-mcp",
      "env": {{ "{API_KEY_ENV}": "<your key>" }}
    }}
  }}
}}"#
    );
}
