//! MCP stdio server for the Cost Plus Drugs medication tools.
//!
//! Exposes search_medicines, get_collections, and get_all_products over a
//! single stdio transport, plus a static collections resource.

use clap::Parser;
use costplus_async::{Client, CostPlusConfig};
use costplus_tools::{CostPlusServer, CostPlusTools, ServiceExt, stdio};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "costplus-mcp")]
#[command(about = "MCP server for the Cost Plus Drugs medication tools", version)]
struct Args {
    /// Override the API base URL (default: env COSTPLUS_BASE_URL or the
    /// public storefront)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Per-attempt HTTP deadline in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Total attempt bound per request, first attempt included
    #[arg(long, value_name = "N")]
    max_attempts: Option<u32>,

    /// Linear backoff unit between attempts, in milliseconds
    #[arg(long, value_name = "MS")]
    retry_delay_ms: Option<u64>,

    /// List available tools and exit
    #[arg(long)]
    list_tools: bool,

    /// Probe the upstream API, print the health verdict as JSON, and exit
    #[arg(long)]
    health: bool,
}

fn build_config(args: &Args) -> CostPlusConfig {
    let mut config = CostPlusConfig::new();
    if let Some(base) = &args.base_url {
        config = config.with_api_base(base);
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }
    if let Some(n) = args.max_attempts {
        config = config.with_max_attempts(n);
    }
    if let Some(ms) = args.retry_delay_ms {
        config = config.with_retry_base_delay(Duration::from_millis(ms));
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP protocol; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_tools {
        let names = CostPlusServer::tool_names();
        eprintln!("Available tools ({}):", names.len());
        for name in names {
            eprintln!("  - {name}");
        }
        return Ok(());
    }

    let client = Client::with_config(build_config(&args));

    if args.health {
        let verdict = client.health_check().await;
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    eprintln!(
        "Starting costplus-mcp against {}",
        client.config().api_base()
    );

    let tools = Arc::new(CostPlusTools::new(client));
    let server = CostPlusServer::new(tools).with_info("costplus-mcp", env!("CARGO_PKG_VERSION"));
    let transport = stdio();
    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
