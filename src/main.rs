use amz_mcp_rust::config::Config;
use amz_mcp_rust::router::create_app_router;
use amz_mcp_rust::state::AppState;
use anyhow::Result;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "amz-mcp")]
#[command(about = "Amazon catalog tools over MCP Streamable HTTP", long_about = None)]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0", help = "Address to bind")]
    host: IpAddr,

    #[arg(short, long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    port: u16,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug {
        EnvFilter::from_default_env()
            .add_directive("amz_mcp_rust=debug".parse()?)
            .add_directive("info".parse()?)
    } else {
        EnvFilter::from_default_env()
            .add_directive("amz_mcp_rust=info".parse()?)
            .add_directive("warn".parse()?)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting amz-mcp v{}", env!("CARGO_PKG_VERSION"));

    // Configuration is read once; the adapter mode is fixed from here on
    let config = Config::from_env();
    let state = Arc::new(AppState::new(&config));
    info!("Catalog mode: {:?}", state.adapter.mode());

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP Stateless Streamable HTTP Server listening on http://{}/mcp", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
