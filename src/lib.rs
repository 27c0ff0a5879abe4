pub mod models;
pub mod server;
pub mod config;
pub mod cli;
pub mod relay;
pub mod upstream;

use cli::Args;
use config::RelayConfig;
use log::{info, warn};
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub use relay::{ ChatRelay, Reply };
pub use server::api::build_app;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Flowise Timeout: {}s", args.flowise_timeout_secs);
    info!("Answer Fields: {}", args.answer_fields.join(", "));
    info!("CORS Enabled: {}", args.enable_cors);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let config = RelayConfig::from_args(&args);
    let relay = Arc::new(ChatRelay::from_config(&config));
    if !relay.is_configured() {
        warn!("Serving without a Flowise connection; set FLOWISE_API_URL and restart.");
    }
    let addr = args.server_addr.clone();
    let server = Server::new(addr, relay, args);
    server.run().await?;

    Ok(())
}
