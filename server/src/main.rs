use clap::Parser;
use log::{error, info};
use server::engine::{Engine, EngineConfig};
use server::gateway::Gateway;
use shared::{PortalPair, DEFAULT_PORT};
use std::time::Duration;
use tokio::sync::watch;

/// Main-method of the application.
/// Parses command-line arguments, loads the map, then starts the engine and the gateway.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Map file to load
        #[clap(short, long, default_value = "maps/default.txt")]
        map: String,
        /// Milliseconds between enemy steps
        #[clap(long, default_value = "800")]
        enemy_tick_ms: u64,
        /// Milliseconds between pickup relocations
        #[clap(long, default_value = "3000")]
        pickup_tick_ms: u64,
        /// Milliseconds the freeze lasts
        #[clap(long, default_value = "2000")]
        freeze_ms: u64,
        /// Fixed RNG seed for pickup placement
        #[clap(long)]
        seed: Option<u64>,
    }

    let args = Args::parse();

    let map = server::map::load(&args.map)?;
    let config = EngineConfig {
        enemy_tick: Duration::from_millis(args.enemy_tick_ms),
        pickup_tick: Duration::from_millis(args.pickup_tick_ms),
        freeze_duration: Duration::from_millis(args.freeze_ms),
        portals: PortalPair::default(),
        seed: args.seed,
    };
    let engine = Engine::start(map, config);

    let address = format!("{}:{}", args.host, args.port);
    let gateway = Gateway::bind(&address).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let gateway_handle = tokio::spawn(gateway.serve(engine.clone(), shutdown_rx));

    // Handle shutdown gracefully
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }
    info!("Received Ctrl+C, shutting down gracefully...");

    shutdown_tx.send_replace(true);
    if let Err(e) = gateway_handle.await {
        error!("Gateway task panicked: {}", e);
    }
    engine.shutdown().await;

    Ok(())
}
