use clap::Parser;
use client::input::InputManager;
use client::network::{run_session, ClientError, GameClient};
use client::rendering::Renderer;
use log::{error, info, warn};
use macroquad::prelude::*;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:1234")]
    server: String,

    /// Client identity to register under
    #[arg(short = 'i', long, default_value = "client1")]
    id: String,

    /// Milliseconds between state polls
    #[arg(short = 'p', long, default_value = "100")]
    poll_ms: u64,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Grid Chase".to_owned(),
        window_width: 816,
        window_height: 372,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("Client error: {}", e);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Networking runs on its own runtime beside the macroquad frame loop
    let runtime = Runtime::new()?;

    info!("Connecting to: {}", args.server);
    let (client, initial) = runtime.block_on(async {
        let mut client = GameClient::connect(&args.server, args.id.clone()).await?;
        let state = client.register().await?;
        Ok::<_, ClientError>((client, state))
    })?;
    info!("Registered as {}", client.client_id());
    info!("Controls: WASD/arrows to move, E to freeze, Esc to quit");

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(Some(initial));
    runtime.spawn(run_session(
        client,
        command_rx,
        snapshot_tx,
        Duration::from_millis(args.poll_ms),
    ));

    let mut input = InputManager::new();
    let renderer = Renderer::new(args.id);

    loop {
        let frame = input.update();
        if frame.quit {
            break;
        }

        let state = snapshot_rx.borrow().clone();
        let running = state.as_ref().map_or(true, |state| state.status.running);

        // Input stops once the game is over
        if running {
            for command in frame.commands {
                if command_tx.send(command).is_err() {
                    warn!("Network session ended");
                    break;
                }
            }
        }

        renderer.render(state.as_ref());
        next_frame().await;
    }

    drop(command_tx);
    runtime.shutdown_timeout(Duration::from_millis(500));
    Ok(())
}
