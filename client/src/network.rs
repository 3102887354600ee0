//! RPC client for the game server

use log::{debug, error, info, warn};
use shared::wire::{read_frame, write_frame, TransportError};
use shared::{Command, GameError, GameState, Packet};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("request rejected: {0}")]
    Rejected(GameError),

    #[error("unexpected reply from server: {0}")]
    UnexpectedPacket(String),
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Transport(TransportError::Io(e))
    }
}

/// One client's connection to the server
///
/// Requests are strictly sequential: each call writes one frame and waits
/// for its reply before returning.
pub struct GameClient {
    stream: TcpStream,
    client_id: String,
    next_sequence: u32,
}

impl GameClient {
    pub async fn connect(addr: &str, client_id: impl Into<String>) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let client_id = client_id.into();
        info!("Connected to {} as {}", addr, client_id);

        Ok(Self {
            stream,
            client_id,
            next_sequence: 1,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub async fn register(&mut self) -> Result<GameState, ClientError> {
        let packet = Packet::Register {
            client_id: self.client_id.clone(),
        };
        match self.request(packet).await? {
            Packet::Registered { state } => Ok(state),
            other => Err(unexpected(other)),
        }
    }

    /// Sends a command under the next sequence number
    pub async fn send_command(&mut self, command: Command) -> Result<(), ClientError> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let packet = Packet::Command {
            client_id: self.client_id.clone(),
            sequence,
            command,
        };
        match self.request(packet).await? {
            Packet::CommandAccepted => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn get_game_state(&mut self) -> Result<GameState, ClientError> {
        let packet = Packet::StateQuery {
            client_id: self.client_id.clone(),
        };
        match self.request(packet).await? {
            Packet::State { state } => Ok(state),
            other => Err(unexpected(other)),
        }
    }

    async fn request(&mut self, packet: Packet) -> Result<Packet, ClientError> {
        write_frame(&mut self.stream, &packet).await?;

        match read_frame(&mut self.stream).await? {
            Some(Packet::Rejected { error }) => Err(ClientError::Rejected(error)),
            Some(reply) => Ok(reply),
            None => Err(TransportError::Closed.into()),
        }
    }
}

fn unexpected(packet: Packet) -> ClientError {
    ClientError::UnexpectedPacket(format!("{:?}", packet))
}

/// Drives a registered client from the frame loop
///
/// Forwards every queued command and publishes the latest snapshot after
/// each command and on every poll tick. Returns when the command channel
/// closes or the connection fails.
pub async fn run_session(
    mut client: GameClient,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<Option<GameState>>,
    poll: Duration,
) {
    let mut poll_timer = interval(poll);
    poll_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("Command channel closed");
                    break;
                };
                if let Err(e) = client.send_command(command).await {
                    error!("Error sending command: {}", e);
                    break;
                }
            }
            _ = poll_timer.tick() => {}
        }

        match client.get_game_state().await {
            Ok(state) => {
                snapshots.send_replace(Some(state));
            }
            Err(e) => {
                warn!("Error fetching game state: {}", e);
                break;
            }
        }
    }
}
