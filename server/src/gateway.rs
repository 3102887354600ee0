//! Server network layer exposing the engine over TCP
//!
//! Each accepted connection gets its own task. A connection carries a
//! sequence of request frames, each answered by exactly one response frame
//! before the next request is read. Requests from different connections
//! interleave freely; the engine lock orders them.

use crate::engine::Engine;
use log::{debug, error, info, warn};
use shared::wire::{read_frame, write_frame, TransportError};
use shared::Packet;
use std::io;
use std::net::SocketAddr;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;

/// Listening endpoint for game clients
pub struct Gateway {
    listener: TcpListener,
}

impl Gateway {
    pub async fn bind(addr: &str) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Gateway listening on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    /// Address actually bound, useful when binding to port 0
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the shutdown flag flips to `true`
    pub async fn serve(self, engine: Engine, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Gateway shutting down");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => {
                            let engine = engine.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, addr, engine).await {
                                    warn!("Connection {} closed: {}", addr, e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Error accepting connection: {}", e);
                        }
                    }
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    addr: SocketAddr,
    engine: Engine,
) -> Result<(), TransportError> {
    debug!("Client connected from {}", addr);
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);

    while let Some(request) = read_frame::<_, Packet>(&mut reader).await? {
        let response = handle_packet(&engine, request).await.ok_or_else(|| {
            TransportError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "response packet sent as a request",
            ))
        })?;
        write_frame(&mut writer, &response).await?;
    }

    debug!("Client {} disconnected", addr);
    Ok(())
}

/// Executes one request against the engine and builds its response
///
/// Returns `None` for packets that are only valid as responses.
pub async fn handle_packet(engine: &Engine, packet: Packet) -> Option<Packet> {
    let response = match packet {
        Packet::Register { client_id } => match engine.register_player(&client_id).await {
            Ok(state) => Packet::Registered { state },
            Err(error) => Packet::Rejected { error },
        },

        Packet::Command {
            client_id,
            sequence,
            command,
        } => match engine.apply_command(&client_id, sequence, command).await {
            Ok(outcome) => {
                debug!("{} #{} {:?} -> {:?}", client_id, sequence, command, outcome);
                Packet::CommandAccepted
            }
            Err(error) => Packet::Rejected { error },
        },

        Packet::StateQuery { client_id } => match engine.snapshot_for(&client_id).await {
            Ok(state) => Packet::State { state },
            Err(error) => Packet::Rejected { error },
        },

        Packet::Registered { .. }
        | Packet::CommandAccepted
        | Packet::State { .. }
        | Packet::Rejected { .. } => return None,
    };
    Some(response)
}
