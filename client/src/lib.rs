//! # Grid Chase Client Library
//!
//! This library provides the client side of the grid chase game: a thin
//! RPC client, keyboard input mapping and a grid renderer. The client holds
//! no game logic of its own. It sends commands, polls the server for the
//! authoritative world and draws whatever comes back.
//!
//! ## Architecture Overview
//!
//! The binary runs two halves side by side:
//! - The macroquad frame loop samples the keyboard and draws the latest
//!   snapshot once per frame
//! - A network session on a tokio runtime forwards commands and polls the
//!   server for fresh state
//!
//! Commands travel to the session over an unbounded mpsc channel; snapshots
//! travel back over a `watch` channel, so the frame loop always sees the
//! most recent state without waiting on the network.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! Request/response client over length-prefixed bincode frames:
//! - Registration under a client identity
//! - Commands numbered with a per-client increasing sequence
//! - State queries returning full world snapshots
//! - Typed errors for transport failures and server rejections
//!
//! ### Input Module (`input`)
//! Maps WASD, the arrow keys and E to game commands, one command per key
//! press, and reports Esc as a quit request.
//!
//! ### Rendering Module (`rendering`)
//! Draws one square per cell with the status message and a help line under
//! the grid, highlighting the local player.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::GameClient;
//! use shared::{Command, Direction};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = GameClient::connect("127.0.0.1:1234", "client1").await?;
//!     client.register().await?;
//!
//!     client.send_command(Command::Move(Direction::Right)).await?;
//!     let state = client.get_game_state().await?;
//!     println!("{}", state.status.status_message);
//!     Ok(())
//! }
//! ```

pub mod input;
pub mod network;
pub mod rendering;
