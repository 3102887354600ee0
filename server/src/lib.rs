//! # Grid Chase Server Library
//!
//! This library provides the authoritative server for the grid chase game.
//! It owns the only copy of the world, applies client commands to it, and
//! drives the enemy and the pickup on their own timers.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative World
//! The server holds the map, every entity position and the game status.
//! Clients never move anything themselves; they send commands and read back
//! snapshots of whatever the server decided.
//!
//! ### Autonomous Actors
//! Two background loops run alongside request handling:
//! - The enemy steps one cell towards the nearest player on every enemy tick
//! - The pickup jumps to a random free cell on every pickup tick
//!
//! Both loops pause while the world is frozen and stop for good once the
//! game has been won or lost.
//!
//! ### Command Gateway
//! Clients talk to the server over TCP using length-prefixed bincode frames.
//! Every request is answered by exactly one response: a snapshot, a plain
//! acknowledgement, or a typed rejection.
//!
//! ## Architecture Design
//!
//! ### Single Lock Discipline
//! All world state sits behind one `tokio::sync::Mutex`. Request handlers,
//! both loops and the freeze timer lock it for one world call and release it
//! before awaiting anything else. Every observable state is therefore the
//! result of a total order of atomic operations, and snapshots are always
//! internally consistent.
//!
//! ### Grid Overlay
//! The grid keeps static tiles and dynamic markers in separate layers, so an
//! entity leaving a cell always reveals the tile that was there before.
//!
//! ## Module Organization
//!
//! ### Map Module (`map`)
//! Parses map text files into a grid plus the starting cells of the enemy,
//! the pickup and the player spawn.
//!
//! ### Registry Module (`registry`)
//! Records where every player, the enemy and the pickup stand, and tracks
//! the last command sequence number applied per player.
//!
//! ### Chase and Pickup Modules (`chase`, `pickup`)
//! Pure policies for the enemy step and the pickup relocation target.
//!
//! ### Game Module (`game`)
//! The world state machine: movement, collisions, teleports, the one-shot
//! freeze and the terminal outcomes.
//!
//! ### Engine Module (`engine`)
//! Wraps the world in the shared lock and runs the background loops and the
//! freeze timer.
//!
//! ### Gateway Module (`gateway`)
//! Accepts TCP connections and maps request packets onto engine calls.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::engine::{Engine, EngineConfig};
//! use server::gateway::Gateway;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let map = server::map::load("maps/default.txt")?;
//!     let engine = Engine::start(map, EngineConfig::default());
//!
//!     let gateway = Gateway::bind("127.0.0.1:1234").await?;
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!
//!     // Runs until the shutdown flag is set
//!     gateway.serve(engine.clone(), shutdown_rx).await;
//!     engine.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod chase;
pub mod engine;
pub mod game;
pub mod gateway;
pub mod map;
pub mod pickup;
pub mod registry;
