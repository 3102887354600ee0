//! Entity registry for the authoritative world
//!
//! Tracks where every movable entity currently stands:
//! - Registered players keyed by their client identity
//! - The single enemy and the single pickup
//! - The last command sequence number applied for each player
//!
//! The registry only records positions. Keeping the grid overlay in step
//! with these positions is the job of the game module.

use log::info;
use shared::{GameError, PlayerState, Position};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Positions of every movable entity in the world
///
/// Players are never removed once registered, so the player set only grows.
/// A `BTreeMap` keeps iteration in identity order, which makes anything that
/// scans all players deterministic.
#[derive(Debug, Clone)]
pub struct Registry {
    players: BTreeMap<String, PlayerState>,
    /// Current enemy cell
    pub enemy: Position,
    /// Current pickup cell
    pub pickup: Position,
}

impl Registry {
    /// Creates a registry with no players and the given AI start cells
    pub fn new(enemy: Position, pickup: Position) -> Self {
        Self {
            players: BTreeMap::new(),
            enemy,
            pickup,
        }
    }

    /// Adds a player at the given cell
    ///
    /// Fails with `AlreadyRegistered` when the identity is taken, leaving the
    /// existing record untouched.
    pub fn register(&mut self, id: &str, position: Position) -> Result<&PlayerState, GameError> {
        match self.players.entry(id.to_string()) {
            Entry::Occupied(_) => Err(GameError::AlreadyRegistered(id.to_string())),
            Entry::Vacant(slot) => {
                info!("Client {} registered at ({}, {})", id, position.x, position.y);
                Ok(slot.insert(PlayerState::new(id, position)))
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.contains_key(id)
    }

    /// Looks up a player, failing with `UnknownClient` for unregistered ids
    pub fn get(&self, id: &str) -> Result<&PlayerState, GameError> {
        self.players
            .get(id)
            .ok_or_else(|| GameError::UnknownClient(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Result<Position, GameError> {
        self.get(id).map(|player| player.position)
    }

    /// Updates a player's recorded cell. Unknown ids are ignored.
    pub fn move_player(&mut self, id: &str, to: Position) {
        if let Some(player) = self.players.get_mut(id) {
            player.position = to;
        }
    }

    /// Records a command sequence number for a player
    ///
    /// Returns `Ok(true)` when the number is newer than anything applied so
    /// far, `Ok(false)` for a stale or repeated number. Retried commands are
    /// therefore applied at most once.
    pub fn accept_sequence(&mut self, id: &str, sequence: u32) -> Result<bool, GameError> {
        let player = self
            .players
            .get_mut(id)
            .ok_or_else(|| GameError::UnknownClient(id.to_string()))?;

        if sequence <= player.last_sequence {
            return Ok(false);
        }
        player.last_sequence = sequence;
        Ok(true)
    }

    pub fn players(&self) -> &BTreeMap<String, PlayerState> {
        &self.players
    }

    /// Cells of all players in identity order
    pub fn player_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.players.values().map(|player| player.position)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
