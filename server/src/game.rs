use crate::chase::{self, ChaseStep};
use crate::map::GameMap;
use crate::pickup;
use crate::registry::Registry;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use shared::{
    Command, Direction, GameError, GameState, Grid, Marker, Occupant, PortalPair, Position,
    TileKind, WorldStatus, STATUS_FROZEN, STATUS_LOST, STATUS_WON,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// What a single command did to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved(Position),
    Teleported(Position),
    /// Wall, another player, or the edge of the map.
    Blocked,
    Finished(Outcome),
    /// The freeze is active; the caller owns the thaw timer.
    FreezeStarted,
    /// Stale sequence number, spent interaction, or a finished game.
    Ignored,
}

/// What a background tick did to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Frozen,
    Moved(Position),
    Caught,
    NoFreeCell,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FreezeCharge {
    Ready,
    Active,
    Spent,
}

/// The authoritative world: grid overlay, entity positions and status.
///
/// Every method runs to completion without suspending, so a caller holding
/// the engine lock sees each call as one atomic step.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    registry: Registry,
    status: WorldStatus,
    spawn: Position,
    portals: PortalPair,
    freeze: FreezeCharge,
    rng: StdRng,
}

impl World {
    pub fn new(map: GameMap, portals: PortalPair, rng: StdRng) -> Self {
        let mut grid = map.grid;
        grid.place(map.enemy, Marker::Enemy);
        grid.place(map.pickup, Marker::Pickup);

        Self {
            grid,
            registry: Registry::new(map.enemy, map.pickup),
            status: WorldStatus::default(),
            spawn: map.spawn,
            portals,
            freeze: FreezeCharge::Ready,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> &WorldStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.running
    }

    pub fn is_frozen(&self) -> bool {
        self.status.frozen
    }

    pub fn enemy(&self) -> Position {
        self.registry.enemy
    }

    pub fn pickup(&self) -> Position {
        self.registry.pickup
    }

    pub fn player_position(&self, id: &str) -> Result<Position, GameError> {
        self.registry.position(id)
    }

    pub fn player_count(&self) -> usize {
        self.registry.len()
    }

    /// Deep copy of the whole world.
    pub fn snapshot(&self) -> GameState {
        GameState {
            grid: self.grid.clone(),
            players: self.registry.players().clone(),
            enemy: self.registry.enemy,
            pickup: self.registry.pickup,
            status: self.status.clone(),
        }
    }

    /// Snapshot on behalf of a client, which must be registered.
    pub fn snapshot_for(&self, id: &str) -> Result<GameState, GameError> {
        self.registry.get(id)?;
        Ok(self.snapshot())
    }

    pub fn register_player(&mut self, id: &str) -> Result<GameState, GameError> {
        if self.registry.contains(id) {
            warn!("Rejected duplicate registration for {}", id);
            return Err(GameError::AlreadyRegistered(id.to_string()));
        }

        let cell = self
            .spawn_cell()
            .ok_or_else(|| GameError::SpawnUnavailable(id.to_string()))?;
        self.registry.register(id, cell)?;
        self.grid.place(cell, Marker::Player);

        Ok(self.snapshot())
    }

    /// The configured spawn cell, or the closest free cell when it is taken.
    fn spawn_cell(&self) -> Option<Position> {
        if self.grid.is_passable(self.spawn) {
            return Some(self.spawn);
        }
        self.grid
            .cells()
            .filter(|cell| self.grid.is_passable(*cell))
            .min_by_key(|cell| cell.manhattan(self.spawn))
    }

    pub fn apply_command(
        &mut self,
        id: &str,
        sequence: u32,
        command: Command,
    ) -> Result<CommandOutcome, GameError> {
        if !self.registry.accept_sequence(id, sequence)? {
            debug!("Dropped stale command {} from {}", sequence, id);
            return Ok(CommandOutcome::Ignored);
        }

        if !self.status.running {
            return Ok(CommandOutcome::Ignored);
        }

        match command {
            Command::Move(direction) => self.move_player(id, direction),
            Command::Interact => Ok(self.begin_freeze()),
        }
    }

    fn move_player(&mut self, id: &str, direction: Direction) -> Result<CommandOutcome, GameError> {
        let from = self.registry.position(id)?;
        let (dx, dy) = direction.delta();
        let target = from.offset(dx, dy);

        let outcome = match self.grid.occupant(target) {
            None => CommandOutcome::Blocked,
            Some(Occupant::Tile(tile)) if !tile.tangible => {
                self.step_player(id, from, target);
                CommandOutcome::Moved(target)
            }
            Some(Occupant::Marker(Marker::Enemy)) => CommandOutcome::Finished(self.finish(Outcome::Lost)),
            Some(Occupant::Marker(Marker::Pickup)) => CommandOutcome::Finished(self.finish(Outcome::Won)),
            Some(Occupant::Marker(Marker::Player)) => CommandOutcome::Blocked,
            Some(Occupant::Tile(tile)) if tile.kind == TileKind::Portal => {
                self.teleport(id, from, target)
            }
            Some(Occupant::Tile(_)) => CommandOutcome::Blocked,
        };

        Ok(outcome)
    }

    fn teleport(&mut self, id: &str, from: Position, portal: Position) -> CommandOutcome {
        let destination = self.portals.destination(portal);
        if destination == portal {
            return CommandOutcome::Blocked;
        }

        // The landing cell counts as passable whatever its tile; only another
        // entity standing there changes the result.
        match self.grid.occupant(destination) {
            None => CommandOutcome::Blocked,
            Some(Occupant::Marker(Marker::Enemy)) => CommandOutcome::Finished(self.finish(Outcome::Lost)),
            Some(Occupant::Marker(Marker::Pickup)) => CommandOutcome::Finished(self.finish(Outcome::Won)),
            Some(Occupant::Marker(Marker::Player)) => CommandOutcome::Blocked,
            Some(Occupant::Tile(_)) => {
                debug!(
                    "{} teleported ({}, {}) -> ({}, {})",
                    id, portal.x, portal.y, destination.x, destination.y
                );
                self.step_player(id, from, destination);
                CommandOutcome::Teleported(destination)
            }
        }
    }

    fn step_player(&mut self, id: &str, from: Position, to: Position) {
        self.grid.relocate(from, to, Marker::Player);
        self.registry.move_player(id, to);
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.status.running = false;
        self.status.status_message = match outcome {
            Outcome::Won => STATUS_WON,
            Outcome::Lost => STATUS_LOST,
        }
        .to_string();
        info!("Game over: {:?}", outcome);
        outcome
    }

    fn begin_freeze(&mut self) -> CommandOutcome {
        if self.freeze != FreezeCharge::Ready {
            return CommandOutcome::Ignored;
        }

        self.freeze = FreezeCharge::Active;
        self.status.frozen = true;
        self.status.status_message = STATUS_FROZEN.to_string();
        info!("World frozen");
        CommandOutcome::FreezeStarted
    }

    /// Ends an active freeze. Returns false when no freeze was active.
    pub fn end_freeze(&mut self) -> bool {
        if self.freeze != FreezeCharge::Active {
            return false;
        }

        self.freeze = FreezeCharge::Spent;
        self.status.frozen = false;
        if self.status.running {
            self.status.status_message.clear();
        }
        info!("World thawed");
        true
    }

    /// One enemy chase tick.
    pub fn step_enemy(&mut self) -> TickOutcome {
        if !self.status.running {
            return TickOutcome::Over;
        }
        if self.status.frozen {
            return TickOutcome::Frozen;
        }

        let enemy = self.registry.enemy;
        let target = chase::nearest_target(enemy, self.registry.player_positions());
        match chase::plan_step(&self.grid, enemy, target) {
            ChaseStep::Caught(cell) => {
                debug!("Enemy caught a player at ({}, {})", cell.x, cell.y);
                self.finish(Outcome::Lost);
                TickOutcome::Caught
            }
            ChaseStep::Move(next) => {
                if next != enemy {
                    self.grid.relocate(enemy, next, Marker::Enemy);
                    self.registry.enemy = next;
                }
                TickOutcome::Moved(next)
            }
        }
    }

    /// One pickup relocation tick.
    pub fn relocate_pickup(&mut self) -> TickOutcome {
        if !self.status.running {
            return TickOutcome::Over;
        }
        if self.status.frozen {
            return TickOutcome::Frozen;
        }

        match pickup::sample_passable(&self.grid, &mut self.rng) {
            Some(cell) => {
                self.grid.relocate(self.registry.pickup, cell, Marker::Pickup);
                self.registry.pickup = cell;
                TickOutcome::Moved(cell)
            }
            None => {
                warn!("No free cell for the pickup; leaving it in place");
                TickOutcome::NoFreeCell
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::map;
    use rand::SeedableRng;
    use shared::{Tile, PORTAL_A, PORTAL_B};

    pub(crate) fn world_from(source: &str) -> World {
        world_with_portals(source, PortalPair::default())
    }

    pub(crate) fn world_with_portals(source: &str, portals: PortalPair) -> World {
        let map = map::parse(source).unwrap();
        World::new(map, portals, StdRng::seed_from_u64(11))
    }

    /// 80x30 open field with the reference portals on the border.
    fn reference_field(spawn: Position) -> String {
        let mut rows = vec![vec![' '; 80]; 30];
        rows[PORTAL_A.y as usize][PORTAL_A.x as usize] = '0';
        rows[PORTAL_B.y as usize][PORTAL_B.x as usize] = '0';
        rows[spawn.y as usize][spawn.x as usize] = '☻';
        rows[15][40] = 'Ω';
        rows[20][60] = '•';
        rows.iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    const ROOM: &str = "\
███████
█☻    █
█  █  █
█    Ω█
█•    █
███████";

    fn mv(world: &mut World, id: &str, seq: u32, direction: Direction) -> CommandOutcome {
        world.apply_command(id, seq, Command::Move(direction)).unwrap()
    }

    #[test]
    fn test_new_world_places_markers() {
        let world = world_from(ROOM);
        assert_eq!(world.grid().marker(world.enemy()), Some(Marker::Enemy));
        assert_eq!(world.grid().marker(world.pickup()), Some(Marker::Pickup));
        assert!(world.is_running());
        assert!(!world.is_frozen());
    }

    #[test]
    fn test_register_places_player_at_spawn() {
        let mut world = world_from(ROOM);
        let state = world.register_player("alice").unwrap();

        let alice = state.player("alice").unwrap();
        assert_eq!(alice.position, Position::new(1, 1));
        assert_eq!(state.grid.marker(Position::new(1, 1)), Some(Marker::Player));
        assert!(state.status.running);
    }

    #[test]
    fn test_duplicate_registration_fails_and_keeps_state() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();
        mv(&mut world, "alice", 1, Direction::Right);
        let before = world.snapshot();

        let err = world.register_player("alice").unwrap_err();
        assert_eq!(err, GameError::AlreadyRegistered("alice".to_string()));
        assert_eq!(world.snapshot(), before);
    }

    #[test]
    fn test_second_player_spawns_next_to_first() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();
        world.register_player("bob").unwrap();

        let bob = world.player_position("bob").unwrap();
        assert_eq!(bob.manhattan(Position::new(1, 1)), 1);
        assert_eq!(world.grid().marker(bob), Some(Marker::Player));
        assert_eq!(world.player_count(), 2);
    }

    #[test]
    fn test_spawn_unavailable_on_full_map() {
        let mut world = world_from("Ω•");
        assert_eq!(
            world.register_player("alice"),
            Err(GameError::SpawnUnavailable("alice".to_string()))
        );
        assert_eq!(world.player_count(), 0);
    }

    #[test]
    fn test_unknown_client_command_fails() {
        let mut world = world_from(ROOM);
        assert_eq!(
            world.apply_command("ghost", 1, Command::Move(Direction::Up)),
            Err(GameError::UnknownClient("ghost".to_string()))
        );
        assert_eq!(
            world.snapshot_for("ghost"),
            Err(GameError::UnknownClient("ghost".to_string()))
        );
    }

    #[test]
    fn test_free_moves_sum_deltas() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();

        let moves = [
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
        ];
        let mut expected = Position::new(1, 1);
        for (seq, direction) in moves.iter().enumerate() {
            let (dx, dy) = direction.delta();
            expected = expected.offset(dx, dy);
            assert_eq!(
                mv(&mut world, "alice", seq as u32 + 1, *direction),
                CommandOutcome::Moved(expected)
            );
        }

        assert_eq!(world.player_position("alice"), Ok(expected));
        assert_eq!(world.grid().marker(expected), Some(Marker::Player));
        assert_eq!(world.grid().marker(Position::new(1, 1)), None);
    }

    #[test]
    fn test_out_of_bounds_move_is_noop() {
        let mut world = world_from("☻  \n Ω•");
        world.register_player("alice").unwrap();
        let before = world.snapshot();

        assert_eq!(mv(&mut world, "alice", 1, Direction::Up), CommandOutcome::Blocked);
        assert_eq!(mv(&mut world, "alice", 2, Direction::Left), CommandOutcome::Blocked);

        let after = world.snapshot();
        assert_eq!(after.grid, before.grid);
        assert_eq!(after.player("alice").unwrap().position, Position::new(0, 0));
    }

    #[test]
    fn test_wall_blocks_movement() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();

        assert_eq!(mv(&mut world, "alice", 1, Direction::Left), CommandOutcome::Blocked);
        assert_eq!(world.player_position("alice"), Ok(Position::new(1, 1)));
        assert_eq!(world.grid().tile(Position::new(0, 1)), Some(Tile::WALL));
    }

    #[test]
    fn test_players_block_each_other() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();
        world.register_player("bob").unwrap();
        let bob = world.player_position("bob").unwrap();

        let direction = if bob == Position::new(2, 1) {
            Direction::Right
        } else {
            Direction::Down
        };
        assert_eq!(mv(&mut world, "alice", 1, direction), CommandOutcome::Blocked);
        assert_eq!(world.player_position("bob"), Ok(bob));
    }

    #[test]
    fn test_moving_onto_enemy_loses() {
        let mut world = world_from("☻Ω •");
        world.register_player("alice").unwrap();

        assert_eq!(
            mv(&mut world, "alice", 1, Direction::Right),
            CommandOutcome::Finished(Outcome::Lost)
        );
        assert!(!world.is_running());
        assert_eq!(world.status().status_message, STATUS_LOST);
    }

    #[test]
    fn test_moving_onto_enemy_loses_while_frozen() {
        let mut world = world_from("☻Ω •");
        world.register_player("alice").unwrap();
        world.apply_command("alice", 1, Command::Interact).unwrap();
        assert!(world.is_frozen());

        assert_eq!(
            mv(&mut world, "alice", 2, Direction::Right),
            CommandOutcome::Finished(Outcome::Lost)
        );
        assert!(!world.is_running());
        assert_eq!(world.status().status_message, STATUS_LOST);
    }

    #[test]
    fn test_moving_onto_pickup_wins() {
        let mut world = world_from("☻• Ω");
        world.register_player("alice").unwrap();

        assert_eq!(
            mv(&mut world, "alice", 1, Direction::Right),
            CommandOutcome::Finished(Outcome::Won)
        );
        assert!(!world.is_running());
        assert_eq!(world.status().status_message, STATUS_WON);
    }

    #[test]
    fn test_terminated_world_ignores_commands() {
        let mut world = world_from("☻• Ω\n    ");
        world.register_player("alice").unwrap();
        mv(&mut world, "alice", 1, Direction::Right);
        let before = world.snapshot();

        assert_eq!(mv(&mut world, "alice", 2, Direction::Down), CommandOutcome::Ignored);
        assert_eq!(
            world.apply_command("alice", 3, Command::Interact),
            Ok(CommandOutcome::Ignored)
        );
        assert_eq!(world.step_enemy(), TickOutcome::Over);
        assert_eq!(world.relocate_pickup(), TickOutcome::Over);

        let after = world.snapshot();
        assert_eq!(after.grid, before.grid);
        assert_eq!(after.status, before.status);
        assert_eq!(after.enemy, before.enemy);
        assert_eq!(after.pickup, before.pickup);
    }

    #[test]
    fn test_stale_sequence_is_ignored() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();

        assert_eq!(mv(&mut world, "alice", 5, Direction::Right), CommandOutcome::Moved(Position::new(2, 1)));
        assert_eq!(mv(&mut world, "alice", 5, Direction::Right), CommandOutcome::Ignored);
        assert_eq!(mv(&mut world, "alice", 4, Direction::Right), CommandOutcome::Ignored);
        assert_eq!(world.player_position("alice"), Ok(Position::new(2, 1)));
        assert_eq!(world.snapshot().player("alice").unwrap().last_sequence, 5);
    }

    #[test]
    fn test_reference_portals_round_trip() {
        let mut world = world_from(&reference_field(Position::new(78, 2)));
        world.register_player("alice").unwrap();

        assert_eq!(
            mv(&mut world, "alice", 1, Direction::Right),
            CommandOutcome::Teleported(Position::new(1, 28))
        );
        assert_eq!(world.grid().marker(Position::new(78, 2)), None);
        assert_eq!(world.grid().marker(Position::new(1, 28)), Some(Marker::Player));

        assert_eq!(
            mv(&mut world, "alice", 2, Direction::Left),
            CommandOutcome::Teleported(Position::new(78, 2))
        );
        assert_ne!(world.player_position("alice"), Ok(PORTAL_A));
        assert_eq!(world.grid().tile(PORTAL_A), Some(Tile::PORTAL));
    }

    #[test]
    fn test_teleport_onto_wall_is_allowed() {
        let portals = PortalPair {
            a: Position::new(1, 0),
            b: Position::new(3, 0),
        };
        let mut world = world_with_portals("☻0 0█\nΩ•   ", portals);
        world.register_player("alice").unwrap();

        assert_eq!(
            mv(&mut world, "alice", 1, Direction::Right),
            CommandOutcome::Teleported(Position::new(4, 0))
        );
        assert_eq!(world.grid().tile(Position::new(4, 0)), Some(Tile::WALL));
    }

    #[test]
    fn test_teleport_onto_enemy_loses() {
        let portals = PortalPair {
            a: Position::new(1, 0),
            b: Position::new(4, 0),
        };
        let mut world = world_with_portals("☻0  0Ω•", portals);
        world.register_player("alice").unwrap();

        assert_eq!(
            mv(&mut world, "alice", 1, Direction::Right),
            CommandOutcome::Finished(Outcome::Lost)
        );
        assert_eq!(world.player_position("alice"), Ok(Position::new(0, 0)));
    }

    #[test]
    fn test_unlinked_portal_is_passthrough_noop() {
        let mut world = world_from("☻0 Ω•");
        world.register_player("alice").unwrap();
        let before = world.snapshot();

        assert_eq!(mv(&mut world, "alice", 1, Direction::Right), CommandOutcome::Blocked);
        assert_eq!(world.snapshot().grid, before.grid);
    }

    #[test]
    fn test_interact_is_one_shot() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();
        world.register_player("bob").unwrap();

        assert_eq!(
            world.apply_command("alice", 1, Command::Interact),
            Ok(CommandOutcome::FreezeStarted)
        );
        assert!(world.is_frozen());
        assert_eq!(world.status().status_message, STATUS_FROZEN);

        assert_eq!(
            world.apply_command("bob", 1, Command::Interact),
            Ok(CommandOutcome::Ignored)
        );

        assert!(world.end_freeze());
        assert!(!world.is_frozen());
        assert!(world.status().status_message.is_empty());
        assert!(!world.end_freeze());

        assert_eq!(
            world.apply_command("alice", 2, Command::Interact),
            Ok(CommandOutcome::Ignored)
        );
        assert!(!world.is_frozen());
    }

    #[test]
    fn test_freeze_gates_background_ticks() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();
        world.apply_command("alice", 1, Command::Interact).unwrap();

        let enemy = world.enemy();
        let pickup = world.pickup();
        for _ in 0..10 {
            assert_eq!(world.step_enemy(), TickOutcome::Frozen);
            assert_eq!(world.relocate_pickup(), TickOutcome::Frozen);
        }
        assert_eq!(world.enemy(), enemy);
        assert_eq!(world.pickup(), pickup);

        world.end_freeze();
        assert!(matches!(world.step_enemy(), TickOutcome::Moved(next) if next != enemy));
        assert!(matches!(world.relocate_pickup(), TickOutcome::Moved(next) if next != pickup));
    }

    #[test]
    fn test_players_move_while_frozen() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();
        world.apply_command("alice", 1, Command::Interact).unwrap();

        assert_eq!(
            mv(&mut world, "alice", 2, Direction::Right),
            CommandOutcome::Moved(Position::new(2, 1))
        );
    }

    #[test]
    fn test_thaw_after_game_over_keeps_outcome() {
        let mut world = world_from("☻• Ω");
        world.register_player("alice").unwrap();
        world.apply_command("alice", 1, Command::Interact).unwrap();
        mv(&mut world, "alice", 2, Direction::Right);

        assert!(world.end_freeze());
        assert!(!world.is_frozen());
        assert_eq!(world.status().status_message, STATUS_WON);
    }

    #[test]
    fn test_enemy_steps_towards_player() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();

        assert_eq!(world.step_enemy(), TickOutcome::Moved(Position::new(4, 2)));
        assert_eq!(world.grid().marker(Position::new(5, 3)), None);
        assert_eq!(world.grid().marker(Position::new(4, 2)), Some(Marker::Enemy));
    }

    #[test]
    fn test_enemy_without_players_stays() {
        let mut world = world_from(ROOM);
        let enemy = world.enemy();
        assert_eq!(world.step_enemy(), TickOutcome::Moved(enemy));
    }

    #[test]
    fn test_enemy_chases_nearest_player() {
        let mut world = world_from("☻\n\n         Ω\n\n         •");
        world.register_player("far").unwrap();
        world.register_player("near").unwrap();
        let near = world.player_position("near").unwrap();
        let far = world.player_position("far").unwrap();
        assert_eq!(near, Position::new(0, 2));
        assert!(near.manhattan(world.enemy()) < far.manhattan(world.enemy()));

        assert_eq!(world.step_enemy(), TickOutcome::Moved(Position::new(8, 2)));
    }

    #[test]
    fn test_enemy_catching_player_loses() {
        let mut world = world_from("☻Ω\n •");
        world.register_player("alice").unwrap();
        let enemy = world.enemy();

        assert_eq!(world.step_enemy(), TickOutcome::Caught);
        assert!(!world.is_running());
        assert_eq!(world.status().status_message, STATUS_LOST);
        assert_eq!(world.enemy(), enemy);
        assert_eq!(world.step_enemy(), TickOutcome::Over);
    }

    #[test]
    fn test_pickup_relocates_to_passable_cell() {
        let mut world = world_from(ROOM);
        world.register_player("alice").unwrap();

        for _ in 0..50 {
            let old = world.pickup();
            match world.relocate_pickup() {
                TickOutcome::Moved(cell) => {
                    assert_ne!(cell, old);
                    assert_eq!(world.grid().marker(old), None);
                    assert_eq!(world.grid().marker(cell), Some(Marker::Pickup));
                    assert_eq!(world.grid().tile(cell), Some(Tile::EMPTY));
                }
                other => panic!("Unexpected tick outcome: {:?}", other),
            }
        }
    }

    #[test]
    fn test_pickup_without_free_cell_stays() {
        let mut world = world_from("Ω•█");
        let pickup = world.pickup();
        assert_eq!(world.relocate_pickup(), TickOutcome::NoFreeCell);
        assert_eq!(world.pickup(), pickup);
        assert_eq!(world.grid().marker(pickup), Some(Marker::Pickup));
    }
}
