use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub mod grid;
pub mod wire;

pub use grid::{Grid, Marker, Occupant, Tile, TileKind};

pub const DEFAULT_PORT: u16 = 1234;
pub const ENEMY_TICK: Duration = Duration::from_millis(800);
pub const PICKUP_TICK: Duration = Duration::from_millis(3000);
pub const FREEZE_DURATION: Duration = Duration::from_millis(2000);

/// Spawn cell used when the map carries no spawn glyph.
pub const DEFAULT_SPAWN: Position = Position { x: 4, y: 12 };

/// Portal endpoints of the reference map.
pub const PORTAL_A: Position = Position { x: 79, y: 2 };
pub const PORTAL_B: Position = Position { x: 0, y: 28 };

pub const STATUS_WON: &str = "Congratulations! You won the game :)";
pub const STATUS_LOST: &str = "You lost the game :(";
pub const STATUS_FROZEN: &str = "You froze everyone!";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid coordinates; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Interact,
}

/// Pair of linked portal endpoints.
///
/// Entering `a` lands one cell to the right of `b`; entering `b` lands one
/// cell to the left of `a`. Any other coordinate passes through unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PortalPair {
    pub a: Position,
    pub b: Position,
}

impl PortalPair {
    pub fn destination(&self, entered: Position) -> Position {
        if entered == self.a {
            self.b.offset(1, 0)
        } else if entered == self.b {
            self.a.offset(-1, 0)
        } else {
            entered
        }
    }
}

impl Default for PortalPair {
    fn default() -> Self {
        Self {
            a: PORTAL_A,
            b: PORTAL_B,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub id: String,
    pub position: Position,
    /// Highest command sequence number applied for this client
    pub last_sequence: u32,
}

impl PlayerState {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            last_sequence: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WorldStatus {
    pub running: bool,
    pub status_message: String,
    pub frozen: bool,
}

impl Default for WorldStatus {
    fn default() -> Self {
        Self {
            running: true,
            status_message: String::new(),
            frozen: false,
        }
    }
}

/// Point-in-time copy of the whole world as handed to readers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameState {
    pub grid: Grid,
    pub players: BTreeMap<String, PlayerState>,
    pub enemy: Position,
    pub pickup: Position,
    pub status: WorldStatus,
}

impl GameState {
    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.get(id)
    }
}

/// Failures returned to a remote caller; they never take the server down.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("client {0} already registered")]
    AlreadyRegistered(String),

    #[error("client {0} not registered")]
    UnknownClient(String),

    #[error("no free cell to spawn client {0}")]
    SpawnUnavailable(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Packet {
    Register {
        client_id: String,
    },
    Command {
        client_id: String,
        sequence: u32,
        command: Command,
    },
    StateQuery {
        client_id: String,
    },

    Registered {
        state: GameState,
    },
    CommandAccepted,
    State {
        state: GameState,
    },
    Rejected {
        error: GameError,
    },
}
