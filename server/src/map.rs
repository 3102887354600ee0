//! Map file loading.
//!
//! One line per row; the character index is the x coordinate. Entity glyphs
//! record a starting cell and leave empty floor underneath.

use log::info;
use shared::{Grid, Marker, Position, Tile, DEFAULT_SPAWN};
use std::path::Path;

const WALL: char = '█';
const PORTAL: char = '0';

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("map source has no rows")]
    Empty,

    #[error("unsupported glyph {glyph:?} at ({x}, {y})")]
    InvalidGlyph { glyph: char, x: usize, y: usize },

    #[error("{what} appears more than once (second at ({x}, {y}))")]
    Duplicate { what: &'static str, x: usize, y: usize },

    #[error("map has no {0} glyph")]
    Missing(&'static str),
}

/// Loaded map: the static grid plus the starting cells found in it.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub grid: Grid,
    pub enemy: Position,
    pub pickup: Position,
    pub spawn: Position,
}

pub fn load(path: impl AsRef<Path>) -> Result<GameMap, MapError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let map = parse(&source)?;
    info!(
        "Loaded map {} ({}x{})",
        path.display(),
        map.grid.width(),
        map.grid.height()
    );
    Ok(map)
}

pub fn parse(source: &str) -> Result<GameMap, MapError> {
    let mut rows = Vec::new();
    let mut enemy = None;
    let mut pickup = None;
    let mut spawn = None;

    for (y, line) in source.lines().enumerate() {
        let mut row = Vec::new();
        for (x, glyph) in line.chars().enumerate() {
            let tile = match glyph {
                WALL => Tile::WALL,
                PORTAL => Tile::PORTAL,
                g if g == Marker::Enemy.glyph() => {
                    record(&mut enemy, "enemy", x, y)?;
                    Tile::EMPTY
                }
                g if g == Marker::Pickup.glyph() => {
                    record(&mut pickup, "pickup", x, y)?;
                    Tile::EMPTY
                }
                g if g == Marker::Player.glyph() => {
                    record(&mut spawn, "player spawn", x, y)?;
                    Tile::EMPTY
                }
                g if g.is_control() => return Err(MapError::InvalidGlyph { glyph: g, x, y }),
                _ => Tile::EMPTY,
            };
            row.push(tile);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(MapError::Empty);
    }

    Ok(GameMap {
        grid: Grid::new(rows),
        enemy: enemy.ok_or(MapError::Missing("enemy"))?,
        pickup: pickup.ok_or(MapError::Missing("pickup"))?,
        spawn: spawn.unwrap_or(DEFAULT_SPAWN),
    })
}

fn record(
    slot: &mut Option<Position>,
    what: &'static str,
    x: usize,
    y: usize,
) -> Result<(), MapError> {
    if slot.is_some() {
        return Err(MapError::Duplicate { what, x, y });
    }
    *slot = Some(Position::new(x as i32, y as i32));
    Ok(())
}
