//! Tile grid with a separate overlay of entity markers.
//!
//! Static tiles are never overwritten once loaded. Movable entities are
//! recorded in a parallel marker layer, so vacating a cell always restores
//! whatever wall, portal or floor was underneath.

use crate::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Wall,
    Portal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub tangible: bool,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        kind: TileKind::Empty,
        tangible: false,
    };
    pub const WALL: Tile = Tile {
        kind: TileKind::Wall,
        tangible: true,
    };
    pub const PORTAL: Tile = Tile {
        kind: TileKind::Portal,
        tangible: true,
    };

    pub fn glyph(&self) -> char {
        match self.kind {
            TileKind::Empty => ' ',
            TileKind::Wall => '█',
            TileKind::Portal => '0',
        }
    }
}

/// Movable entity drawn over a tile. Markers are always tangible.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Player,
    Enemy,
    Pickup,
}

impl Marker {
    pub fn glyph(&self) -> char {
        match self {
            Marker::Player => '☻',
            Marker::Enemy => 'Ω',
            Marker::Pickup => '•',
        }
    }
}

/// What a mover would run into at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Marker(Marker),
    Tile(Tile),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    markers: Vec<Vec<Option<Marker>>>,
    width: usize,
}

impl Grid {
    /// Builds a grid from rows of tiles. Rows may differ in length.
    pub fn new(tiles: Vec<Vec<Tile>>) -> Self {
        let width = tiles.iter().map(Vec::len).max().unwrap_or(0);
        let markers = tiles.iter().map(|row| vec![None; row.len()]).collect();
        Self {
            tiles,
            markers,
            width,
        }
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, pos: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let row = self.tiles.get(y)?;
        (x < row.len()).then_some((x, y))
    }

    /// True when the cell exists, taking ragged rows into account.
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// True when the cell exists and neither its tile nor a marker blocks it.
    pub fn is_passable(&self, pos: Position) -> bool {
        match self.index(pos) {
            Some((x, y)) => !self.tiles[y][x].tangible && self.markers[y][x].is_none(),
            None => false,
        }
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|(x, y)| self.tiles[y][x])
    }

    pub fn marker(&self, pos: Position) -> Option<Marker> {
        self.index(pos).and_then(|(x, y)| self.markers[y][x])
    }

    /// The marker at the cell if any, otherwise the static tile.
    pub fn occupant(&self, pos: Position) -> Option<Occupant> {
        let (x, y) = self.index(pos)?;
        Some(match self.markers[y][x] {
            Some(marker) => Occupant::Marker(marker),
            None => Occupant::Tile(self.tiles[y][x]),
        })
    }

    /// Puts a marker on the cell, replacing any previous one.
    pub fn place(&mut self, pos: Position, marker: Marker) -> bool {
        match self.index(pos) {
            Some((x, y)) => {
                self.markers[y][x] = Some(marker);
                true
            }
            None => false,
        }
    }

    /// Removes the marker at the cell, leaving the static tile visible.
    pub fn vacate(&mut self, pos: Position) -> Option<Marker> {
        let (x, y) = self.index(pos)?;
        self.markers[y][x].take()
    }

    /// Moves a marker between cells. The source is vacated first.
    pub fn relocate(&mut self, from: Position, to: Position, marker: Marker) {
        self.vacate(from);
        self.place(to, marker);
    }

    /// Every in-bounds cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles.iter().enumerate().flat_map(|(y, row)| {
            (0..row.len()).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    pub fn passable_count(&self) -> usize {
        self.cells().filter(|pos| self.is_passable(*pos)).count()
    }

    /// Text dump using the map glyphs, one line per row.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let glyph = match self.markers[y][x] {
                    Some(marker) => marker.glyph(),
                    None => tile.glyph(),
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
