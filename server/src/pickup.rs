//! Random placement for the relocating pickup.

use rand::seq::SliceRandom;
use rand::Rng;
use shared::{Grid, Position};

/// Rejection-sampling attempts per grid cell before falling back to a scan.
const ATTEMPTS_PER_CELL: usize = 4;

/// Picks a uniformly random passable cell, or `None` when there is none.
///
/// Draws random cells inside the bounding box and keeps the first passable
/// one. A map that is mostly blocked falls back to choosing among the free
/// cells directly, so the call always terminates.
pub fn sample_passable<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return None;
    }

    for _ in 0..width * height * ATTEMPTS_PER_CELL {
        let pos = Position::new(rng.gen_range(0..width) as i32, rng.gen_range(0..height) as i32);
        if grid.is_passable(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = grid.cells().filter(|pos| grid.is_passable(*pos)).collect();
    free.choose(rng).copied()
}
