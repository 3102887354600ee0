//! Enemy chase policy.
//!
//! The enemy walks towards the nearest player by Manhattan distance. Ties go
//! to the first player in identity order, so a tick is deterministic for a
//! given world.

use shared::{Grid, Marker, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseStep {
    /// The next cell holds a player.
    Caught(Position),
    /// Cell the enemy ends the tick on; equal to the start when blocked.
    Move(Position),
}

pub fn nearest_target<I>(enemy: Position, players: I) -> Option<Position>
where
    I: IntoIterator<Item = Position>,
{
    players.into_iter().min_by_key(|player| player.manhattan(enemy))
}

/// Unit step per axis towards the target, zero when already aligned.
pub fn desired_step(enemy: Position, target: Position) -> (i32, i32) {
    ((target.x - enemy.x).signum(), (target.y - enemy.y).signum())
}

pub fn plan_step(grid: &Grid, enemy: Position, target: Option<Position>) -> ChaseStep {
    let Some(target) = target else {
        return ChaseStep::Move(enemy);
    };

    let (dx, dy) = desired_step(enemy, target);
    let candidate = enemy.offset(dx, dy);
    if grid.marker(candidate) == Some(Marker::Player) {
        return ChaseStep::Caught(candidate);
    }

    // Each axis is checked on its own so a blocked axis still lets the
    // other one advance.
    let step_x = if dx != 0 && grid.is_passable(enemy.offset(dx, 0)) { dx } else { 0 };
    let step_y = if dy != 0 && grid.is_passable(enemy.offset(0, dy)) { dy } else { 0 };

    let next = enemy.offset(step_x, step_y);
    if step_x != 0 && step_y != 0 && !grid.is_passable(next) {
        // Diagonal corner is itself blocked: settle for the horizontal step.
        return ChaseStep::Move(enemy.offset(step_x, 0));
    }
    ChaseStep::Move(next)
}
