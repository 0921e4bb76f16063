use std::fmt::{self, Display, Formatter};

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Grid;
use crate::state::State;
use crate::vec2d::Vec2d;

use super::reachability::box_grid;

/// Why a state can't be solved anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deadlock {
    /// A box off goal with a wall on both axes.
    Corner,
    /// A 2x2 square of boxes and walls with a box off goal.
    Block,
    /// Two adjacent boxes, each stuck against a wall across their shared axis.
    FrozenPair,
    /// A box off goal pushed into a goal-less dead end corridor.
    Tunnel,
}

impl Display for Deadlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Deadlock::Corner => write!(f, "corner"),
            Deadlock::Block => write!(f, "block"),
            Deadlock::FrozenPair => write!(f, "frozen pair"),
            Deadlock::Tunnel => write!(f, "tunnel"),
        }
    }
}

/// Checks every box of the state.
pub fn detect(grid: &Grid, state: &State) -> Option<Deadlock> {
    let box_grid = box_grid(grid, state);
    state
        .boxes
        .iter()
        .find_map(|&b| detect_around(grid, &box_grid, state.player_pos, b))
}

/// Only patterns containing the box at `box_pos`.
/// A push can only create new deadlocks around the pushed box.
pub(crate) fn detect_around(
    grid: &Grid,
    box_grid: &Vec2d<bool>,
    player_pos: Pos,
    box_pos: Pos,
) -> Option<Deadlock> {
    debug_assert!(box_grid[box_pos]);

    if is_corner(grid, box_pos) {
        Some(Deadlock::Corner)
    } else if is_block(grid, box_grid, box_pos) {
        Some(Deadlock::Block)
    } else if is_frozen_pair(grid, box_grid, box_pos) {
        Some(Deadlock::FrozenPair)
    } else if is_tunnel(grid, player_pos, box_pos) {
        Some(Deadlock::Tunnel)
    } else {
        None
    }
}

fn blocked_vertically(grid: &Grid, pos: Pos) -> bool {
    grid.is_blocked(pos, Dir::Up) || grid.is_blocked(pos, Dir::Down)
}

fn blocked_horizontally(grid: &Grid, pos: Pos) -> bool {
    grid.is_blocked(pos, Dir::Left) || grid.is_blocked(pos, Dir::Right)
}

// A wall on either side of an axis is enough: pushing away from it
// needs the player to stand inside the wall.
fn is_corner(grid: &Grid, box_pos: Pos) -> bool {
    !grid.is_goal(box_pos) && blocked_vertically(grid, box_pos) && blocked_horizontally(grid, box_pos)
}

fn is_block(grid: &Grid, box_grid: &Vec2d<bool>, box_pos: Pos) -> bool {
    const SQUARES: [(Dir, Dir); 4] = [
        (Dir::Up, Dir::Left),
        (Dir::Up, Dir::Right),
        (Dir::Down, Dir::Left),
        (Dir::Down, Dir::Right),
    ];

    'square: for &(vertical, horizontal) in &SQUARES {
        let mut off_goal = !grid.is_goal(box_pos);

        let side = grid.neighbor(box_pos, horizontal);
        let above = grid.neighbor(box_pos, vertical);
        let diagonal = side.and_then(|pos| grid.neighbor(pos, vertical));

        for &cell in &[side, above, diagonal] {
            // outside of the grid counts as wall
            let pos = match cell {
                Some(pos) => pos,
                None => continue,
            };
            if grid.is_wall(pos) {
                continue;
            }
            if !box_grid[pos] {
                continue 'square;
            }
            if !grid.is_goal(pos) {
                off_goal = true;
            }
        }

        if off_goal {
            return true;
        }
    }
    false
}

// Walls count across the shared axis, boxes don't: a box there might still move away.
fn is_frozen_pair(grid: &Grid, box_grid: &Vec2d<bool>, box_pos: Pos) -> bool {
    for &dir in &DIRECTIONS {
        let other = match grid.neighbor(box_pos, dir) {
            Some(pos) if box_grid[pos] => pos,
            _ => continue,
        };
        if grid.is_goal(box_pos) && grid.is_goal(other) {
            continue;
        }

        let frozen = if dir.is_vertical() {
            blocked_horizontally(grid, box_pos) && blocked_horizontally(grid, other)
        } else {
            blocked_vertically(grid, box_pos) && blocked_vertically(grid, other)
        };
        if frozen {
            return true;
        }
    }
    false
}

fn is_tunnel(grid: &Grid, player_pos: Pos, box_pos: Pos) -> bool {
    if grid.is_goal(box_pos) {
        return false;
    }

    let walled = |pos: Pos, vertical_corridor: bool| {
        if vertical_corridor {
            grid.is_blocked(pos, Dir::Left) && grid.is_blocked(pos, Dir::Right)
        } else {
            grid.is_blocked(pos, Dir::Up) && grid.is_blocked(pos, Dir::Down)
        }
    };

    for &dir in &DIRECTIONS {
        let vertical_corridor = dir.is_vertical();
        if !walled(box_pos, vertical_corridor) {
            continue;
        }

        // walk towards the dead end, the player must not be stuck inside
        let mut cur = box_pos;
        let dead_end = loop {
            match grid.open_neighbor(cur, dir) {
                None => break true,
                Some(next) => {
                    if !walled(next, vertical_corridor) || grid.is_goal(next) || next == player_pos {
                        break false;
                    }
                    cur = next;
                }
            }
        };
        if dead_end {
            return true;
        }
    }
    false
}
