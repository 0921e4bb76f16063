use std::collections::VecDeque;

use crate::data::{Pos, DIRECTIONS};
use crate::map::Grid;
use crate::moves::{Move, Moves};
use crate::state::State;
use crate::vec2d::Vec2d;

/// Cells the player can walk to without pushing anything.
#[derive(Debug)]
pub(crate) struct Reachability {
    player_pos: Pos,
    // the player's own cell points to itself
    prevs: Vec2d<Option<Pos>>,
}

impl Reachability {
    pub(crate) fn new(grid: &Grid, box_grid: &Vec2d<bool>, player_pos: Pos) -> Self {
        let mut prevs = grid.cells().scratchpad_with_default(None);
        prevs[player_pos] = Some(player_pos);

        // BFS so paths extracted from prevs are shortest
        let mut to_visit = VecDeque::new();
        to_visit.push_back(player_pos);

        while let Some(cur_pos) = to_visit.pop_front() {
            for &dir in &DIRECTIONS {
                let next_pos = match grid.open_neighbor(cur_pos, dir) {
                    Some(pos) => pos,
                    None => continue,
                };
                if box_grid[next_pos] || prevs[next_pos].is_some() {
                    continue;
                }
                prevs[next_pos] = Some(cur_pos);
                to_visit.push_back(next_pos);
            }
        }

        Reachability { player_pos, prevs }
    }

    #[cfg(test)]
    pub(crate) fn for_state(grid: &Grid, state: &State) -> Self {
        Self::new(grid, &box_grid(grid, state), state.player_pos)
    }

    pub(crate) fn is_reachable(&self, pos: Pos) -> bool {
        self.prevs[pos].is_some()
    }

    /// Shortest walk from the player to `dest`. `dest` must be reachable.
    pub(crate) fn steps_to(&self, grid: &Grid, dest: Pos) -> Moves {
        let mut rev_moves = Vec::new();
        let mut cur = dest;
        while cur != self.player_pos {
            let prev = self.prevs[cur].expect("Walked into an unreachable cell");
            rev_moves.push(Move::new(grid.dir_to(prev, cur), false));
            cur = prev;
        }
        rev_moves.reverse();
        Moves::new(rev_moves)
    }
}

pub(crate) fn box_grid(grid: &Grid, state: &State) -> Vec2d<bool> {
    let mut box_grid = grid.cells().scratchpad();
    for &b in &state.boxes {
        box_grid[b] = true;
    }
    box_grid
}
