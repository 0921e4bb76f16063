use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::data::Dir;
use crate::map::Grid;
use crate::moves::{Move, Moves};
use crate::parser::{self, ParserErr};
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;

#[derive(Clone)]
pub struct Level {
    pub grid: Grid,
    pub state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayErrKind {
    InvalidChar(char),
    OutOfGrid,
    Wall,
    BoxIntoWall,
    BoxIntoBox,
}

/// The first move of a replayed sequence that can't be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayErr {
    pub step: usize,
    pub kind: ReplayErrKind,
}

impl Display for ReplayErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let reason = match self.kind {
            ReplayErrKind::InvalidChar(c) => return write!(f, "Invalid move {:?} at step {}", c, self.step),
            ReplayErrKind::OutOfGrid => "walks out of the grid",
            ReplayErrKind::Wall => "walks into a wall",
            ReplayErrKind::BoxIntoWall => "pushes a box into a wall",
            ReplayErrKind::BoxIntoBox => "pushes a box into another box",
        };
        write!(f, "Move {} {}", self.step, reason)
    }
}

impl Error for ReplayErr {}

impl Level {
    pub fn new(grid: Grid, state: State) -> Self {
        Level { grid, state }
    }

    /// See `crate::solve` for the symbols of the two grids.
    pub fn from_grids(
        width: usize,
        height: usize,
        map_data: &[Vec<char>],
        items_data: &[Vec<char>],
    ) -> Result<Level, ParserErr> {
        parser::from_grids(width, height, map_data, items_data)
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved(&self.grid)
    }

    /// Executes one move. Returns the new state and whether a box was pushed.
    pub fn apply(&self, state: &State, dir: Dir) -> Result<(State, bool), ReplayErrKind> {
        let grid = &self.grid;
        let next = grid.neighbor(state.player_pos, dir).ok_or(ReplayErrKind::OutOfGrid)?;
        if grid.is_wall(next) {
            return Err(ReplayErrKind::Wall);
        }
        if !state.has_box(next) {
            return Ok((State { player_pos: next, boxes: state.boxes.clone() }, false));
        }

        let push_dest = grid.open_neighbor(next, dir).ok_or(ReplayErrKind::BoxIntoWall)?;
        if state.has_box(push_dest) {
            return Err(ReplayErrKind::BoxIntoBox);
        }
        Ok((state.with_box_moved(next, next, push_dest), true))
    }

    /// Replays a move string over `{u,d,l,r}` from the initial state.
    pub fn replay(&self, moves: &str) -> Result<State, ReplayErr> {
        self.execute(moves).map(|(state, _)| state)
    }

    /// Turns a move string into `Moves`, marking pushes.
    pub fn annotate(&self, moves: &str) -> Result<Moves, ReplayErr> {
        self.execute(moves).map(|(_, moves)| moves)
    }

    fn execute(&self, moves: &str) -> Result<(State, Moves), ReplayErr> {
        let mut state = self.state.clone();
        let mut executed = Moves::default();
        for (step, c) in moves.chars().enumerate() {
            let dir = Dir::from_char(c).ok_or(ReplayErr {
                step,
                kind: ReplayErrKind::InvalidChar(c),
            })?;
            let (new_state, is_push) = self
                .apply(&state, dir)
                .map_err(|kind| ReplayErr { step, kind })?;
            executed.add(Move::new(dir, is_push));
            state = new_state;
        }
        Ok((state, executed))
    }

    pub fn xsb_solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(self, moves, include_steps)
    }
}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid.format_with_state(&self.state))
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
