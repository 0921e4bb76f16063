use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, Dir, MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

/// Displays a grid with a state on top.
pub struct MapFormatter<'a> {
    grid: &'a Grid,
    state: &'a State,
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.grid.write_with_state(self.state, f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The static part of a level: walls and goals. Never changes during a search.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec2d<MapCell>,
    goals: Vec<Pos>,
}

impl Grid {
    /// `cells` must be row-major with `width * height` entries.
    pub(crate) fn new(width: usize, height: usize, cells: Vec<MapCell>) -> Self {
        let cells = Vec2d::new(cells, height, width);
        let goals = cells
            .positions()
            .filter(|&pos| cells[pos] == MapCell::Goal)
            .collect();
        Grid { cells, goals }
    }

    pub fn width(&self) -> usize {
        self.cells.cols()
    }

    pub fn height(&self) -> usize {
        self.cells.rows()
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cells[pos] == MapCell::Wall
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.cells[pos] == MapCell::Goal
    }

    /// Goal cells in ascending index order.
    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn pos(&self, r: usize, c: usize) -> Pos {
        debug_assert!(r < self.height() && c < self.width());
        Pos((r * self.width() + c) as u32)
    }

    pub fn coords(&self, pos: Pos) -> (usize, usize) {
        (pos.index() / self.width(), pos.index() % self.width())
    }

    /// The adjacent cell in `dir` or `None` at the grid boundary.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (r, c) = self.coords(pos);
        let (dr, dc) = dir.offset();
        let nr = r as i64 + dr;
        let nc = c as i64 + dc;
        if nr < 0 || nc < 0 || nr >= self.height() as i64 || nc >= self.width() as i64 {
            return None;
        }
        Some(self.pos(nr as usize, nc as usize))
    }

    /// Like `neighbor` but also `None` when the adjacent cell is a wall.
    pub(crate) fn open_neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        self.neighbor(pos, dir).filter(|&n| !self.is_wall(n))
    }

    /// Cells outside the grid behave like walls.
    pub(crate) fn is_blocked(&self, pos: Pos, dir: Dir) -> bool {
        self.open_neighbor(pos, dir).is_none()
    }

    /// Direction of the step between two adjacent cells.
    pub(crate) fn dir_to(&self, from: Pos, to: Pos) -> Dir {
        let (fr, fc) = self.coords(from);
        let (tr, tc) = self.coords(to);
        match (tr as i64 - fr as i64, tc as i64 - fc as i64) {
            (-1, 0) => Dir::Up,
            (1, 0) => Dir::Down,
            (0, -1) => Dir::Left,
            (0, 1) => Dir::Right,
            _ => panic!("Cells {} and {} are not adjacent", from, to),
        }
    }

    pub fn manhattan(&self, a: Pos, b: Pos) -> u32 {
        let (ar, ac) = self.coords(a);
        let (br, bc) = self.coords(b);
        let dr = if ar > br { ar - br } else { br - ar };
        let dc = if ac > bc { ac - bc } else { bc - ac };
        (dr + dc) as u32
    }

    pub(crate) fn cells(&self) -> &Vec2d<MapCell> {
        &self.cells
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter { grid: self, state }
    }

    /// Writes the grid with `state` on top using XSB characters.
    fn write_with_state(&self, state: &State, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid = self.cells.scratchpad_with_default(Contents::Empty);
        for &b in &state.boxes {
            state_grid[b] = Contents::Box;
        }
        state_grid[state.player_pos] = Contents::Player;
        self.write(&state_grid, f)
    }

    fn write(&self, state_grid: &Vec2d<Contents>, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.height() {
            // don't print trailing empty cells to match the input level strings
            let mut line_len = 0;
            for c in 0..self.width() {
                let pos = self.pos(r, c);
                if self.cells[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty {
                    line_len = c + 1;
                }
            }

            for c in 0..line_len {
                let pos = self.pos(r, c);
                let ch = match (self.cells[pos], state_grid[pos]) {
                    (MapCell::Wall, _) => '#',
                    (MapCell::Empty, Contents::Empty) => ' ',
                    (MapCell::Empty, Contents::Box) => '$',
                    (MapCell::Empty, Contents::Player) => '@',
                    (MapCell::Goal, Contents::Empty) => '.',
                    (MapCell::Goal, Contents::Box) => '*',
                    (MapCell::Goal, Contents::Player) => '+',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state_grid = self.cells.scratchpad_with_default(Contents::Empty);
        self.write(&state_grid, f)
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
