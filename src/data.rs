use std::fmt::{self, Display, Formatter};

/// Index of a cell in a row-major grid: `row * width + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub u32);

impl Pos {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

// same order as the move alphabet so ties between pushes stay deterministic
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Dir::Up => 'u',
            Dir::Down => 'd',
            Dir::Left => 'l',
            Dir::Right => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Dir> {
        match c {
            'u' | 'U' => Some(Dir::Up),
            'd' | 'D' => Some(Dir::Down),
            'l' | 'L' => Some(Dir::Left),
            'r' | 'R' => Some(Dir::Right),
            _ => None,
        }
    }

    /// Row and column offset of one step in this direction.
    pub(crate) fn offset(self) -> (i64, i64) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    pub(crate) fn is_vertical(self) -> bool {
        self == Dir::Up || self == Dir::Down
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCell {
    Empty,
    Wall,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirs_round_trip_through_chars() {
        for &dir in &DIRECTIONS {
            assert_eq!(Dir::from_char(dir.to_char()), Some(dir));
            assert_eq!(dir.inverse().inverse(), dir);
        }
        assert_eq!(Dir::from_char('x'), None);
        assert_eq!(DIRECTIONS.iter().map(|d| d.to_string()).collect::<String>(), "udlr");
    }
}
