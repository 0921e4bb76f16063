use std::fmt::{self, Debug, Display, Formatter};

use crate::level::Level;
use crate::moves::Moves;

/// Prints the level after every push (or every move with `include_steps`).
pub struct SolutionFormatter<'a> {
    level: &'a Level,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(level: &'a Level, moves: &'a Moves, include_steps: bool) -> Self {
        Self {
            level,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.level)?;
        let mut last_state = self.level.state.clone();
        for mov in self.moves {
            // moves from a different level end the printout early
            let (new_state, is_push) = match self.level.apply(&last_state, mov.dir) {
                Ok(next) => next,
                Err(_) => break,
            };
            if is_push || self.include_steps {
                writeln!(f, "{}", self.level.grid.format_with_state(&new_state))?;
            }
            last_state = new_state;
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
