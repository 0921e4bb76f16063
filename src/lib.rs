// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod level;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod data;
mod map;
mod parser;
mod state;
mod vec2d;

use std::error::Error;
use std::fs;
use std::path::Path;

use log::debug;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::level::Level;
use crate::solver::{Outcome, Solver, SolverErr, SolverOk};

pub use crate::data::{Dir, MapCell, Pos, DIRECTIONS};
pub use crate::map::{Grid, MapFormatter};
pub use crate::parser::ParserErr;
pub use crate::state::State;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl<P: AsRef<Path> + ?Sized> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let text = fs::read_to_string(self)?;
        Ok(text.parse()?)
    }
}

pub trait Solve {
    fn solve(&self, config: Config) -> Result<SolverOk, SolverErr>;
}

/// Solves a level given as two `height` x `width` grids and returns the moves
/// as a string over `u`, `d`, `l`, `r`.
///
/// `map_data` holds walls (`#`) and goals (`.`), `items_data` the player (`@`)
/// and boxes (`$`). Anything else is empty floor.
///
/// Returns an empty string for invalid input, for levels without a solution
/// and when the default time budget runs out. Use [`Level::from_grids`] and
/// [`Solver`] directly to tell those apart from an already solved level.
pub fn solve(width: usize, height: usize, map_data: &[Vec<char>], items_data: &[Vec<char>]) -> String {
    let level = match Level::from_grids(width, height, map_data, items_data) {
        Ok(level) => level,
        Err(err) => {
            debug!("Invalid level: {}", err);
            return String::new();
        }
    };
    let solver = match Solver::new(&level, Config::default()) {
        Ok(solver) => solver,
        Err(err) => {
            debug!("Invalid level: {}", err);
            return String::new();
        }
    };

    match solver.search(&SystemClock::new()).outcome {
        Outcome::Solved(moves) => moves.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|row| row.chars().collect()).collect()
    }

    #[test]
    fn single_push() {
        let map_data = grid(&["####", "#  .", "#  #", "####"]);
        let items_data = grid(&["    ", " @$ ", "    ", "    "]);
        assert_eq!(solve(4, 4, &map_data, &items_data), "r");
    }

    #[test]
    fn walk_then_push() {
        let map_data = grid(&["######", "#    #", "#   .#", "######"]);
        let items_data = grid(&["      ", " @    ", "  $   ", "      "]);
        let moves = solve(6, 4, &map_data, &items_data);
        assert_eq!(moves, "drr");
    }

    #[test]
    fn invalid_input() {
        let map_data = grid(&["###", "# #", "###"]);
        let no_player = grid(&["   ", " $ ", "   "]);
        assert_eq!(solve(3, 3, &map_data, &no_player), "");
        // wrong dimensions
        let items_data = grid(&["   ", " @ ", "   "]);
        assert_eq!(solve(4, 3, &map_data, &items_data), "");
        // a box and no goal
        let map_data = grid(&["####", "#  #", "####"]);
        let items_data = grid(&["    ", " @$ ", "    "]);
        assert_eq!(solve(4, 3, &map_data, &items_data), "");
    }

    #[test]
    fn no_solution() {
        let map_data = grid(&["######", "#   .#", "######"]);
        let items_data = grid(&["      ", " $ @  ", "      "]);
        assert_eq!(solve(6, 3, &map_data, &items_data), "");
    }

    #[test]
    fn loading_levels() {
        let level = "levels/custom/01-simplest.txt".load_level().unwrap();
        assert_eq!(level.state.boxes.len(), 1);
        assert!("levels/custom/does-not-exist.txt".load_level().is_err());
    }
}
