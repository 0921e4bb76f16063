mod a_star;
mod backtracking;
mod deadlock;
mod heuristic;
mod hungarian;
mod reachability;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use log::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::level::Level;
use crate::moves::Moves;
use crate::Solve;

use self::a_star::SearchEnd;
use self::heuristic::Heuristic;

pub use self::a_star::{DepthStats, Stats};
pub use self::deadlock::{detect as detect_deadlock, Deadlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    /// More boxes than goals. Extra goals are fine.
    BoxesGoals { boxes: usize, goals: usize },
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::BoxesGoals { boxes, goals } => {
                write!(f, "More boxes ({}) than goals ({})", boxes, goals)
            }
        }
    }
}

impl Error for SolverErr {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Moves),
    /// Every reachable non-deadlocked state was tried.
    Exhausted,
    TimedOut,
    NodeLimit,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Solved(moves) => write!(f, "Solved in {} moves", moves.move_cnt()),
            Outcome::Exhausted => write!(f, "No solution"),
            Outcome::TimedOut => write!(f, "Out of time"),
            Outcome::NodeLimit => write!(f, "Node limit reached"),
        }
    }
}

pub struct SolverOk {
    pub outcome: Outcome,
    pub stats: Stats,
    pub(crate) heuristic: &'static str,
}

impl SolverOk {
    fn new(outcome: Outcome, stats: Stats, heuristic: &'static str) -> Self {
        Self {
            outcome,
            stats,
            heuristic,
        }
    }

    pub fn moves(&self) -> Option<&Moves> {
        match self.outcome {
            Outcome::Solved(ref moves) => Some(moves),
            _ => None,
        }
    }

    /// Name of the heuristic the search used.
    pub fn heuristic(&self) -> &'static str {
        self.heuristic
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Solved(ref moves) => writeln!(f, "{}: {}", self.heuristic, moves.move_cnt())?,
            ref other => writeln!(f, "{}: {}", self.heuristic, other)?,
        }
        write!(f, "{}", self.stats)
    }
}

/// A* over push states of one level.
pub struct Solver<'a> {
    level: &'a Level,
    config: Config,
    heuristic: Box<dyn Heuristic>,
}

impl Debug for Solver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("config", &self.config)
            .field("heuristic", &self.heuristic.name())
            .finish()
    }
}

impl<'a> Solver<'a> {
    pub fn new(level: &'a Level, config: Config) -> Result<Self, SolverErr> {
        let boxes = level.state.boxes.len();
        let goals = level.grid.goals().len();
        if boxes > goals {
            return Err(SolverErr::BoxesGoals { boxes, goals });
        }

        let heuristic = heuristic::select(config.heuristic, boxes);
        debug!("Using {} heuristic for {} boxes", heuristic.name(), boxes);
        Ok(Solver {
            level,
            config,
            heuristic,
        })
    }

    pub fn search(&self, clock: &dyn Clock) -> SolverOk {
        let grid = &self.level.grid;
        let initial = &self.level.state;
        let name = self.heuristic.name();

        if self.config.deadlocks && !initial.is_solved(grid) {
            if let Some(kind) = deadlock::detect(grid, initial) {
                info!("Initial state is a {} deadlock", kind);
                return SolverOk::new(Outcome::Exhausted, Stats::new(), name);
            }
        }

        let result = a_star::search(grid, initial, &self.config, &*self.heuristic, clock);
        let outcome = match result.end {
            SearchEnd::Solved(idx) => {
                debug!("Solved, backtracking path");
                Outcome::Solved(backtracking::reconstruct_moves(&result.nodes, idx))
            }
            SearchEnd::Exhausted => Outcome::Exhausted,
            SearchEnd::TimedOut => Outcome::TimedOut,
            SearchEnd::NodeLimit => Outcome::NodeLimit,
        };
        info!(
            "{} after visiting {} states",
            outcome,
            result.stats.total_visited()
        );
        SolverOk::new(outcome, result.stats, name)
    }
}

impl Solve for Level {
    fn solve(&self, config: Config) -> Result<SolverOk, SolverErr> {
        let clock = SystemClock::new();
        Ok(Solver::new(self, config)?.search(&clock))
    }
}
