use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// Which cost-to-go estimate the search uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicChoice {
    /// Optimal boxes-to-goals assignment. Admissible.
    Matching,
    /// Nearest free goal, worst boxes first. Faster, not admissible.
    Greedy,
    /// `Matching` up to `greedy_above` boxes, `Greedy` beyond.
    Auto { greedy_above: usize },
}

/// What the closed set keys on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dedup {
    /// Box positions only. Two states with equal boxes but a different player
    /// region are merged: smaller search, solutions can be longer or missed.
    Boxes,
    /// Box positions and the exact player position.
    BoxesAndPlayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// `None` searches until the frontier is exhausted.
    pub time_budget: Option<Duration>,
    pub heuristic: HeuristicChoice,
    pub dedup: Dedup,
    /// Upper bound on created search nodes.
    pub max_nodes: Option<usize>,
    pub deadlocks: bool,
}

pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(15);
pub const DEFAULT_GREEDY_ABOVE: usize = 20;

impl Default for Config {
    fn default() -> Self {
        Config {
            time_budget: Some(DEFAULT_TIME_BUDGET),
            heuristic: HeuristicChoice::Auto {
                greedy_above: DEFAULT_GREEDY_ABOVE,
            },
            dedup: Dedup::Boxes,
            max_nodes: None,
            deadlocks: true,
        }
    }
}

impl Display for HeuristicChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicChoice::Matching => write!(f, "matching"),
            HeuristicChoice::Greedy => write!(f, "greedy"),
            HeuristicChoice::Auto { greedy_above } => write!(f, "auto (greedy above {})", greedy_above),
        }
    }
}

impl Display for Dedup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dedup::Boxes => write!(f, "boxes"),
            Dedup::BoxesAndPlayer => write!(f, "boxes-and-player"),
        }
    }
}
