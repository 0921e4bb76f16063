use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Display, Formatter};

use fnv::FnvHashSet;
use log::{debug, trace};
use separator::Separatable;

use crate::clock::Clock;
use crate::config::Config;
use crate::data::DIRECTIONS;
use crate::map::Grid;
use crate::moves::{Move, Moves};
use crate::state::{State, StateKey};

use super::deadlock;
use super::heuristic::Heuristic;
use super::reachability::{box_grid, Reachability};

/// Counters for one depth (number of pushes from the initial state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthStats {
    pub created: usize,
    pub visited: usize,
    pub duplicates: usize,
    pub deadlocks: usize,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    depths: Vec<DepthStats>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn depths(&self) -> &[DepthStats] {
        &self.depths
    }

    pub fn total_created(&self) -> usize {
        self.depths.iter().map(|d| d.created).sum()
    }

    pub fn total_visited(&self) -> usize {
        self.depths.iter().map(|d| d.visited).sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.depths.iter().map(|d| d.duplicates).sum()
    }

    pub fn total_deadlocks(&self) -> usize {
        self.depths.iter().map(|d| d.deadlocks).sum()
    }

    pub(crate) fn add_created(&mut self, depth: u32) -> bool {
        self.add(depth, |d| d.created += 1)
    }

    pub(crate) fn add_visited(&mut self, depth: u32) -> bool {
        self.add(depth, |d| d.visited += 1)
    }

    pub(crate) fn add_duplicate(&mut self, depth: u32) -> bool {
        self.add(depth, |d| d.duplicates += 1)
    }

    pub(crate) fn add_deadlock(&mut self, depth: u32) -> bool {
        self.add(depth, |d| d.deadlocks += 1)
    }

    /// Returns true if `depth` was seen for the first time.
    fn add(&mut self, depth: u32, count: impl FnOnce(&mut DepthStats)) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because a depth might only get duplicates or deadlocks
        while depth >= self.depths.len() {
            self.depths.push(DepthStats::default());
            ret = true;
        }
        count(&mut self.depths[depth]);
        ret
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created: Vec<_> = self.depths.iter().map(|d| d.created).collect();
        let visited: Vec<_> = self.depths.iter().map(|d| d.visited).collect();
        writeln!(f, "created by depth: {:?}", created)?;
        writeln!(f, "unique visited by depth: {:?}", visited)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(f, "total duplicates: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "total deadlocks: {}", self.total_deadlocks().separated_string())?;
        writeln!(f, "total unique visited: {}", self.total_visited().separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_visited();
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", self.total_duplicates().separated_string())?;
        writeln!(f, "Deadlocks pruned total: {}", self.total_deadlocks().separated_string())?;
        writeln!(
            f,
            "Created but not reached total: {}",
            created.saturating_sub(visited).separated_string()
        )?;
        writeln!(f)?;

        writeln!(f, "{:<15}{:<15}{:<15}{:<15}{:<15}", "Depth", "Created", "Unique", "Duplicates", "Deadlocks")?;
        for (i, depth) in self.depths.iter().enumerate() {
            writeln!(
                f,
                "{:<15}{:<15}{:<15}{:<15}{:<15}",
                format!("{}:", i),
                depth.created.separated_string(),
                depth.visited.separated_string(),
                depth.duplicates.separated_string(),
                depth.deadlocks.separated_string(),
            )?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct SearchNode {
    pub(crate) state: State,
    /// Index into the node arena, always smaller than this node's.
    pub(crate) parent: Option<usize>,
    /// Moves made so far, steps included.
    pub(crate) g: u32,
    pub(crate) h: u32,
    /// Pushes made so far.
    pub(crate) depth: u32,
    /// Walk plus the push leading here from the parent.
    pub(crate) moves: Moves,
}

impl SearchNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchEnd {
    /// Index of the solved node.
    Solved(usize),
    Exhausted,
    TimedOut,
    NodeLimit,
}

#[derive(Debug)]
pub(crate) struct SearchResult {
    pub(crate) end: SearchEnd,
    pub(crate) nodes: Vec<SearchNode>,
    pub(crate) stats: Stats,
}

pub(crate) fn search(
    grid: &Grid,
    initial: &State,
    config: &Config,
    heuristic: &dyn Heuristic,
    clock: &dyn Clock,
) -> SearchResult {
    debug!("Search called");

    let deadline = config.time_budget.map(|budget| clock.now() + budget);

    let mut stats = Stats::new();
    let mut nodes = Vec::new();
    // nodes are only ever appended so the index doubles as insertion order for FIFO ties
    let mut to_visit = BinaryHeap::new();
    let mut closed: FnvHashSet<StateKey> = FnvHashSet::default();

    let start = SearchNode {
        state: initial.clone(),
        parent: None,
        g: 0,
        h: heuristic.estimate(grid, &initial.boxes),
        depth: 0,
        moves: Moves::default(),
    };
    stats.add_created(0);
    to_visit.push(Reverse((start.f(), 0)));
    nodes.push(start);

    let end = loop {
        let cur_idx = match to_visit.pop() {
            Some(Reverse((_, idx))) => idx,
            None => break SearchEnd::Exhausted,
        };
        let depth = nodes[cur_idx].depth;

        if !closed.insert(nodes[cur_idx].state.key(config.dedup)) {
            stats.add_duplicate(depth);
            continue;
        }
        if stats.add_visited(depth) {
            debug!("Visited new depth: {}", depth);
            trace!("{:?}", stats);
        }

        if nodes[cur_idx].state.is_solved(grid) {
            debug!("Solved at depth {}", depth);
            break SearchEnd::Solved(cur_idx);
        }

        if let Some(deadline) = deadline {
            if clock.now() >= deadline {
                debug!("Out of time at depth {}", depth);
                break SearchEnd::TimedOut;
            }
        }

        let successors = expand(grid, &nodes[cur_idx], config, &closed, &mut stats);
        let mut limit_hit = false;
        for (state, moves) in successors {
            if let Some(max_nodes) = config.max_nodes {
                if nodes.len() >= max_nodes {
                    limit_hit = true;
                    break;
                }
            }

            let parent = &nodes[cur_idx];
            let node = SearchNode {
                g: parent.g + moves.move_cnt() as u32,
                h: heuristic.estimate(grid, &state.boxes),
                depth: parent.depth + 1,
                parent: Some(cur_idx),
                state,
                moves,
            };
            stats.add_created(node.depth);
            to_visit.push(Reverse((node.f(), nodes.len())));
            nodes.push(node);
        }
        if limit_hit {
            debug!("Node limit of {} reached", nodes.len());
            break SearchEnd::NodeLimit;
        }
    };

    SearchResult { end, nodes, stats }
}

/// All single-push successors, each with the walk to the box and the push itself.
fn expand(
    grid: &Grid,
    node: &SearchNode,
    config: &Config,
    closed: &FnvHashSet<StateKey>,
    stats: &mut Stats,
) -> Vec<(State, Moves)> {
    let state = &node.state;
    let new_depth = node.depth + 1;

    let mut box_grid = box_grid(grid, state);
    let reachability = Reachability::new(grid, &box_grid, state.player_pos);

    let mut successors = Vec::new();
    for &box_pos in &state.boxes {
        for &dir in &DIRECTIONS {
            let push_from = match grid.open_neighbor(box_pos, dir.inverse()) {
                Some(pos) => pos,
                None => continue,
            };
            if !reachability.is_reachable(push_from) {
                continue;
            }
            let push_dest = match grid.open_neighbor(box_pos, dir) {
                Some(pos) if !box_grid[pos] => pos,
                _ => continue,
            };

            let new_state = state.with_box_moved(box_pos, box_pos, push_dest);
            if closed.contains(&new_state.key(config.dedup)) {
                stats.add_duplicate(new_depth);
                continue;
            }

            if config.deadlocks {
                box_grid[box_pos] = false;
                box_grid[push_dest] = true;
                let deadlock = deadlock::detect_around(grid, &box_grid, new_state.player_pos, push_dest);
                box_grid[box_pos] = true;
                box_grid[push_dest] = false;

                if let Some(kind) = deadlock {
                    trace!("Pruned {} deadlock at {}", kind, push_dest);
                    stats.add_deadlock(new_depth);
                    continue;
                }
            }

            let mut moves = reachability.steps_to(grid, push_from);
            moves.add(Move::new(dir, true));
            successors.push((new_state, moves));
        }
    }
    successors
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clock::ManualClock;
    use crate::config::Dedup;
    use crate::level::Level;
    use crate::solver::heuristic::MatchingHeuristic;

    use std::time::Duration;

    fn run(level: &str, config: Config) -> (Level, SearchResult) {
        let level: Level = level.parse().unwrap();
        let clock = ManualClock::new(Duration::from_millis(1));
        let result = search(&level.grid, &level.state, &config, &MatchingHeuristic, &clock);
        (level, result)
    }

    fn exact() -> Config {
        Config {
            time_budget: None,
            dedup: Dedup::BoxesAndPlayer,
            ..Config::default()
        }
    }

    fn root(level: &Level) -> SearchNode {
        SearchNode {
            state: level.state.clone(),
            parent: None,
            g: 0,
            h: 0,
            depth: 0,
            moves: Moves::default(),
        }
    }

    #[test]
    fn expand_pushes() {
        let level: Level = r"
#######
#     #
#  $  #
# $@$ #
#  $  #
#.... #
#######"
            .parse()
            .unwrap();
        let mut stats = Stats::new();
        let closed = FnvHashSet::default();
        let config = Config {
            deadlocks: false,
            ..exact()
        };
        let successors = expand(&level.grid, &root(&level), &config, &closed, &mut stats);
        // every box can only be pushed away from the player
        assert_eq!(successors.len(), 4);
        for (state, moves) in &successors {
            assert_eq!(moves.move_cnt(), 1);
            assert_eq!(moves.push_cnt(), 1);
            assert_eq!(level.replay(&moves.to_string()).unwrap(), *state);
        }
    }

    #[test]
    fn expand_prunes_deadlocks() {
        let level: Level = r"
#####
# $ #
#   #
#@ .#
#####"
            .parse()
            .unwrap();
        let closed = FnvHashSet::default();

        let mut stats = Stats::new();
        let config = Config {
            deadlocks: false,
            ..exact()
        };
        let all = expand(&level.grid, &root(&level), &config, &closed, &mut stats);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].1.push_cnt(), 1);

        // both pushes end in a corner
        let mut stats = Stats::new();
        let pruned = expand(&level.grid, &root(&level), &exact(), &closed, &mut stats);
        assert!(pruned.is_empty());
        assert_eq!(stats.total_deadlocks(), 2);
        assert_eq!(stats.depths()[1].deadlocks, 2);
    }

    #[test]
    fn solves_with_walk() {
        let (level, result) = run(
            r"
#######
#@    #
# $   #
#    .#
#######",
            exact(),
        );
        let idx = match result.end {
            SearchEnd::Solved(idx) => idx,
            end => panic!("Unexpected end: {:?}", end),
        };
        let goal = &result.nodes[idx];
        assert!(goal.state.is_solved(&level.grid));
        assert_eq!(goal.depth, 4);
        assert_eq!(goal.g, 7);
    }

    #[test]
    fn exhausts() {
        let (_, result) = run(
            r"
#######
#@$ # #
#   #.#
#######",
            exact(),
        );
        assert_eq!(result.end, SearchEnd::Exhausted);
        assert!(result.stats.total_visited() > 0);
    }

    #[test]
    fn node_limit() {
        let config = Config {
            max_nodes: Some(3),
            ..exact()
        };
        let (_, result) = run(
            r"
##########
#@       #
# $    $ #
#        #
#.      .#
##########",
            config,
        );
        assert_eq!(result.end, SearchEnd::NodeLimit);
        assert!(result.nodes.len() <= 3);
    }

    #[test]
    fn stats_by_depth() {
        let mut stats = Stats::new();
        assert!(stats.add_created(0));
        assert!(stats.add_deadlock(2));
        assert!(!stats.add_created(1));
        assert_eq!(stats.depths().len(), 3);
        assert_eq!(stats.total_created(), 2);
        assert_eq!(stats.total_deadlocks(), 1);
        assert_eq!(stats.depths()[1].created, 1);
    }
}
