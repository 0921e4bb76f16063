use std::cmp::Reverse;

use crate::config::HeuristicChoice;
use crate::data::Pos;
use crate::map::Grid;

use super::hungarian::{self, CostMatrix};

/// Estimates how many pushes are left. Less is better.
pub(crate) trait Heuristic {
    fn name(&self) -> &'static str;

    /// `boxes.len()` must not exceed the number of goals.
    fn estimate(&self, grid: &Grid, boxes: &[Pos]) -> u32;
}

/// Sum of Manhattan distances of the cheapest assignment of boxes to distinct goals.
/// Never overestimates: every push moves one box by one cell.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchingHeuristic;

impl Heuristic for MatchingHeuristic {
    fn name(&self) -> &'static str {
        "matching"
    }

    fn estimate(&self, grid: &Grid, boxes: &[Pos]) -> u32 {
        let goals = grid.goals();
        let costs = CostMatrix::from_fn(boxes.len(), goals.len(), |b, g| {
            grid.manhattan(boxes[b], goals[g])
        });
        hungarian::min_cost_assignment(&costs)
    }
}

/// Boxes furthest from any goal pick their nearest free goal first.
/// Can overestimate so solutions are not guaranteed to be shortest.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GreedyHeuristic;

impl Heuristic for GreedyHeuristic {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn estimate(&self, grid: &Grid, boxes: &[Pos]) -> u32 {
        let goals = grid.goals();

        let mut order: Vec<(u32, Pos)> = boxes
            .iter()
            .map(|&b| {
                let worst = goals.iter().map(|&g| grid.manhattan(b, g)).max().unwrap_or(0);
                (worst, b)
            })
            .collect();
        // stable so equally bad boxes keep their (sorted) order
        order.sort_by_key(|&(worst, _)| Reverse(worst));

        let mut taken = vec![false; goals.len()];
        let mut total = 0;
        for (_, b) in order {
            let nearest = goals
                .iter()
                .enumerate()
                .filter(|&(i, _)| !taken[i])
                .min_by_key(|&(_, &g)| grid.manhattan(b, g));
            match nearest {
                Some((i, &g)) => {
                    taken[i] = true;
                    total += grid.manhattan(b, g);
                }
                None => break,
            }
        }
        total
    }
}

// dynamic dispatch has no perf impact here
pub(crate) fn select(choice: HeuristicChoice, box_cnt: usize) -> Box<dyn Heuristic> {
    match choice {
        HeuristicChoice::Matching => Box::new(MatchingHeuristic),
        HeuristicChoice::Greedy => Box::new(GreedyHeuristic),
        HeuristicChoice::Auto { greedy_above } => {
            if box_cnt > greedy_above {
                Box::new(GreedyHeuristic)
            } else {
                Box::new(MatchingHeuristic)
            }
        }
    }
}
