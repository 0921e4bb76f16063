use crate::moves::Moves;

use super::a_star::SearchNode;

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

/// Concatenates the walk and push segments on the way from the root to `final_idx`.
pub(crate) fn reconstruct_moves(nodes: &[SearchNode], final_idx: usize) -> Moves {
    let mut segments = Vec::new();
    let mut cur = final_idx;
    while let Some(parent) = nodes[cur].parent {
        // parents are created first so this always terminates
        assert!(parent < cur, "Parent {} created after child {}", parent, cur);
        segments.push(&nodes[cur].moves);
        cur = parent;
    }

    let mut moves = Moves::default();
    for segment in segments.into_iter().rev() {
        moves.extend(segment);
    }
    moves
}
