use crate::config::Dedup;
use crate::data::Pos;
use crate::map::Grid;

/// Player position and box positions. Boxes are always sorted.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub player_pos: Pos,
    pub boxes: Vec<Pos>,
}

impl State {
    pub fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        // sort to detect equal states when we reorder boxes
        boxes.sort();
        State { player_pos, boxes }
    }

    /// Moves the box at `from` to `to`, keeping the boxes sorted.
    pub(crate) fn with_box_moved(&self, player_pos: Pos, from: Pos, to: Pos) -> State {
        let mut boxes = self.boxes.clone();
        let index = boxes
            .binary_search(&from)
            .expect("There must be a box at the push origin");
        boxes.remove(index);
        let dest = boxes
            .binary_search(&to)
            .expect_err("The push destination must be free");
        boxes.insert(dest, to);
        State { player_pos, boxes }
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// All boxes are on goals. Extra goals may stay empty.
    pub fn is_solved(&self, grid: &Grid) -> bool {
        self.boxes.iter().all(|&b| grid.is_goal(b))
    }

    pub(crate) fn key(&self, dedup: Dedup) -> StateKey {
        let player_pos = match dedup {
            Dedup::Boxes => None,
            Dedup::BoxesAndPlayer => Some(self.player_pos),
        };
        StateKey {
            player_pos,
            boxes: self.boxes.clone(),
        }
    }
}

/// What the closed set compares. With `Dedup::Boxes` two states that only differ
/// in the player position collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StateKey {
    player_pos: Option<Pos>,
    boxes: Vec<Pos>,
}
