use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::level::Level;
use crate::map::Grid;
use crate::state::State;

// symbols of the two input grids
pub(crate) const WALL: char = '#';
pub(crate) const GOAL: char = '.';
pub(crate) const PLAYER: char = '@';
pub(crate) const BOX: char = '$';
pub(crate) const FLOOR: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    Dimensions,
    TooLarge,
    NoPlayer,
    MultiplePlayers,
    BoxOnWall(usize, usize),
    PlayerOnWall,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::Dimensions => write!(f, "Grid rows or columns don't match the given size"),
            ParserErr::TooLarge => write!(f, "Map has too many cells"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::BoxOnWall(r, c) => write!(f, "Box inside a wall at pos: [{}, {}]", r, c),
            ParserErr::PlayerOnWall => write!(f, "Player inside a wall"),
        }
    }
}

impl Error for ParserErr {}

/// Builds a level from a wall/goal grid and a player/box grid, both `height` rows of `width` cells.
pub(crate) fn from_grids(
    width: usize,
    height: usize,
    map_data: &[Vec<char>],
    items_data: &[Vec<char>],
) -> Result<Level, ParserErr> {
    if map_data.len() != height
        || items_data.len() != height
        || map_data.iter().any(|row| row.len() != width)
        || items_data.iter().any(|row| row.len() != width)
    {
        return Err(ParserErr::Dimensions);
    }
    if width.checked_mul(height).map_or(true, |cells| cells > u32::max_value() as usize) {
        return Err(ParserErr::TooLarge);
    }

    let mut cells = Vec::with_capacity(width * height);
    let mut player_pos = None;
    let mut boxes = Vec::new();

    for r in 0..height {
        for c in 0..width {
            let pos = Pos((r * width + c) as u32);
            let cell = match map_data[r][c] {
                WALL => MapCell::Wall,
                GOAL => MapCell::Goal,
                _ => MapCell::Empty,
            };
            match items_data[r][c] {
                PLAYER => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    if cell == MapCell::Wall {
                        return Err(ParserErr::PlayerOnWall);
                    }
                    player_pos = Some(pos);
                }
                BOX => {
                    if cell == MapCell::Wall {
                        return Err(ParserErr::BoxOnWall(r, c));
                    }
                    boxes.push(pos);
                }
                _ => {}
            }
            cells.push(cell);
        }
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    Ok(Level::new(
        Grid::new(width, height, cells),
        State::new(player_pos, boxes),
    ))
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
/// by splitting it into the two input grids. Short lines are padded with floor.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let lines: Vec<Vec<char>> = level.lines().map(|line| line.chars().collect()).collect();
    let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let height = lines.len();

    let mut map_data = vec![vec![FLOOR; width]; height];
    let mut items_data = vec![vec![FLOOR; width]; height];

    for (r, line) in lines.iter().enumerate() {
        for (c, &cur_char) in line.iter().enumerate() {
            let (map, items) = match cur_char {
                '#' => (WALL, FLOOR),
                'p' | '@' => (FLOOR, PLAYER),
                'P' | '+' => (GOAL, PLAYER),
                'b' | '$' => (FLOOR, BOX),
                'B' | '*' => (GOAL, BOX),
                '.' => (GOAL, FLOOR),
                ' ' | '-' | '_' => (FLOOR, FLOOR),
                _ => return Err(ParserErr::Pos(r, c)),
            };
            map_data[r][c] = map;
            items_data[r][c] = items;
        }
    }

    from_grids(width, height, &map_data, &items_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Vec<Vec<char>> {
        rows.iter().map(|row| row.chars().collect()).collect()
    }

    #[test]
    fn xsb_fail_empty() {
        assert_failure("", ParserErr::NoPlayer);
    }

    #[test]
    fn xsb_fail_no_player() {
        let level = r"
####
#$.#
####
";
        assert_failure(level, ParserErr::NoPlayer);
    }

    #[test]
    fn xsb_fail_pos() {
        let level = r"
#####
#@X.#
#####
";
        assert_failure(level, ParserErr::Pos(1, 2));
    }

    #[test]
    fn xsb_fail_multiple_players() {
        let level = r"
#####
#@$@#
#####
";
        assert_failure(level, ParserErr::MultiplePlayers);
    }

    #[test]
    fn xsb_simplest() {
        let level = r"
#####
#@$.#
#####
";
        assert_success_xsb(level);
    }

    #[test]
    fn xsb_corner_boxes() {
        let level = r"
*###*
#@$.#
*###*
";
        assert_success_xsb(level);
    }

    #[test]
    fn xsb_original_1() {
        let level = r"
    #####
    #   #
    #$  #
  ###  $##
  #  $ $ #
### # ## #   ######
#   # ## #####  ..#
# $  $          ..#
##### ### #@##  ..#
    #     #########
    #######
";
        let parsed = assert_success_xsb(level);
        assert_eq!(parsed.state.boxes.len(), 6);
        assert_eq!(parsed.grid.goals().len(), 6);
        assert_eq!(parsed.grid.width(), 19);
    }

    #[test]
    fn grids() {
        let map_data = grid(&["####", "#  #", "# .#", "####"]);
        let items_data = grid(&["    ", " @  ", " $  ", "    "]);
        let level = from_grids(4, 4, &map_data, &items_data).unwrap();
        assert_eq!(level.state.player_pos, level.grid.pos(1, 1));
        assert_eq!(level.state.boxes, vec![level.grid.pos(2, 1)]);
        assert_eq!(level.grid.goals(), &[level.grid.pos(2, 2)]);
    }

    #[test]
    fn grids_fail() {
        let map_data = grid(&["####", "#  #", "####"]);
        let items_data = grid(&["    ", " @  ", "    "]);
        assert_eq!(
            from_grids(4, 4, &map_data, &items_data).unwrap_err(),
            ParserErr::Dimensions
        );
        assert_eq!(
            from_grids(3, 3, &map_data, &items_data).unwrap_err(),
            ParserErr::Dimensions
        );

        let items_data = grid(&["$   ", " @  ", "    "]);
        assert_eq!(
            from_grids(4, 3, &map_data, &items_data).unwrap_err(),
            ParserErr::BoxOnWall(0, 0)
        );

        let items_data = grid(&["@   ", "    ", "    "]);
        assert_eq!(
            from_grids(4, 3, &map_data, &items_data).unwrap_err(),
            ParserErr::PlayerOnWall
        );
    }

    fn assert_failure(input_level: &str, expected_err: ParserErr) {
        assert_eq!(input_level.parse::<Level>().unwrap_err(), expected_err);
    }

    fn assert_success_xsb(input_level: &str) -> Level {
        let level = parse(input_level).unwrap();
        assert_eq!(level.to_string(), input_level.trim_start_matches('\n'));
        level
    }
}
