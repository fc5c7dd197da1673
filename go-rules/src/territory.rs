use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;
use crate::board::Board;
use crate::stone::{Color, Stone};

/// How empty regions are explored when assigning territory.
///
/// Both techniques assign the same owner to every empty point; they differ in
/// how much work is shared between points of the same region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringTechnique {
    /// Independent depth-first search from every empty point. Stones are
    /// reported as borders but never marked visited.
    #[default]
    Dfs,
    /// Breadth-first fill of each empty region once; every member shares the result.
    FloodFill,
}

impl fmt::Display for ScoringTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringTechnique::Dfs => write!(f, "dfs"),
            ScoringTechnique::FloodFill => write!(f, "flood_fill"),
        }
    }
}

impl std::str::FromStr for ScoringTechnique {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dfs" => Ok(ScoringTechnique::Dfs),
            "flood_fill" => Ok(ScoringTechnique::FloodFill),
            _ => Err(format!("unknown scoring technique: {s}")),
        }
    }
}

/// Territory points per color, in scan order (x outer, y inner).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub black: Vec<Point>,
    pub white: Vec<Point>,
}

impl Territory {
    pub fn get(&self, stone: Stone) -> &[Point] {
        match stone {
            Stone::Black => &self.black,
            Stone::White => &self.white,
        }
    }

    pub fn count(&self, stone: Stone) -> u32 {
        self.get(stone).len() as u32
    }
}

/// Colors seen on the border of an empty region.
#[derive(Debug, Clone, Copy, Default)]
struct Borders {
    black: bool,
    white: bool,
}

impl Borders {
    fn add(&mut self, color: Color) {
        match color {
            Color::Black => self.black = true,
            Color::White => self.white = true,
            Color::Empty => {}
        }
    }

    /// The single bordering color, if there is exactly one.
    fn owner(self) -> Option<Stone> {
        match (self.black, self.white) {
            (true, false) => Some(Stone::Black),
            (false, true) => Some(Stone::White),
            _ => None,
        }
    }
}

/// Owner of the empty point at `point`, or `None` for stones, neutral points and off-board points.
pub fn territory_owner(board: &Board, point: Point, technique: ScoringTechnique) -> Option<Stone> {
    if !board.on_board(point) || !board.color_at(point).is_empty() {
        return None;
    }

    match technique {
        ScoringTechnique::Dfs => dfs_borders(board, point).owner(),
        ScoringTechnique::FloodFill => {
            let mut visited = vec![false; board.cells().len()];
            let (_, borders) = fill_region(board, point, &mut visited);
            borders.owner()
        }
    }
}

/// Territory for both colors. Stones are never counted, only empty points
/// whose region touches exactly one color.
pub fn calculate_score(board: &Board, technique: ScoringTechnique) -> Territory {
    let owners: Vec<Option<Stone>> = match technique {
        ScoringTechnique::Dfs => board
            .cells()
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    dfs_borders(board, cell.point()).owner()
                } else {
                    None
                }
            })
            .collect(),
        ScoringTechnique::FloodFill => region_owners(board),
    };

    let mut territory = Territory::default();
    for (cell, owner) in board.cells().iter().zip(owners) {
        match owner {
            Some(Stone::Black) => territory.black.push(cell.point()),
            Some(Stone::White) => territory.white.push(cell.point()),
            None => {}
        }
    }
    territory
}

/// Label every empty region once and spread its owner to all members.
fn region_owners(board: &Board) -> Vec<Option<Stone>> {
    let mut owners = vec![None; board.cells().len()];
    let mut visited = vec![false; board.cells().len()];

    for cell in board.cells() {
        if !cell.is_empty() || visited[board.idx(cell.point())] {
            continue;
        }
        let (region, borders) = fill_region(board, cell.point(), &mut visited);
        let owner = borders.owner();
        for p in region {
            owners[board.idx(p)] = owner;
        }
    }

    owners
}

/// Breadth-first fill of the empty region containing `start`.
fn fill_region(board: &Board, start: Point, visited: &mut [bool]) -> (Vec<Point>, Borders) {
    let mut region = Vec::new();
    let mut borders = Borders::default();
    let mut queue = VecDeque::from([start]);
    visited[board.idx(start)] = true;

    while let Some(p) = queue.pop_front() {
        region.push(p);
        for &n in board.neighbors(p) {
            let color = board.color_at(n);
            if !color.is_empty() {
                borders.add(color);
                continue;
            }
            let ni = board.idx(n);
            if !visited[ni] {
                visited[ni] = true;
                queue.push_back(n);
            }
        }
    }

    (region, borders)
}

/// Depth-first walk over empty points from `start`, collecting bordering colors.
fn dfs_borders(board: &Board, start: Point) -> Borders {
    let mut visited = vec![false; board.cells().len()];
    let mut borders = Borders::default();
    let mut stack = vec![start];

    while let Some(p) = stack.pop() {
        let vi = board.idx(p);
        if visited[vi] {
            continue;
        }
        visited[vi] = true;
        for &n in board.neighbors(p) {
            match board.color_at(n) {
                Color::Empty if !visited[board.idx(n)] => stack.push(n),
                Color::Empty => {}
                color => borders.add(color),
            }
        }
    }

    borders
}
