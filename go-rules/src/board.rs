use std::fmt;

use tracing::debug;

use crate::Point;
use crate::cell::Cell;
use crate::error::GoError;
use crate::stone::{Color, Stone};
use crate::territory::{self, ScoringTechnique, Territory};
use crate::turn::Move;

pub const MAX_SIZE: u8 = 25;

/// A square Go board stored as an arena of cells, scanned x outer, y inner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `size` x `size` board.
    pub fn new(size: u8) -> Result<Self, GoError> {
        if size == 0 || size > MAX_SIZE {
            return Err(GoError::InvalidSize(size));
        }

        let cells = (0..size)
            .flat_map(|x| (0..size).map(move |y| (x, y)))
            .map(|point| Cell::new(point, size))
            .collect();

        Ok(Board { size, cells })
    }

    /// Build a board from an ASCII layout, one string per row (y), one char per column (x).
    /// `B` = Black, `W` = White, anything else = empty.
    pub fn from_layout(layout: &[&str]) -> Result<Self, GoError> {
        let size = u8::try_from(layout.len()).unwrap_or(u8::MAX);
        if layout.iter().any(|row| row.chars().count() != layout.len()) {
            return Err(GoError::InvalidSize(size));
        }

        let mut board = Board::new(size)?;
        for (y, row) in layout.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let color = match c {
                    'B' => Color::Black,
                    'W' => Color::White,
                    _ => continue,
                };
                board.add_stone((x as u8, y as u8), color)?;
            }
        }
        Ok(board)
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.on_board(point).then(|| &self.cells[self.idx(point)])
    }

    /// Color at a point; off-board points read as empty.
    pub fn color_at(&self, point: Point) -> Color {
        self.cell(point).map_or(Color::Empty, Cell::color)
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        self.color_at(point).stone()
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        x < self.size && y < self.size
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    pub fn neighbors(&self, point: Point) -> &[Point] {
        match self.cell(point) {
            Some(cell) => cell.neighbors(),
            None => &[],
        }
    }

    /// Snapshot of all colors indexed `[y][x]`, for renderers.
    pub fn colors(&self) -> Vec<Vec<Color>> {
        (0..self.size)
            .map(|y| (0..self.size).map(|x| self.color_at((x, y))).collect())
            .collect()
    }

    // -- Mutation --

    /// Set a cell's color without any legality check.
    pub fn add_stone(&mut self, point: Point, color: Color) -> Result<(), GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }
        let i = self.idx(point);
        self.cells[i].set_color(color);
        Ok(())
    }

    /// Remove the dead group containing `point`. Returns the number of stones removed.
    pub fn capture_group(&mut self, point: Point) -> Result<u32, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }
        let stone = self.color_at(point).player()?;
        if !self.is_dead(point) {
            return Err(GoError::GroupAlive);
        }

        let chain = self.chain(point);
        for &p in &chain {
            let i = self.idx(p);
            self.cells[i].set_color(Color::Empty);
        }

        debug!(?point, %stone, count = chain.len(), "captured group");
        Ok(chain.len() as u32)
    }

    // -- Rules --

    /// Whether `color` may play at `point`.
    ///
    /// A move is legal on an empty point if it captures (an adjacent opposing
    /// group is left without liberties) or if the placed stone's own group keeps
    /// at least one liberty. Captures take precedence, so a move that both
    /// captures and would otherwise be suicide is legal. The board is not touched.
    pub fn is_legal_move(&self, point: Point, color: Color) -> Result<bool, GoError> {
        let stone = color.player()?;
        if self.cell(point).is_none_or(|cell| !cell.is_empty()) {
            return Ok(false);
        }

        let placed = Some((point, color));
        let opponent = Color::from(stone.opp());
        let captures = self
            .neighbors(point)
            .iter()
            .any(|&n| self.color_at(n) == opponent && !self.has_liberty(n, placed));

        Ok(captures || self.has_liberty(point, placed))
    }

    /// Whether the group containing `point` has no liberties. Empty points are never dead.
    pub fn is_dead(&self, point: Point) -> bool {
        self.on_board(point) && !self.has_liberty(point, None)
    }

    /// Flood-fill connected group of same-colored stones.
    pub fn chain(&self, point: Point) -> Vec<Point> {
        let color = self.color_at(point);
        if color.is_empty() {
            return Vec::new();
        }

        let mut visited = vec![false; self.cells.len()];
        let mut result = Vec::new();
        let mut stack = vec![point];

        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            result.push(p);
            for &n in self.neighbors(p) {
                if self.color_at(n) == color && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }

        result
    }

    /// Empty points adjacent to the group containing `point`.
    pub fn liberties(&self, point: Point) -> Vec<Point> {
        let mut seen = vec![false; self.cells.len()];
        let mut libs = Vec::new();
        for p in self.chain(point) {
            for &n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.color_at(n).is_empty() {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    // -- Scoring --

    pub fn territory_owner(&self, point: Point, technique: ScoringTechnique) -> Option<Stone> {
        territory::territory_owner(self, point, technique)
    }

    pub fn calculate_score(&self, technique: ScoringTechnique) -> Territory {
        territory::calculate_score(self, technique)
    }

    /// Enumerate every cell as a move, in scan order, numbered from 1.
    /// This is a positional listing, not the order the stones were played.
    pub fn to_move_sequence(&self) -> Vec<Move> {
        self.cells
            .iter()
            .zip(1..)
            .map(|(cell, turn)| Move::play(turn, cell.point()))
            .collect()
    }

    // -- Internal helpers --

    #[inline]
    pub(crate) fn idx(&self, (x, y): Point) -> usize {
        x as usize * self.size as usize + y as usize
    }

    /// Color at `point`, pretending `placed` has been played.
    fn color_with(&self, point: Point, placed: Option<(Point, Color)>) -> Color {
        match placed {
            Some((p, color)) if p == point => color,
            _ => self.color_at(point),
        }
    }

    /// Early-exit search for any empty point next to the group at `start`.
    fn has_liberty(&self, start: Point, placed: Option<(Point, Color)>) -> bool {
        let color = self.color_with(start, placed);
        if color.is_empty() {
            return true;
        }

        let mut visited = vec![false; self.cells.len()];
        let mut stack = vec![start];
        while let Some(p) = stack.pop() {
            let vi = self.idx(p);
            if visited[vi] {
                continue;
            }
            visited[vi] = true;
            for &n in self.neighbors(p) {
                let c = self.color_with(n, placed);
                if c.is_empty() {
                    return true;
                }
                if c == color && !visited[self.idx(n)] {
                    stack.push(n);
                }
            }
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let c = match self.color_at((x, y)) {
                    Color::Black => 'B',
                    Color::White => 'W',
                    Color::Empty => '+',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
