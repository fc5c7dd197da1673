use arrayvec::ArrayVec;

use crate::Point;
use crate::stone::Color;

/// One intersection of the board.
///
/// Neighbours are stored as coordinates, computed once from the position when
/// the board is built. Only the color changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: u8,
    y: u8,
    color: Color,
    neighbors: ArrayVec<Point, 4>,
}

impl Cell {
    pub(crate) fn new((x, y): Point, size: u8) -> Self {
        let mut neighbors = ArrayVec::new();
        if x > 0 {
            neighbors.push((x - 1, y));
        }
        if x + 1 < size {
            neighbors.push((x + 1, y));
        }
        if y > 0 {
            neighbors.push((x, y - 1));
        }
        if y + 1 < size {
            neighbors.push((x, y + 1));
        }

        Cell {
            x,
            y,
            color: Color::Empty,
            neighbors,
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn point(&self) -> Point {
        (self.x, self.y)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_empty()
    }

    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    /// Number of orthogonal neighbours: 4 inside, 3 on an edge, 2 in a corner.
    pub fn max_degree(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_depends_on_position() {
        assert_eq!(Cell::new((0, 0), 9).max_degree(), 2);
        assert_eq!(Cell::new((8, 8), 9).max_degree(), 2);
        assert_eq!(Cell::new((0, 4), 9).max_degree(), 3);
        assert_eq!(Cell::new((4, 8), 9).max_degree(), 3);
        assert_eq!(Cell::new((4, 4), 9).max_degree(), 4);
    }

    #[test]
    fn single_point_board_has_no_neighbors() {
        let cell = Cell::new((0, 0), 1);
        assert_eq!(cell.max_degree(), 0);
        assert!(cell.neighbors().is_empty());
    }

    #[test]
    fn neighbors_are_orthogonal() {
        let cell = Cell::new((2, 3), 9);
        assert_eq!(cell.neighbors(), &[(1, 3), (3, 3), (2, 2), (2, 4)]);
        assert!(cell.is_empty());
        assert_eq!(cell.point(), (2, 3));
    }
}
