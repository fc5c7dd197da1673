use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Point;
use crate::error::GoError;
use crate::stone::Stone;

/// A single ply: the 1-based turn index plus the point played, or `None` for a pass.
///
/// The tuple form `(turn, x, y)` uses `-1` for both coordinates of a pass.
/// [`Move::START`] (`(0, -1, -1)`) marks the beginning of a game and is the
/// move held by the root of a [`GameTree`](crate::GameTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub turn: u32,
    pub pos: Option<Point>,
}

impl Move {
    pub const START: Move = Move {
        turn: 0,
        pos: None,
    };

    pub fn play(turn: u32, point: Point) -> Self {
        Move {
            turn,
            pos: Some(point),
        }
    }

    pub fn pass(turn: u32) -> Self {
        Move { turn, pos: None }
    }

    pub fn is_start(&self) -> bool {
        self.turn == 0 && self.pos.is_none()
    }

    pub fn is_pass(&self) -> bool {
        self.turn > 0 && self.pos.is_none()
    }

    pub fn is_play(&self) -> bool {
        self.pos.is_some()
    }

    /// The player who made this move, by turn parity.
    pub fn stone(&self) -> Option<Stone> {
        Stone::for_turn(self.turn)
    }

    pub fn to_triple(&self) -> (i32, i32, i32) {
        match self.pos {
            Some((x, y)) => (self.turn as i32, x as i32, y as i32),
            None => (self.turn as i32, -1, -1),
        }
    }
}

impl From<Move> for (i32, i32, i32) {
    fn from(mv: Move) -> Self {
        mv.to_triple()
    }
}

/// Accepts `(turn, x, y)` with `(turn, -1, -1)` for a pass.
///
/// Placements need `turn >= 1`; turn 0 is reserved for [`Move::START`]. Board
/// listings that number cells from 0 must shift their index by one first,
/// matching [`Board::to_move_sequence`](crate::board::Board::to_move_sequence).
impl TryFrom<(i32, i32, i32)> for Move {
    type Error = GoError;

    fn try_from((turn, x, y): (i32, i32, i32)) -> Result<Self, Self::Error> {
        let invalid = GoError::InvalidMove(turn, x, y);
        let turn = u32::try_from(turn).map_err(|_| invalid.clone())?;
        match (x, y) {
            (-1, -1) => Ok(Move::pass(turn)),
            _ if turn == 0 => Err(invalid),
            _ => {
                let x = u8::try_from(x).map_err(|_| invalid.clone())?;
                let y = u8::try_from(y).map_err(|_| invalid)?;
                Ok(Move::play(turn, (x, y)))
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (turn, x, y) = self.to_triple();
        write!(f, "({turn}, {x}, {y})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_move() {
        let m = Move::play(3, (2, 5));
        assert!(m.is_play());
        assert!(!m.is_pass());
        assert_eq!(m.stone(), Some(Stone::Black));
        assert_eq!(m.to_triple(), (3, 2, 5));
    }

    #[test]
    fn pass_move() {
        let m = Move::pass(4);
        assert!(m.is_pass());
        assert!(!m.is_start());
        assert_eq!(m.stone(), Some(Stone::White));
        assert_eq!(m.to_triple(), (4, -1, -1));
    }

    #[test]
    fn start_sentinel_has_no_player() {
        assert!(Move::START.is_start());
        assert!(!Move::START.is_pass());
        assert_eq!(Move::START.stone(), None);
        assert_eq!(Move::START.to_string(), "(0, -1, -1)");
    }

    #[test]
    fn from_triple() {
        assert_eq!(Move::try_from((1, 0, 8)), Ok(Move::play(1, (0, 8))));
        assert_eq!(Move::try_from((6, -1, -1)), Ok(Move::pass(6)));
        assert_eq!(Move::try_from((0, -1, -1)), Ok(Move::START));
    }

    #[test]
    fn rejects_malformed_triples() {
        assert_eq!(
            Move::try_from((-1, -1, -1)),
            Err(GoError::InvalidMove(-1, -1, -1))
        );
        assert!(Move::try_from((2, -1, 3)).is_err());
        assert!(Move::try_from((2, 300, 3)).is_err());
        assert!(Move::try_from((0, 1, 1)).is_err());
    }

    #[test]
    fn board_listing_imports_after_shift() {
        let listing = crate::board::Board::new(2).unwrap().to_move_sequence();
        for mv in listing {
            let (turn, x, y) = mv.to_triple();
            assert_eq!(Move::try_from((turn, x, y)), Ok(mv));
            // Zero-based listings are off by one.
            assert_eq!(Move::try_from((turn - 1, x, y)).is_ok(), turn > 1);
        }
    }

    #[test]
    fn equality_includes_turn() {
        assert_eq!(Move::play(1, (1, 1)), Move::play(1, (1, 1)));
        assert_ne!(Move::play(1, (1, 1)), Move::play(3, (1, 1)));
    }
}
