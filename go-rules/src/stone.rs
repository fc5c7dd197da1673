use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;

use crate::error::GoError;

/// A player color. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    /// The player who makes the move with the given 1-based turn index.
    /// Turn 0 is the game-start sentinel and belongs to nobody.
    pub fn for_turn(turn: u32) -> Option<Self> {
        match turn {
            0 => None,
            t if t % 2 == 1 => Some(Stone::Black),
            _ => Some(Stone::White),
        }
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

impl Neg for Stone {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}

/// The content of a single intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Color {
    White = -1,
    #[default]
    Empty = 0,
    Black = 1,
}

impl Color {
    pub fn from_int(v: i8) -> Self {
        match v.signum() {
            1 => Color::Black,
            -1 => Color::White,
            _ => Color::Empty,
        }
    }

    pub fn to_int(self) -> i8 {
        self as i8
    }

    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }

    pub fn stone(self) -> Option<Stone> {
        match self {
            Color::Black => Some(Stone::Black),
            Color::White => Some(Stone::White),
            Color::Empty => None,
        }
    }

    /// The player color, or `InvalidColor` for an empty intersection.
    pub fn player(self) -> Result<Stone, GoError> {
        self.stone().ok_or(GoError::InvalidColor)
    }
}

impl From<Stone> for Color {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Color::Black,
            Stone::White => Color::White,
        }
    }
}

impl From<Option<Stone>> for Color {
    fn from(stone: Option<Stone>) -> Self {
        stone.map_or(Color::Empty, Color::from)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
            Color::Empty => write!(f, "Neither"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_parity_picks_player() {
        assert_eq!(Stone::for_turn(0), None);
        assert_eq!(Stone::for_turn(1), Some(Stone::Black));
        assert_eq!(Stone::for_turn(2), Some(Stone::White));
        assert_eq!(Stone::for_turn(81), Some(Stone::Black));
    }

    #[test]
    fn opponent() {
        assert_eq!(Stone::Black.opp(), Stone::White);
        assert_eq!(-Stone::White, Stone::Black);
    }

    #[test]
    fn color_from_int_normalizes() {
        assert_eq!(Color::from_int(5), Color::Black);
        assert_eq!(Color::from_int(-3), Color::White);
        assert_eq!(Color::from_int(0), Color::Empty);
    }

    #[test]
    fn empty_color_is_not_a_player() {
        assert_eq!(Color::Empty.player(), Err(GoError::InvalidColor));
        assert_eq!(Color::White.player(), Ok(Stone::White));
        assert_eq!(Color::from(Stone::Black), Color::Black);
        assert_eq!(Color::from(None), Color::Empty);
    }

    #[test]
    fn display() {
        assert_eq!(Stone::White.to_string(), "White");
        assert_eq!(Color::Empty.to_string(), "Neither");
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "-1");
        let stone: Stone = serde_json::from_str("1").unwrap();
        assert_eq!(stone, Stone::Black);
    }
}
