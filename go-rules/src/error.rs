use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    InvalidColor,
    NotOnBoard,
    Overwrite,
    GroupAlive,
    InvalidSize(u8),
    InvalidMove(i32, i32, i32),
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::InvalidColor => write!(f, "invalid color: expected black or white"),
            GoError::NotOnBoard => write!(f, "not on board"),
            GoError::Overwrite => write!(f, "overwrite"),
            GoError::GroupAlive => write!(f, "group still has liberties"),
            GoError::InvalidSize(size) => write!(f, "invalid board size: {size}"),
            GoError::InvalidMove(t, x, y) => write!(f, "invalid move: ({t}, {x}, {y})"),
        }
    }
}

impl std::error::Error for GoError {}
