pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod game;
pub mod game_tree;
pub mod player;
pub mod score;
pub mod simulate;
pub mod stone;
pub mod storage;
pub mod territory;
pub mod turn;

/// `(x, y)`, both zero-based.
pub type Point = (u8, u8);

pub use board::{Board, MAX_SIZE};
pub use cell::Cell;
pub use config::SimulationConfig;
pub use error::GoError;
pub use game::{Captures, Game};
pub use game_tree::{Aggregation, Criterion, GameTree, NodeId, TreeNode};
pub use player::{AdjacentPlayer, Player, RandomPlayer, TreePlayer};
pub use score::{GameScore, KOMI, OutcomePolicy, PlayerPoints};
pub use simulate::{SimulationSummary, simulate_game, simulate_games};
pub use stone::{Color, Stone};
pub use storage::StorageError;
pub use territory::{ScoringTechnique, Territory};
pub use turn::Move;
