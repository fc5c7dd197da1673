//! Move-selection strategies.
//!
//! Every strategy implements [`Player`]; the board and the move tree know
//! nothing about them.

use fastrand::Rng;
use tracing::trace;

use crate::Point;
use crate::game::Game;
use crate::game_tree::{Criterion, GameTree};

pub trait Player {
    /// The point to play next, or `None` to pass.
    fn choose_move(&mut self, game: &Game) -> Option<Point>;
}

/// Uniform choice among the legal moves, or `None` when there are none.
fn random_move(rng: &mut Rng, game: &Game) -> Option<Point> {
    let moves = game.available_moves();
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// Plays a uniformly random legal move.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, game: &Game) -> Option<Point> {
        random_move(&mut self.rng, game)
    }
}

/// Plays next to the most recently placed stone when it can, anywhere legal otherwise.
#[derive(Debug, Clone)]
pub struct AdjacentPlayer {
    rng: Rng,
}

impl AdjacentPlayer {
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for AdjacentPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AdjacentPlayer {
    fn choose_move(&mut self, game: &Game) -> Option<Point> {
        let last = game.moves().iter().rev().find_map(|m| m.pos);
        let candidates: Vec<Point> = last
            .map(|p| {
                game.board()
                    .neighbors(p)
                    .iter()
                    .copied()
                    .filter(|&n| game.is_legal(n))
                    .collect()
            })
            .unwrap_or_default();

        if candidates.is_empty() {
            return random_move(&mut self.rng, game);
        }
        Some(candidates[self.rng.usize(..candidates.len())])
    }
}

/// Follows the game's history down a [`GameTree`] and plays the best recorded reply.
///
/// Falls back to a random legal move once the game leaves the tree or the
/// recorded reply is not legal on the current board.
#[derive(Debug, Clone)]
pub struct TreePlayer<'a> {
    tree: &'a GameTree,
    rng: Rng,
}

impl<'a> TreePlayer<'a> {
    pub fn new(tree: &'a GameTree) -> Self {
        Self {
            tree,
            rng: Rng::new(),
        }
    }

    pub fn with_seed(tree: &'a GameTree, seed: u64) -> Self {
        Self {
            tree,
            rng: Rng::with_seed(seed),
        }
    }

    fn tree_move(&self, game: &Game) -> Option<Option<Point>> {
        let node = self.tree.find_path(game.moves())?;
        let criterion = Criterion::for_player(game.current_player());
        let best = self.tree.best_child(node, criterion)?;
        match self.tree.node(best).mv.pos {
            Some(point) if game.is_legal(point) => Some(Some(point)),
            Some(_) => None,
            None => Some(None),
        }
    }
}

impl Player for TreePlayer<'_> {
    fn choose_move(&mut self, game: &Game) -> Option<Point> {
        match self.tree_move(game) {
            Some(choice) => choice,
            None => {
                trace!(turn = game.last_turn_num() + 1, "no usable tree move, playing randomly");
                random_move(&mut self.rng, game)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::turn::Move;

    #[test]
    fn random_player_picks_legal_moves() {
        let mut game = Game::new(5).unwrap();
        let mut player = RandomPlayer::with_seed(7);
        for _ in 0..10 {
            let point = player.choose_move(&game).unwrap();
            assert!(game.is_legal(point));
            assert!(game.play_move(point));
        }
    }

    #[test]
    fn random_player_is_reproducible() {
        let game = Game::new(9).unwrap();
        let a = RandomPlayer::with_seed(42).choose_move(&game);
        let b = RandomPlayer::with_seed(42).choose_move(&game);
        assert_eq!(a, b);
    }

    #[test]
    fn random_player_passes_without_legal_moves() {
        let game = Game::new(1).unwrap();
        assert!(game.available_moves().is_empty());
        assert_eq!(RandomPlayer::with_seed(1).choose_move(&game), None);
    }

    #[test]
    fn adjacent_player_plays_next_to_last_stone() {
        let mut game = Game::new(9).unwrap();
        game.play_move((4, 4));
        let mut player = AdjacentPlayer::with_seed(3);
        for _ in 0..5 {
            let point = player.choose_move(&game).unwrap();
            assert!(game.board().neighbors((4, 4)).contains(&point));
        }
    }

    #[test]
    fn adjacent_player_falls_back_when_boxed_in() {
        let board = Board::from_layout(&["+B++", "B+B+", "+B++", "++++"]).unwrap();
        let mut game = Game::with_board(board);
        game.play_move((1, 1));
        // Every neighbour of (1,1) is now Black.
        let point = AdjacentPlayer::with_seed(5).choose_move(&game).unwrap();
        assert!(game.is_legal(point));
        assert!(!game.board().neighbors((1, 1)).contains(&point));
    }

    #[test]
    fn tree_player_follows_best_reply() {
        let mut tree = GameTree::new();
        tree.insert_sequence(&[Move::play(1, (2, 2)), Move::play(2, (6, 6))], 1.0);
        tree.insert_sequence(&[Move::play(1, (2, 2)), Move::play(2, (3, 3))], 0.0);
        tree.insert_sequence(&[Move::play(1, (4, 4))], 0.5);
        tree.update_aggregate_values();

        let mut game = Game::new(9).unwrap();
        let mut player = TreePlayer::with_seed(&tree, 1);
        // Root: (2,2) averages 0.5, (4,4) is 0.5; Black takes the first.
        assert_eq!(player.choose_move(&game), Some((2, 2)));

        game.play_move((2, 2));
        // White minimises Black's value.
        assert_eq!(player.choose_move(&game), Some((3, 3)));
    }

    #[test]
    fn tree_player_falls_back_off_tree() {
        let mut tree = GameTree::new();
        tree.insert_sequence(&[Move::play(1, (0, 0))], 1.0);

        let mut game = Game::new(5).unwrap();
        game.play_move((4, 4));
        let point = TreePlayer::with_seed(&tree, 9).choose_move(&game).unwrap();
        assert!(game.is_legal(point));
    }

    #[test]
    fn tree_player_skips_illegal_reply() {
        let mut tree = GameTree::new();
        tree.insert_sequence(&[Move::play(1, (0, 0))], 1.0);

        let board = Board::from_layout(&["W++", "+++", "+++"]).unwrap();
        let game = Game::with_board(board);
        let point = TreePlayer::with_seed(&tree, 2).choose_move(&game).unwrap();
        assert_ne!(point, (0, 0));
        assert!(game.is_legal(point));
    }
}
