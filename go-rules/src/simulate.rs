//! Self-play: drive two [`Player`]s through a game and feed the results into a [`GameTree`].

use tracing::{debug, info, trace};

use crate::config::SimulationConfig;
use crate::error::GoError;
use crate::game::Game;
use crate::game_tree::GameTree;
use crate::player::{Player, RandomPlayer, TreePlayer};
use crate::stone::Stone;

/// Totals for a batch of simulated games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
}

impl SimulationSummary {
    pub fn wins(&self, stone: Stone) -> usize {
        match stone {
            Stone::Black => self.black_wins,
            Stone::White => self.white_wins,
        }
    }

    pub fn win_rate(&self, stone: Stone) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins(stone) as f64 / self.games as f64
    }

    fn record(&mut self, winner: Stone) {
        self.games += 1;
        match winner {
            Stone::Black => self.black_wins += 1,
            Stone::White => self.white_wins += 1,
        }
    }
}

/// Play one game to completion.
///
/// Stops after two consecutive passes, once `config.max_moves` plies are on
/// record, or when the player to move has no legal point. A player that
/// returns an illegal point passes instead.
pub fn simulate_game(
    black: &mut dyn Player,
    white: &mut dyn Player,
    config: &SimulationConfig,
) -> Result<Game, GoError> {
    let mut game = Game::new(config.board_size)?;

    while !game.is_game_over() && !game.game_end(config.max_moves) {
        let player: &mut dyn Player = match game.current_player() {
            Stone::Black => &mut *black,
            Stone::White => &mut *white,
        };
        match player.choose_move(&game) {
            Some(point) if game.is_legal(point) => {
                game.play_move(point);
            }
            Some(point) => {
                trace!(?point, player = %game.current_player(), "illegal choice, passing");
                game.pass_turn();
            }
            None => game.pass_turn(),
        }
    }

    debug!(plies = game.moves().len(), over = game.is_game_over(), "game finished");
    Ok(game)
}

/// Run `config.games` games of a random Black against a tree-guided White,
/// inserting every finished game into `tree`.
pub fn simulate_games(
    tree: &mut GameTree,
    config: &SimulationConfig,
) -> Result<SimulationSummary, GoError> {
    config.validate()?;

    let mut summary = SimulationSummary::default();
    for i in 0..config.games {
        let game = {
            let (mut black, mut white) = match config.seed {
                Some(seed) => {
                    let base = seed.wrapping_add(2 * i as u64);
                    (
                        RandomPlayer::with_seed(base),
                        TreePlayer::with_seed(tree, base.wrapping_add(1)),
                    )
                }
                None => (RandomPlayer::new(), TreePlayer::new(tree)),
            };
            simulate_game(&mut black, &mut white, config)?
        };

        let score = game.overall_score(config.technique);
        tree.insert_game(&game, config.outcome, config.technique);
        summary.record(score.winner());
        debug!(game = i + 1, result = %score.result(), nodes = tree.len(), "recorded game");
    }

    info!(
        games = summary.games,
        black_wins = summary.black_wins,
        white_wins = summary.white_wins,
        nodes = tree.len(),
        "simulation finished"
    );
    Ok(summary)
}
