use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::Point;
use crate::board::Board;
use crate::error::GoError;
use crate::score::{GameScore, KOMI, OutcomePolicy, PlayerPoints};
use crate::stone::{Color, Stone};
use crate::territory::ScoringTechnique;
use crate::turn::Move;

/// Stones captured BY each color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// A game in progress: the board, whose turn it is, the move history and capture tallies.
///
/// Black moves on odd turns and White on even turns, so the player to move is
/// always implied by the length of the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    board: Board,
    current: Stone,
    moves: Vec<Move>,
    captures: Captures,
}

impl Game {
    pub fn new(size: u8) -> Result<Self, GoError> {
        Ok(Self::with_board(Board::new(size)?))
    }

    /// Start a game from a prepared position. Black moves first.
    pub fn with_board(board: Board) -> Self {
        Game {
            board,
            current: Stone::Black,
            moves: Vec::new(),
            captures: Captures::default(),
        }
    }

    /// Replay a recorded history onto an empty board.
    ///
    /// Turn numbers must run 1, 2, 3, ... and every play must target an empty point.
    pub fn with_moves(size: u8, moves: &[Move]) -> Result<Self, GoError> {
        let mut game = Game::new(size)?;
        for mv in moves {
            if mv.turn != game.last_turn_num() + 1 {
                let (t, x, y) = mv.to_triple();
                return Err(GoError::InvalidMove(t, x, y));
            }
            match mv.pos {
                Some(point) if !game.board.on_board(point) => return Err(GoError::NotOnBoard),
                Some(point) => {
                    if !game.play_move(point) {
                        return Err(GoError::Overwrite);
                    }
                }
                None => game.pass_turn(),
            }
        }
        Ok(game)
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.board.size()
    }

    pub fn current_player(&self) -> Stone {
        self.current
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn last_turn_num(&self) -> u32 {
        self.moves.len() as u32
    }

    /// Points of the history in order, `None` for passes.
    pub fn played_moves(&self) -> Vec<Option<Point>> {
        self.moves.iter().map(|m| m.pos).collect()
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    /// Turn number and player of the first move played at `point`.
    pub fn move_info(&self, point: Point) -> Option<(u32, Stone)> {
        self.moves
            .iter()
            .find(|m| m.pos == Some(point))
            .and_then(|m| Some((m.turn, m.stone()?)))
    }

    // -- Game actions --

    /// Place the current player's stone at `point` and resolve captures.
    ///
    /// Returns false, leaving the game untouched, if the point is off the board
    /// or occupied. Suicide is not checked here; see [`Game::is_legal`].
    pub fn play_move(&mut self, point: Point) -> bool {
        if self.board.cell(point).is_none_or(|cell| !cell.is_empty()) {
            trace!(?point, player = %self.current, "rejected move on occupied point");
            return false;
        }

        let stone = self.current;
        if self.board.add_stone(point, stone.into()).is_err() {
            return false;
        }
        self.moves.push(Move::play(self.last_turn_num() + 1, point));

        let opponent = Color::from(stone.opp());
        let neighbors: ArrayVec<Point, 4> = self.board.neighbors(point).iter().copied().collect();
        for n in neighbors {
            if self.board.color_at(n) != opponent || !self.board.is_dead(n) {
                continue;
            }
            let captured = self.board.capture_group(n);
            debug_assert!(captured.is_ok(), "dead group at {n:?} not captured: {captured:?}");
            self.captures.add(stone, captured.unwrap_or(0));
        }

        self.current = stone.opp();
        true
    }

    pub fn pass_turn(&mut self) {
        debug!(turn = self.last_turn_num() + 1, player = %self.current, "pass");
        self.moves.push(Move::pass(self.last_turn_num() + 1));
        self.current = self.current.opp();
    }

    /// Whether the current player may legally play at `point`.
    pub fn is_legal(&self, point: Point) -> bool {
        matches!(self.board.is_legal_move(point, self.current.into()), Ok(true))
    }

    /// Every legal point for the current player, scanned x outer, y inner.
    pub fn available_moves(&self) -> Vec<Point> {
        self.board
            .cells()
            .iter()
            .map(|cell| cell.point())
            .filter(|&point| self.is_legal(point))
            .collect()
    }

    /// Two consecutive passes end the game.
    pub fn is_game_over(&self) -> bool {
        matches!(self.moves.as_slice(), [.., a, b] if a.is_pass() && b.is_pass())
    }

    /// True once `max_moves` plies have been played or the current player has no legal move.
    pub fn game_end(&self, max_moves: usize) -> bool {
        self.moves.len() >= max_moves || self.available_moves().is_empty()
    }

    // -- Scoring --

    /// Territory plus captures for each color; White also receives [`KOMI`].
    pub fn overall_score(&self, technique: ScoringTechnique) -> GameScore {
        let territory = self.board.calculate_score(technique);
        GameScore {
            black: PlayerPoints {
                territory: territory.count(Stone::Black),
                captures: self.captures.black,
            },
            white: PlayerPoints {
                territory: territory.count(Stone::White),
                captures: self.captures.white,
            },
            komi: KOMI,
        }
    }

    /// Whether `player` is ahead under the default technique. Equal totals count as a Black win.
    pub fn is_winner(&self, player: Stone) -> bool {
        self.overall_score(ScoringTechnique::default()).winner() == player
    }

    /// The value this game contributes to a move tree.
    pub fn outcome(&self, policy: OutcomePolicy, technique: ScoringTechnique) -> f64 {
        policy.value(&self.overall_score(technique))
    }
}
