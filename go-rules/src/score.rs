use serde::{Deserialize, Serialize};

use crate::stone::Stone;

/// Compensation added to White's total for moving second.
pub const KOMI: f64 = 2.5;

/// Per-color score breakdown: territory (empty points) and stones captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub territory: u32,
    pub captures: u32,
}

impl PlayerPoints {
    pub fn total(&self) -> u32 {
        self.territory + self.captures
    }
}

/// Full score breakdown for both players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub black: PlayerPoints,
    pub white: PlayerPoints,
    pub komi: f64,
}

impl GameScore {
    pub fn black_total(&self) -> f64 {
        self.black.total() as f64
    }

    pub fn white_total(&self) -> f64 {
        self.white.total() as f64 + self.komi
    }

    /// Black's margin over White. Negative when White is ahead.
    pub fn differential(&self) -> f64 {
        self.black_total() - self.white_total()
    }

    /// White wins only with a strictly higher total; equal totals go to Black.
    pub fn winner(&self) -> Stone {
        if self.white_total() > self.black_total() {
            Stone::White
        } else {
            Stone::Black
        }
    }

    pub fn result(&self) -> String {
        format_result(self.black_total(), self.white_total())
    }
}

/// How a finished game is turned into a value stored in the move tree.
/// Values are always from Black's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomePolicy {
    /// Black total minus White total.
    ScoreDifferential,
    /// 1.0 when Black wins (ties included), otherwise 0.0.
    #[default]
    WinLoss,
}

impl OutcomePolicy {
    pub fn value(self, score: &GameScore) -> f64 {
        match self {
            OutcomePolicy::ScoreDifferential => score.differential(),
            OutcomePolicy::WinLoss => {
                if score.winner() == Stone::Black {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl std::str::FromStr for OutcomePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score_differential" => Ok(OutcomePolicy::ScoreDifferential),
            "win_loss" => Ok(OutcomePolicy::WinLoss),
            _ => Err(format!("unknown outcome policy: {s}")),
        }
    }
}

/// Format the game result string from final scores.
///
/// Returns "B+{diff}", "W+{diff}", or "Draw".
pub fn format_result(black_score: f64, white_score: f64) -> String {
    let diff = black_score - white_score;
    if diff > 0.0 {
        format!("B+{diff}")
    } else if diff < 0.0 {
        format!("W+{}", -diff)
    } else {
        "Draw".to_string()
    }
}
