use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::MAX_SIZE;
use crate::error::GoError;
use crate::score::OutcomePolicy;
use crate::storage::StorageError;
use crate::territory::ScoringTechnique;

/// Settings for a batch of simulated games.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub board_size: u8,
    pub games: usize,
    /// Ply limit per game, passes included.
    pub max_moves: usize,
    pub technique: ScoringTechnique,
    pub outcome: OutcomePolicy,
    /// Base seed; each game derives its players' seeds from it. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            games: 100,
            max_moves: 65,
            technique: ScoringTechnique::default(),
            outcome: OutcomePolicy::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StorageError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn validate(&self) -> Result<(), GoError> {
        if self.board_size == 0 || self.board_size > MAX_SIZE {
            return Err(GoError::InvalidSize(self.board_size));
        }
        Ok(())
    }
}
