use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Player number as shown to humans (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player 1",
            Player::Two => "Player 2",
        }
    }

    /// Pick one of the two players uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Player {
        if rng.random_bool(0.5) {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// Who opens a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartingPlayer {
    /// Uniform draw between the two players at session creation.
    #[default]
    Random,
    One,
    Two,
}

impl StartingPlayer {
    pub fn fixed(player: Player) -> Self {
        match player {
            Player::One => StartingPlayer::One,
            Player::Two => StartingPlayer::Two,
        }
    }

    /// Resolve to a concrete player, drawing from `rng` only for `Random`.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Player {
        match self {
            StartingPlayer::Random => Player::random(rng),
            StartingPlayer::One => Player::One,
            StartingPlayer::Two => Player::Two,
        }
    }
}

impl std::str::FromStr for StartingPlayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(StartingPlayer::Random),
            "one" | "1" => Ok(StartingPlayer::One),
            "two" | "2" => Ok(StartingPlayer::Two),
            other => Err(format!(
                "unknown starting player '{other}' (expected 'random', 'one' or 'two')"
            )),
        }
    }
}
