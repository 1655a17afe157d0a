//! Moves, outcomes and round resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three hand signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The lowercase word a player says for this move.
    pub fn as_word(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }

    /// Returns true if `self` beats `other`.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_word())
    }
}

/// The result of a round, always from the agent's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Tie,
    Lost,
}

/// Resolves a round. `Won` means the robot's move beat the user's.
pub fn resolve(user: Move, robot: Move) -> Outcome {
    if robot.beats(user) {
        Outcome::Won
    } else if user.beats(robot) {
        Outcome::Lost
    } else {
        Outcome::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_full_table() {
        use Move::*;
        let cases = [
            (Rock, Rock, Outcome::Tie),
            (Rock, Paper, Outcome::Won),
            (Rock, Scissors, Outcome::Lost),
            (Paper, Rock, Outcome::Lost),
            (Paper, Paper, Outcome::Tie),
            (Paper, Scissors, Outcome::Won),
            (Scissors, Rock, Outcome::Won),
            (Scissors, Paper, Outcome::Lost),
            (Scissors, Scissors, Outcome::Tie),
        ];
        for (user, robot, expected) in cases {
            assert_eq!(
                resolve(user, robot),
                expected,
                "user={user} robot={robot}"
            );
        }
    }

    #[test]
    fn test_beats_is_antisymmetric() {
        for a in Move::ALL {
            assert!(!a.beats(a));
            for b in Move::ALL {
                if a != b {
                    assert_ne!(a.beats(b), b.beats(a));
                }
            }
        }
    }

    #[test]
    fn test_move_serialization() {
        assert_eq!(serde_json::to_string(&Move::Scissors).unwrap(), "\"scissors\"");
        let parsed: Outcome = serde_json::from_str("\"won\"").unwrap();
        assert_eq!(parsed, Outcome::Won);
    }
}
