//! Lines the agent can say, with `{placeholder}` substitution.

use crate::{context::Tally, game::Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Play,
    LetsPlay,
    PlayAgain,
    Won,
    Lost,
    Tie,
    Okay,
    Score,
    DidNotGet,
    Reset,
}

impl Phrase {
    pub fn template(self) -> &'static str {
        match self {
            Phrase::Play => "Hello, do you want to play a game of rock, paper, scissors?",
            Phrase::LetsPlay => "Let's play!",
            Phrase::PlayAgain => "Do you want to play again?",
            Phrase::Won => "Yay, I won!",
            Phrase::Lost => "Oh no, I lost!",
            Phrase::Tie => "Oh, it's a tie!",
            Phrase::Okay => "Okay.",
            Phrase::Score => "The final score is: {wins} for me, {loses} for you, and {ties}!",
            Phrase::DidNotGet => "I did not get that. Please repeat!",
            Phrase::Reset => "I am going to reset the scores!",
        }
    }

    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Phrase::Won,
            Outcome::Lost => Phrase::Lost,
            Outcome::Tie => Phrase::Tie,
        }
    }

    /// Renders the template, replacing each placeholder token with its literal.
    pub fn render(self, substitutions: &[(&str, String)]) -> String {
        substitutions
            .iter()
            .fold(self.template().to_string(), |text, (token, value)| {
                text.replace(token, value)
            })
    }
}

/// "1 win", "2 wins", "0 ties".
fn counted(n: u32, singular: &str, plural: &str) -> String {
    format!("{n} {}", if n == 1 { singular } else { plural })
}

/// Substitutions for [`Phrase::Score`].
pub fn score_substitutions(tally: &Tally) -> Vec<(&'static str, String)> {
    vec![
        ("{wins}", counted(tally.won, "win", "wins")),
        ("{loses}", counted(tally.lost, "win", "wins")),
        ("{ties}", counted(tally.tie, "tie", "ties")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_substitutions_is_template() {
        assert_eq!(Phrase::Okay.render(&[]), "Okay.");
    }

    #[test]
    fn test_score_pluralization() {
        let tally = Tally {
            won: 2,
            tie: 0,
            lost: 1,
        };
        assert_eq!(
            Phrase::Score.render(&score_substitutions(&tally)),
            "The final score is: 2 wins for me, 1 win for you, and 0 ties!"
        );

        let tally = Tally {
            won: 1,
            tie: 1,
            lost: 3,
        };
        assert_eq!(
            Phrase::Score.render(&score_substitutions(&tally)),
            "The final score is: 1 win for me, 3 wins for you, and 1 tie!"
        );
    }

    #[test]
    fn test_outcome_phrases() {
        assert_eq!(Phrase::for_outcome(Outcome::Won), Phrase::Won);
        assert_eq!(Phrase::for_outcome(Outcome::Tie).template(), "Oh, it's a tie!");
    }
}
