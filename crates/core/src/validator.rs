//! Turns free-form recognized text into answers the game understands.

use crate::{collaborators::RecognitionResult, error::RecognitionError, game::Move};

fn text_of(result: Option<&RecognitionResult>) -> Result<&str, RecognitionError> {
    let text = result.map(|r| r.text.trim()).ok_or(RecognitionError::Absent)?;
    if text.is_empty() {
        return Err(RecognitionError::Absent);
    }
    Ok(text)
}

/// Interprets a yes/no answer.
///
/// "yes" must appear as a whole word, "yeah" anywhere, "no" as a whole word.
/// Answers containing both a yes and a no are rejected.
pub fn validate_consent(result: Option<&RecognitionResult>) -> Result<bool, RecognitionError> {
    let text = text_of(result)?;
    let lowered = text.to_lowercase();
    let tokens = lowered.split(|c: char| !c.is_alphanumeric());

    let (mut yes, mut no) = (lowered.contains("yeah"), false);
    for token in tokens {
        match token {
            "yes" => yes = true,
            "no" => no = true,
            _ => {}
        }
    }

    match (yes, no) {
        (true, false) => Ok(true),
        (false, true) => Ok(false),
        _ => Err(RecognitionError::Ambiguous {
            text: text.to_string(),
        }),
    }
}

/// Interprets a move. The whole answer must be exactly one move word.
pub fn validate_move(result: Option<&RecognitionResult>) -> Result<Move, RecognitionError> {
    let text = text_of(result)?;
    let lowered = text.to_lowercase();
    Move::ALL
        .into_iter()
        .find(|m| m.as_word() == lowered)
        .ok_or_else(|| RecognitionError::Ambiguous {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heard(text: &str) -> RecognitionResult {
        RecognitionResult::new(text)
    }

    #[test]
    fn test_consent_accepts_yes_variants() {
        assert_eq!(validate_consent(Some(&heard("yes"))), Ok(true));
        assert_eq!(validate_consent(Some(&heard("Yeah sure"))), Ok(true));
        assert_eq!(validate_consent(Some(&heard("YES, please!"))), Ok(true));
    }

    #[test]
    fn test_consent_accepts_no() {
        assert_eq!(validate_consent(Some(&heard("No"))), Ok(false));
        assert_eq!(validate_consent(Some(&heard("no thanks"))), Ok(false));
    }

    #[test]
    fn test_consent_rejects_unclear_answers() {
        assert_eq!(
            validate_consent(Some(&heard("maybe"))),
            Err(RecognitionError::Ambiguous {
                text: "maybe".into()
            })
        );
        assert!(validate_consent(Some(&heard("yes no"))).is_err());
        // Whole-word match only: "nothing" and "yesterday" are not answers.
        assert!(validate_consent(Some(&heard("nothing"))).is_err());
        assert!(validate_consent(Some(&heard("yesterday"))).is_err());
    }

    #[test]
    fn test_consent_absent_and_empty() {
        assert_eq!(validate_consent(None), Err(RecognitionError::Absent));
        assert_eq!(
            validate_consent(Some(&heard("   "))),
            Err(RecognitionError::Absent)
        );
    }

    #[test]
    fn test_move_accepts_exact_words() {
        assert_eq!(validate_move(Some(&heard("Rock"))), Ok(Move::Rock));
        assert_eq!(validate_move(Some(&heard("paper"))), Ok(Move::Paper));
        assert_eq!(validate_move(Some(&heard(" SCISSORS "))), Ok(Move::Scissors));
    }

    #[test]
    fn test_move_rejects_everything_else() {
        assert!(matches!(
            validate_move(Some(&heard("rock paper"))),
            Err(RecognitionError::Ambiguous { .. })
        ));
        assert!(validate_move(Some(&heard("I pick rock"))).is_err());
        assert!(validate_move(Some(&heard("lizard"))).is_err());
        assert_eq!(validate_move(None), Err(RecognitionError::Absent));
    }
}
