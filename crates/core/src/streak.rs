//! Streak Tracker
//!
//! Keeps the signed run of consecutive wins (positive) or losses (negative)
//! and decides when the one-shot happy or sad reaction is due.

use crate::{collaborators::Reaction, context::SessionContext, game::Outcome};

/// Streak value at which the happy reaction fires; its negation fires the sad one.
pub const REACTION_THRESHOLD: i32 = 2;

/// Advances the streak by one outcome.
///
/// A win after a losing run lands on zero rather than flipping sign, and the
/// same holds for a loss after a winning run. Ties leave the streak alone.
pub fn update(seq_streak: i32, outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Won => (seq_streak + 1).max(0),
        Outcome::Lost => (seq_streak - 1).min(0),
        Outcome::Tie => seq_streak,
    }
}

/// Applies `outcome` to the context's streak and returns the reaction to
/// play, if one is due for the first time this session.
pub fn advance(ctx: &mut SessionContext, outcome: Outcome) -> Option<Reaction> {
    ctx.seq_streak = update(ctx.seq_streak, outcome);

    if !ctx.shown_win_reaction && ctx.seq_streak == REACTION_THRESHOLD {
        ctx.shown_win_reaction = true;
        return Some(Reaction::Happy);
    }
    if !ctx.shown_lose_reaction && ctx.seq_streak == -REACTION_THRESHOLD {
        ctx.shown_lose_reaction = true;
        return Some(Reaction::Sad);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use Outcome::*;

    fn run(outcomes: &[Outcome]) -> Vec<i32> {
        let mut streak = 0;
        outcomes
            .iter()
            .map(|&o| {
                streak = update(streak, o);
                streak
            })
            .collect()
    }

    #[test]
    fn test_tie_is_streak_neutral() {
        assert_eq!(run(&[Won, Won, Tie]), vec![1, 2, 2]);
        assert_eq!(run(&[Lost, Tie, Tie]), vec![-1, -1, -1]);
    }

    #[test]
    fn test_direction_change_clamps_to_zero() {
        assert_eq!(run(&[Won, Won, Lost]), vec![1, 2, 0]);
        assert_eq!(run(&[Lost, Lost, Won, Won]), vec![-1, -2, 0, 1]);
    }

    #[test]
    fn test_reactions_fire_once_per_session() {
        let mut ctx = SessionContext::default();
        let fired: Vec<Option<Reaction>> = [Won, Won, Lost, Lost, Won, Won]
            .into_iter()
            .map(|o| advance(&mut ctx, o))
            .collect();

        assert_eq!(
            fired,
            vec![None, Some(Reaction::Happy), None, None, None, None]
        );
        assert!(ctx.shown_win_reaction);
        assert!(!ctx.shown_lose_reaction, "streak only reached -1");
    }

    #[test]
    fn test_sad_reaction_on_losing_run() {
        let mut ctx = SessionContext::default();
        assert_eq!(advance(&mut ctx, Lost), None);
        assert_eq!(advance(&mut ctx, Lost), Some(Reaction::Sad));
        assert_eq!(advance(&mut ctx, Won), None);
        assert_eq!(advance(&mut ctx, Lost), None);
        assert_eq!(advance(&mut ctx, Lost), None);
        assert_eq!(ctx.seq_streak, -2);
    }
}
