//! One-on-one match evaluation.

use super::types::{Allocation, CastleSet, ScoringMode};
use std::cmp::Ordering;

/// Outcome of a single match, as seen from the first side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Result of comparing point totals: `Greater` means the first side won.
    Wins(Ordering),
    /// Raw points earned by each side.
    Points { first: u64, second: u64 },
}

impl MatchOutcome {
    /// The same outcome seen from the second side.
    pub fn reversed(self) -> Self {
        match self {
            MatchOutcome::Wins(ord) => MatchOutcome::Wins(ord.reverse()),
            MatchOutcome::Points { first, second } => MatchOutcome::Points {
                first: second,
                second: first,
            },
        }
    }

    /// Fitness credited to the first and second side.
    pub fn credit(self) -> (u64, u64) {
        match self {
            MatchOutcome::Wins(Ordering::Greater) => (1, 0),
            MatchOutcome::Wins(Ordering::Less) => (0, 1),
            MatchOutcome::Wins(Ordering::Equal) => (0, 0),
            MatchOutcome::Points { first, second } => (first, second),
        }
    }
}

/// Plays `a` against `b` and returns the points earned by each side.
///
/// A castle goes to the side with strictly more soldiers there; a tie
/// awards its points to nobody.
pub fn battle(a: &Allocation, b: &Allocation, castles: &CastleSet) -> (u64, u64) {
    let mut score = 0u64;
    let mut o_score = 0u64;
    for ((soldiers, o_soldiers), &points) in a
        .soldiers()
        .iter()
        .zip(b.soldiers())
        .zip(castles.points())
    {
        match soldiers.cmp(o_soldiers) {
            Ordering::Greater => score += u64::from(points),
            Ordering::Less => o_score += u64::from(points),
            Ordering::Equal => (),
        }
    }
    (score, o_score)
}

/// Evaluates one match under `mode`.
pub fn evaluate_match(
    a: &Allocation,
    b: &Allocation,
    castles: &CastleSet,
    mode: ScoringMode,
) -> MatchOutcome {
    let (first, second) = battle(a, b, castles);
    match mode {
        ScoringMode::Wins => MatchOutcome::Wins(first.cmp(&second)),
        ScoringMode::Points => MatchOutcome::Points { first, second },
    }
}
