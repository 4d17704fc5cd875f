//! Round-robin fitness evaluation.
//!
//! Every unordered pair of individuals plays exactly one match, and the
//! outcome is credited to both sides. A population of `n` therefore costs
//! `n(n-1)/2` matches per generation, which dominates the engine's runtime.

use crate::blotto::{evaluate_match, Allocation, CastleSet, ScoringMode};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

/// Plays the full round-robin tournament and returns one fitness value per
/// individual, aligned with `population`.
///
/// Under [`ScoringMode::Wins`] each match adds 1 to the winner and nothing
/// on a draw; under [`ScoringMode::Points`] each side adds the castle points
/// it earned.
///
/// With `parallel` set (and the `parallel` feature enabled) rows of the
/// pair matrix are spread over the rayon pool. Each worker accumulates into
/// its own vector and the vectors are summed at the end, so the result is
/// identical to the sequential path.
#[instrument(level = "debug", skip_all, fields(population = population.len(), mode = %mode))]
pub fn evaluate_population(
    population: &[Allocation],
    castles: &CastleSet,
    mode: ScoringMode,
    parallel: bool,
) -> Vec<u64> {
    if parallel {
        round_robin_parallel(population, castles, mode)
    } else {
        round_robin(population, castles, mode)
    }
}

/// Plays individual `i` against every `j > i`, crediting both into `scores`.
fn play_row(
    population: &[Allocation],
    castles: &CastleSet,
    mode: ScoringMode,
    i: usize,
    scores: &mut [u64],
) {
    let me = &population[i];
    for (j, other) in population.iter().enumerate().skip(i + 1) {
        let (mine, theirs) = evaluate_match(me, other, castles, mode).credit();
        scores[i] += mine;
        scores[j] += theirs;
    }
}

fn round_robin(population: &[Allocation], castles: &CastleSet, mode: ScoringMode) -> Vec<u64> {
    let mut scores = vec![0u64; population.len()];
    for i in 0..population.len() {
        play_row(population, castles, mode, i, &mut scores);
    }
    scores
}

#[cfg(feature = "parallel")]
fn round_robin_parallel(
    population: &[Allocation],
    castles: &CastleSet,
    mode: ScoringMode,
) -> Vec<u64> {
    let n = population.len();
    (0..n)
        .into_par_iter()
        .fold(
            || vec![0u64; n],
            |mut scores, i| {
                play_row(population, castles, mode, i, &mut scores);
                scores
            },
        )
        .reduce(
            || vec![0u64; n],
            |mut total, partial| {
                for (t, p) in total.iter_mut().zip(partial) {
                    *t += p;
                }
                total
            },
        )
}

#[cfg(not(feature = "parallel"))]
fn round_robin_parallel(
    population: &[Allocation],
    castles: &CastleSet,
    mode: ScoringMode,
) -> Vec<u64> {
    round_robin(population, castles, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::{initialize_population, InitStrategy};
    use crate::random::create_rng;

    fn population(rows: &[&[u32]]) -> Vec<Allocation> {
        rows.iter()
            .map(|r| Allocation::new(r.to_vec(), r.iter().sum()).unwrap())
            .collect()
    }

    #[test]
    fn test_evaluate_individuals_wars_won() {
        let pop = population(&[&[1, 2], &[2, 1], &[0, 3]]);
        let castles = CastleSet::new(vec![5, 10]).unwrap();
        let scores = evaluate_population(&pop, &castles, ScoringMode::Wins, false);
        assert_eq!(scores, vec![1, 0, 2]);
    }

    #[test]
    fn test_evaluate_individuals_points() {
        let pop = population(&[&[1, 2], &[2, 1], &[0, 3]]);
        let castles = CastleSet::new(vec![5, 10]).unwrap();
        let scores = evaluate_population(&pop, &castles, ScoringMode::Points, false);
        assert_eq!(scores, vec![15, 10, 20]);
    }

    #[test]
    fn test_draws_score_nothing() {
        let pop = population(&[&[2, 2], &[2, 2], &[2, 2]]);
        let castles = CastleSet::new(vec![1, 1]).unwrap();
        for mode in [ScoringMode::Wins, ScoringMode::Points] {
            assert_eq!(evaluate_population(&pop, &castles, mode, false), vec![0, 0, 0]);
        }
    }

    #[test]
    fn test_single_individual_scores_zero() {
        let pop = population(&[&[4, 6]]);
        let castles = CastleSet::new(vec![1, 2]).unwrap();
        assert_eq!(
            evaluate_population(&pop, &castles, ScoringMode::Points, true),
            vec![0]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut rng = create_rng(21);
        let castles = CastleSet::ascending(6).unwrap();
        let pop = initialize_population(60, 50, 6, InitStrategy::StickBreaking, &mut rng).unwrap();
        for mode in [ScoringMode::Wins, ScoringMode::Points] {
            assert_eq!(
                evaluate_population(&pop, &castles, mode, true),
                evaluate_population(&pop, &castles, mode, false),
            );
        }
    }

    #[test]
    fn test_points_total_bounded_by_castle_value() {
        let mut rng = create_rng(4);
        let castles = CastleSet::ascending(5).unwrap();
        let n = 12u64;
        let pop = initialize_population(n as usize, 30, 5, InitStrategy::StarsAndBars, &mut rng)
            .unwrap();
        let total: u64 = evaluate_population(&pop, &castles, ScoringMode::Points, false)
            .iter()
            .sum();
        assert!(total <= n * (n - 1) / 2 * castles.total_points());
    }
}
