//! Selection strategies for the GA.
//!
//! Selection determines which individuals are chosen as parents for
//! crossover. Fitness is maximized: more wins or more points is better.
//! Every strategy gives every individual a non-zero chance of being picked,
//! including those that scored nothing, so weak strategies can still pass
//! on their genes.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use crate::error::{BlottoError, Result};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use blotto_ga::ga::Selection;
/// use blotto_ga::random::create_rng;
///
/// let fitness = [0, 3, 1];
/// let mut rng = create_rng(1);
/// let idx = Selection::Rank.select(&fitness, &mut rng);
/// assert!(idx < fitness.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` individuals at random (with
    /// replacement), select the fittest.
    ///
    /// Higher `k` = stronger selection pressure. `k` must be at least 2:
    /// a single-entrant tournament ignores fitness.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Each individual is weighted by `fitness + 1`, so a zero score keeps
    /// a small chance of reproducing.
    ///
    /// # Complexity
    /// O(n) per generation, O(log n) per selection
    Roulette,

    /// Rank-based selection.
    ///
    /// An individual's weight is one plus the number of individuals with
    /// strictly lower fitness. Equal fitness gives equal weight, and the
    /// spread of raw scores does not matter.
    ///
    /// # Complexity
    /// O(n log n) per generation, O(log n) per selection
    #[default]
    Rank,
}

impl Selection {
    /// Select a parent index given the fitness of each individual.
    ///
    /// Builds a fresh [`SelectionWheel`]; when drawing many parents from
    /// the same generation, build the wheel once with [`Selection::wheel`].
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select<R: Rng + ?Sized>(&self, fitness: &[u64], rng: &mut R) -> usize {
        self.wheel(fitness).spin(rng)
    }

    /// Prepares the sampling table for one generation.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn wheel<'a>(&self, fitness: &'a [u64]) -> SelectionWheel<'a> {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        let kind = match self {
            Selection::Tournament(k) => WheelKind::Tournament {
                fitness,
                k: (*k).max(2),
            },
            Selection::Roulette => {
                WheelKind::Cumulative(cumulative(fitness.iter().map(|&f| f.saturating_add(1))))
            }
            Selection::Rank => WheelKind::Cumulative(cumulative(rank_weights(fitness))),
        };
        SelectionWheel {
            len: fitness.len(),
            kind,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Selection::Tournament(k @ 0..=1) = self {
            return Err(BlottoError::invalid_configuration(format!(
                "tournament size must be at least 2, got {k}"
            )));
        }
        Ok(())
    }
}

/// Sampling table for drawing parents from one generation.
#[derive(Debug, Clone)]
pub struct SelectionWheel<'a> {
    len: usize,
    kind: WheelKind<'a>,
}

#[derive(Debug, Clone)]
enum WheelKind<'a> {
    Tournament { fitness: &'a [u64], k: usize },
    /// Running sum of strictly positive weights.
    Cumulative(Vec<u64>),
}

impl SelectionWheel<'_> {
    /// Draws one parent index.
    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.len == 1 {
            return 0;
        }
        match &self.kind {
            WheelKind::Tournament { fitness, k } => tournament(fitness, *k, rng),
            WheelKind::Cumulative(sums) => {
                let total = sums[sums.len() - 1];
                let threshold = rng.random_range(0..total);
                sums.partition_point(|&c| c <= threshold)
            }
        }
    }
}

/// Tournament selection: pick k random individuals, return the fittest.
fn tournament<R: Rng + ?Sized>(fitness: &[u64], k: usize, rng: &mut R) -> usize {
    let n = fitness.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Weight = 1 + number of individuals with strictly lower fitness.
fn rank_weights(fitness: &[u64]) -> impl Iterator<Item = u64> + '_ {
    let mut sorted = fitness.to_vec();
    sorted.sort_unstable();
    fitness
        .iter()
        .map(move |&f| sorted.partition_point(|&x| x < f) as u64 + 1)
}

fn cumulative(weights: impl Iterator<Item = u64>) -> Vec<u64> {
    weights
        .scan(0u64, |acc, w| {
            *acc = acc.saturating_add(w);
            Some(*acc)
        })
        .collect()
}
