//! Engine configuration.
//!
//! [`BlottoConfig`] holds the puzzle definition (castles, soldiers,
//! population, scoring) together with every parameter that controls the
//! evolutionary step.

use super::operators::{Crossover, InitStrategy, Mutation};
use super::selection::Selection;
use crate::blotto::{CastleSet, ScoringMode};
use crate::error::{BlottoError, Result};

/// Configuration for the Blotto genetic algorithm.
///
/// # Defaults
///
/// ```
/// use blotto_ga::ga::BlottoConfig;
///
/// let config = BlottoConfig::default();
/// assert_eq!(config.castle_points, (1..=10).collect::<Vec<u32>>());
/// assert_eq!(config.soldiers, 100);
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elite_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use blotto_ga::blotto::ScoringMode;
/// use blotto_ga::ga::{BlottoConfig, Crossover, Mutation, Selection};
///
/// let config = BlottoConfig::new(vec![1, 2, 3], 10, 4, ScoringMode::Points)
///     .with_selection(Selection::Tournament(3))
///     .with_crossover(Crossover::Uniform)
///     .with_mutation(Mutation::Transfer { max_amount: 2 })
///     .with_mutation_rate(0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlottoConfig {
    /// Victory points of each castle, in castle order.
    pub castle_points: Vec<u32>,

    /// Soldiers every individual must deploy.
    pub soldiers: u32,

    /// Number of individuals in each generation.
    pub population_size: usize,

    /// How match outcomes become fitness.
    pub scoring: ScoringMode,

    /// How generation 0 is sampled.
    pub init: InitStrategy,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is skipped the child is a copy of the first parent.
    pub crossover_rate: f64,

    /// Perturbation operator.
    pub mutation: Mutation,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of best individuals copied unchanged into the next generation.
    ///
    /// Set to 0 to disable elitism.
    pub elite_count: usize,

    /// Whether to run the round-robin tournament on the rayon pool.
    ///
    /// Ignored when the crate is built without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for BlottoConfig {
    fn default() -> Self {
        Self {
            castle_points: (1..=10).collect(),
            soldiers: 100,
            population_size: 100,
            scoring: ScoringMode::Wins,
            init: InitStrategy::default(),
            selection: Selection::default(),
            crossover: Crossover::default(),
            crossover_rate: 0.9,
            mutation: Mutation::default(),
            mutation_rate: 0.2,
            elite_count: 1,
            parallel: true,
            seed: None,
        }
    }
}

impl BlottoConfig {
    /// Creates a configuration for the given puzzle with default operators.
    pub fn new(
        castle_points: Vec<u32>,
        soldiers: u32,
        population_size: usize,
        scoring: ScoringMode,
    ) -> Self {
        Self {
            castle_points,
            soldiers,
            population_size,
            scoring,
            ..Self::default()
        }
    }

    /// Preset with the operators of the classic browser puzzle.
    ///
    /// - Stars-and-bars initialization, roulette selection
    /// - Averaging crossover, neighbor rebalance mutation on every child
    /// - No elitism
    pub fn classic() -> Self {
        Self {
            init: InitStrategy::StarsAndBars,
            selection: Selection::Roulette,
            crossover: Crossover::Average,
            crossover_rate: 1.0,
            mutation: Mutation::NeighborRebalance,
            mutation_rate: 1.0,
            elite_count: 0,
            ..Self::default()
        }
    }

    /// Sets the castle point values.
    pub fn with_castle_points(mut self, points: Vec<u32>) -> Self {
        self.castle_points = points;
        self
    }

    /// Sets the soldier total.
    pub fn with_soldiers(mut self, soldiers: u32) -> Self {
        self.soldiers = soldiers;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the scoring mode.
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the initialization strategy.
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites (0 to disable).
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of castles in the puzzle.
    pub fn num_castles(&self) -> usize {
        self.castle_points.len()
    }

    /// Builds the castle set described by this configuration.
    pub fn castle_set(&self) -> Result<CastleSet> {
        CastleSet::new(self.castle_points.clone())
    }

    /// Validates the configuration.
    ///
    /// Returns [`BlottoError::InvalidConfiguration`] describing the first
    /// invalid parameter.
    pub fn validate(&self) -> Result<()> {
        self.castle_set()?;
        if self.soldiers == 0 {
            return Err(BlottoError::invalid_configuration(
                "soldiers must be at least 1",
            ));
        }
        if self.population_size == 0 {
            return Err(BlottoError::invalid_configuration(
                "population_size must be at least 1",
            ));
        }
        if self.elite_count > self.population_size {
            return Err(BlottoError::invalid_configuration(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            )));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(BlottoError::invalid_configuration(format!(
                    "{name} must be within 0.0..=1.0, got {rate}"
                )));
            }
        }
        self.selection.validate()?;
        self.mutation.validate()?;
        Ok(())
    }
}
