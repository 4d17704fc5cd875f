//! Step-wise GA execution.
//!
//! [`GeneticAlgorithm`] runs one generation per [`step`](GeneticAlgorithm::step):
//! initialization → evaluation on the first call, then
//! selection → crossover → mutation → evaluation on every later call.
//! The caller decides when to stop; the engine keeps only the latest
//! generation.

use super::config::BlottoConfig;
use super::evolver::evolve;
use super::fitness::evaluate_population;
use super::operators::initialize_population;
use super::result::GenerationResult;
use crate::blotto::ScoringMode;
use crate::error::{BlottoError, Result};
use crate::random::{rng_from_seed, BlottoRng};
use tracing::{debug, info, instrument};

/// Lifecycle of a [`GeneticAlgorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No population yet; the next step creates generation 0.
    Uninitialized,
    /// A generation is live; the next step evolves it.
    Ready,
}

/// The configuration and latest generation of the current lineage.
///
/// The configuration is snapshotted when generation 0 is created, so
/// [`GeneticAlgorithm::configure`] never alters a run in progress.
#[derive(Debug, Clone)]
struct Run {
    config: BlottoConfig,
    result: GenerationResult,
}

/// Evolves Blotto strategies one generation at a time.
///
/// # Usage
///
/// ```
/// use blotto_ga::blotto::ScoringMode;
/// use blotto_ga::ga::{BlottoConfig, GeneticAlgorithm};
///
/// let config = BlottoConfig::new(vec![1, 2, 3], 10, 4, ScoringMode::Wins).with_seed(42);
/// let mut ga = GeneticAlgorithm::new(config).unwrap();
/// for _ in 0..5 {
///     let result = ga.step().unwrap();
///     let (best, score) = result.best();
///     println!("generation {}: {:?} scored {score}", result.generation(), best.soldiers());
/// }
/// ```
///
/// `step` and `reset` take `&mut self`; share an engine between threads
/// only behind your own synchronization.
#[derive(Debug)]
pub struct GeneticAlgorithm {
    config: BlottoConfig,
    rng: BlottoRng,
    run: Option<Run>,
}

impl GeneticAlgorithm {
    /// Creates an uninitialized engine.
    ///
    /// The random generator is seeded once here from `config.seed` (or
    /// entropy) and keeps advancing across [`reset`](Self::reset), so two
    /// engines built from the same seeded configuration produce identical
    /// generation sequences.
    pub fn new(config: BlottoConfig) -> Result<Self> {
        config.validate()?;
        let rng = rng_from_seed(config.seed);
        Ok(Self {
            config,
            rng,
            run: None,
        })
    }

    /// The configuration the next generation 0 will use.
    pub fn config(&self) -> &BlottoConfig {
        &self.config
    }

    /// Whether a generation is live.
    pub fn state(&self) -> EngineState {
        match self.run {
            None => EngineState::Uninitialized,
            Some(_) => EngineState::Ready,
        }
    }

    /// The latest generation, if any.
    pub fn current(&self) -> Option<&GenerationResult> {
        self.run.as_ref().map(|run| &run.result)
    }

    /// Replaces the puzzle definition, keeping the operator settings.
    ///
    /// Takes effect at the next generation 0; a run in progress keeps the
    /// puzzle it started with. On error the engine is left untouched.
    #[instrument(level = "debug", skip(self, castle_points), fields(castles = castle_points.len()))]
    pub fn configure(
        &mut self,
        num_castles: usize,
        castle_points: Vec<u32>,
        soldiers: u32,
        population_size: usize,
        scoring: ScoringMode,
    ) -> Result<()> {
        if castle_points.len() != num_castles {
            return Err(BlottoError::invalid_configuration(format!(
                "expected {num_castles} castle values, got {}",
                castle_points.len()
            )));
        }
        let candidate = BlottoConfig {
            castle_points,
            soldiers,
            population_size,
            scoring,
            ..self.config.clone()
        };
        self.set_config(candidate)
    }

    /// Replaces the whole configuration, operators included.
    ///
    /// Same rules as [`configure`](Self::configure). The seed is only read
    /// by [`new`](Self::new).
    pub fn set_config(&mut self, config: BlottoConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Discards the current lineage. The next step starts a fresh
    /// generation 0.
    pub fn reset(&mut self) {
        if let Some(run) = self.run.take() {
            info!(
                generation = run.result.generation(),
                "discarding run"
            );
        }
    }

    /// Produces the next generation.
    ///
    /// From [`EngineState::Uninitialized`] this samples and evaluates
    /// generation 0; from [`EngineState::Ready`] it evolves the live
    /// generation and evaluates the offspring. The live population and
    /// fitness are replaced together, and only if the step succeeds.
    #[instrument(level = "debug", skip(self), fields(state = ?self.state()))]
    pub fn step(&mut self) -> Result<&GenerationResult> {
        match self.run.as_mut() {
            None => {
                let run = start(&self.config, &mut self.rng)?;
                self.run = Some(run);
            }
            Some(run) => {
                let result = advance(run, &mut self.rng)?;
                run.result = result;
            }
        }

        let result = self
            .current()
            .ok_or_else(|| BlottoError::invalid_state("no generation after step"))?;
        debug!(
            generation = result.generation(),
            best = result.best().1,
            mean = result.mean_fitness(),
            "generation evaluated"
        );
        Ok(result)
    }
}

/// Samples and evaluates generation 0.
fn start(config: &BlottoConfig, rng: &mut BlottoRng) -> Result<Run> {
    let castles = config.castle_set()?;
    info!(
        castles = castles.len(),
        soldiers = config.soldiers,
        population = config.population_size,
        scoring = %config.scoring,
        "starting run"
    );

    let population = initialize_population(
        config.population_size,
        config.soldiers,
        castles.len(),
        config.init,
        rng,
    )?;
    let fitness = evaluate_population(&population, &castles, config.scoring, config.parallel);
    let result = GenerationResult::new(
        0,
        population,
        fitness,
        castles,
        config.scoring,
        config.soldiers,
    )?;
    Ok(Run {
        config: config.clone(),
        result,
    })
}

/// Evolves and evaluates the generation after `run.result`.
fn advance(run: &Run, rng: &mut BlottoRng) -> Result<GenerationResult> {
    let prev = &run.result;
    let castles = prev.castles();
    let population = evolve(
        prev.population(),
        prev.fitness_values(),
        castles,
        &run.config,
        rng,
    )?;
    let fitness = evaluate_population(&population, castles, prev.scoring(), run.config.parallel);
    GenerationResult::new(
        prev.generation() + 1,
        population,
        fitness,
        castles.clone(),
        prev.scoring(),
        prev.soldiers(),
    )
}
