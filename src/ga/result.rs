//! Immutable snapshot of one generation.

use crate::blotto::{Allocation, CastleSet, ScoringMode};
use crate::error::{BlottoError, Result};
use std::cmp::Reverse;

/// One generation: its population, their fitness, and the puzzle that
/// produced them.
///
/// Created once per [`GeneticAlgorithm::step`](super::GeneticAlgorithm::step)
/// and superseded, never mutated, by the next one. `population` and
/// `fitness` are index-aligned and never empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationResult {
    generation: usize,
    population: Vec<Allocation>,
    fitness: Vec<u64>,
    castles: CastleSet,
    scoring: ScoringMode,
    soldiers: u32,
}

impl GenerationResult {
    pub(crate) fn new(
        generation: usize,
        population: Vec<Allocation>,
        fitness: Vec<u64>,
        castles: CastleSet,
        scoring: ScoringMode,
        soldiers: u32,
    ) -> Result<Self> {
        if population.len() != fitness.len() {
            return Err(BlottoError::invalid_state(format!(
                "fitness length {} != population length {}",
                fitness.len(),
                population.len()
            )));
        }
        if population.is_empty() {
            return Err(BlottoError::invalid_state("generation has no individuals"));
        }
        Ok(Self {
            generation,
            population,
            fitness,
            castles,
            scoring,
            soldiers,
        })
    }

    /// Generation index; the initial random population is generation 0.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Number of individuals.
    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Castles per allocation.
    pub fn num_castles(&self) -> usize {
        self.castles.len()
    }

    /// Rule the fitness values were computed under.
    pub fn scoring(&self) -> ScoringMode {
        self.scoring
    }

    /// Soldiers deployed by every individual.
    pub fn soldiers(&self) -> u32 {
        self.soldiers
    }

    /// The castle set this generation was evaluated against.
    pub fn castles(&self) -> &CastleSet {
        &self.castles
    }

    /// Allocations in population order.
    pub fn population(&self) -> &[Allocation] {
        &self.population
    }

    /// Fitness per individual, index-aligned with [`population`](Self::population).
    pub fn fitness_values(&self) -> &[u64] {
        &self.fitness
    }

    /// Allocation of individual `index`, if it exists.
    pub fn allocation(&self, index: usize) -> Option<&Allocation> {
        self.population.get(index)
    }

    /// Fitness of individual `index`, if it exists.
    pub fn fitness(&self, index: usize) -> Option<u64> {
        self.fitness.get(index).copied()
    }

    /// Individuals paired with their fitness, in population order.
    pub fn individuals(&self) -> impl Iterator<Item = (&Allocation, u64)> + '_ {
        self.population.iter().zip(self.fitness.iter().copied())
    }

    /// Index of the fittest individual; the lowest index wins ties.
    pub fn best_index(&self) -> usize {
        self.fitness
            .iter()
            .enumerate()
            .min_by_key(|&(i, &f)| (Reverse(f), i))
            .map_or(0, |(i, _)| i)
    }

    /// The fittest individual and its fitness.
    pub fn best(&self) -> (&Allocation, u64) {
        let i = self.best_index();
        (&self.population[i], self.fitness[i])
    }

    /// Individuals sorted best-first. Equal fitness keeps population order.
    pub fn ranked(&self) -> Vec<(&Allocation, u64)> {
        let mut ranked: Vec<(&Allocation, u64)> = self.individuals().collect();
        ranked.sort_by_key(|&(_, f)| Reverse(f));
        ranked
    }

    /// Sum of all fitness values.
    pub fn total_fitness(&self) -> u64 {
        self.fitness.iter().sum()
    }

    /// Average fitness across the population.
    pub fn mean_fitness(&self) -> f64 {
        self.total_fitness() as f64 / self.fitness.len() as f64
    }

    /// Flat layout used by the browser front end.
    ///
    /// Individuals best-first; for each, the soldiers per castle followed by
    /// its score: `[i1c1, i1c2, ..., i1 score, i2c1, ...]`. Scores that do
    /// not fit in a `u32` saturate.
    pub fn flatten(&self) -> Vec<u32> {
        let mut flat = Vec::with_capacity(self.population.len() * (self.num_castles() + 1));
        for (allocation, score) in self.ranked() {
            flat.extend_from_slice(allocation.soldiers());
            flat.push(u32::try_from(score).unwrap_or(u32::MAX));
        }
        flat
    }
}
