//! Generational step: elitism, selection, crossover, mutation.

use super::config::BlottoConfig;
use crate::blotto::{Allocation, CastleSet};
use crate::error::{BlottoError, Result};
use rand::Rng;
use std::cmp::Reverse;
use tracing::instrument;

/// Breeds the next population from `population` and its `fitness`.
///
/// The `elite_count` fittest individuals (lowest index first on ties) are
/// copied unchanged to the front of the new population. Every remaining
/// slot is filled by drawing two parents with the configured selection,
/// recombining them with probability `crossover_rate` (otherwise the child
/// copies the first parent), and mutating the child with probability
/// `mutation_rate`.
///
/// # Errors
/// [`BlottoError::InvalidState`] if `population` and `fitness` differ in
/// length, the population is empty, or any parent or child breaks the
/// allocation invariants for `castles` and `config.soldiers`.
#[instrument(level = "debug", skip_all, fields(population = population.len()))]
pub fn evolve<R: Rng + ?Sized>(
    population: &[Allocation],
    fitness: &[u64],
    castles: &CastleSet,
    config: &BlottoConfig,
    rng: &mut R,
) -> Result<Vec<Allocation>> {
    if population.len() != fitness.len() {
        return Err(BlottoError::invalid_state(format!(
            "fitness length {} != population length {}",
            fitness.len(),
            population.len()
        )));
    }
    if population.is_empty() {
        return Err(BlottoError::invalid_state("cannot evolve an empty population"));
    }
    // Operators index by castle, so parents must match before breeding.
    for parent in population {
        parent.check(config.soldiers, castles.len())?;
    }

    let size = population.len();
    let elite_count = config.elite_count.min(size);
    let mut next_gen: Vec<Allocation> = Vec::with_capacity(size);

    // Elite preservation
    let mut ranked: Vec<usize> = (0..size).collect();
    ranked.sort_by_key(|&i| Reverse(fitness[i]));
    next_gen.extend(ranked[..elite_count].iter().map(|&i| population[i].clone()));

    let wheel = config.selection.wheel(fitness);
    let value_order = castles.indices_by_value();

    // Generate offspring
    while next_gen.len() < size {
        // Selection
        let p1 = &population[wheel.spin(rng)];
        let p2 = &population[wheel.spin(rng)];

        // Crossover
        let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
            config.crossover.apply(p1, p2, config.soldiers, rng)
        } else {
            p1.clone()
        };

        // Mutation
        if rng.random_range(0.0..1.0) < config.mutation_rate {
            config.mutation.apply(&mut child, &value_order, rng);
        }

        next_gen.push(child);
    }

    for child in &next_gen {
        child.check(config.soldiers, castles.len())?;
    }
    Ok(next_gen)
}
