//! Evolutionary engine for the Colonel Blotto puzzle.
//!
//! Two players each spread the same number of soldiers over a row of
//! castles worth different points; whoever sends more soldiers to a castle
//! takes its points. This crate evolves a population of such allocations
//! with a genetic algorithm:
//!
//! - **Blotto**: castles, allocations, and one-on-one match evaluation.
//! - **Genetic Algorithm (GA)**: constrained random initialization,
//!   round-robin fitness under win or point scoring, and a generational
//!   step with pluggable selection, crossover, and mutation.
//!
//! # Architecture
//!
//! The engine is a synchronous, in-process computation: the caller asks
//! for one generation at a time and renders the result however it likes.
//! The optional `wasm` feature exposes the same engine to a browser front
//! end; the `cli` feature builds a small terminal driver.
//!
//! # Example
//!
//! ```
//! use blotto_ga::blotto::ScoringMode;
//! use blotto_ga::ga::{BlottoConfig, GeneticAlgorithm};
//!
//! let config = BlottoConfig::new(vec![1, 2, 3], 10, 4, ScoringMode::Wins);
//! let mut ga = GeneticAlgorithm::new(config)?;
//! let generation = ga.step()?;
//! assert_eq!(generation.population_size(), 4);
//! assert!(generation.total_fitness() <= 6);
//! # Ok::<(), blotto_ga::BlottoError>(())
//! ```

pub mod blotto;
pub mod error;
pub mod ga;
pub mod random;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{BlottoError, Result};
