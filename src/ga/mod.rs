//! Genetic Algorithm engine for Blotto strategies.
//!
//! Each individual is an [`Allocation`](crate::blotto::Allocation); its
//! fitness comes from a round-robin tournament against the rest of its
//! generation. The engine is driven one generation at a time through
//! [`GeneticAlgorithm::step`].
//!
//! # Key Types
//!
//! - [`BlottoConfig`]: Puzzle definition and algorithm parameters
//! - [`GeneticAlgorithm`]: Uninitialized/Ready state machine
//! - [`GenerationResult`]: Snapshot of one generation
//!
//! # Building Blocks
//!
//! - [`evaluate_population`]: Round-robin fitness (optionally on rayon)
//! - [`evolve`]: Elitism, selection, crossover, mutation
//! - [`operators`]: Initialization, crossover and mutation operators
//! - [`Selection`]: Rank, roulette and tournament parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Roberson (2006), "The Colonel Blotto game", *Economic Theory* 29(1)

mod config;
mod engine;
mod evolver;
mod fitness;
pub mod operators;
mod result;
mod selection;

pub use config::BlottoConfig;
pub use engine::{EngineState, GeneticAlgorithm};
pub use evolver::evolve;
pub use fitness::evaluate_population;
pub use operators::{Crossover, InitStrategy, Mutation};
pub use result::GenerationResult;
pub use selection::{Selection, SelectionWheel};
