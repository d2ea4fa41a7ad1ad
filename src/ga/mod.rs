//! Genetic algorithm over flat multi-depot chromosomes.
//!
//! - [`GaConfig`]: Run parameters and selection pressure
//! - [`operators`]: Crossover, heuristic swap mutation, inversion mutation
//! - [`Population`]: Individuals, consistency-gated admission, selection
//! - [`SearchContext`]: Owns problem, population, history and RNG; runs
//!   generations via [`SearchContext::step`] and [`SearchContext::train`]

mod config;
mod context;
pub mod operators;
mod population;
mod trainer;

pub use config::{GaConfig, SelectionPressure};
pub use context::{SearchContext, TrainingState};
pub use population::{selection_weights, Individual, Population};
pub use trainer::{BestSolution, GenerationStats, TrainingOutcome};
