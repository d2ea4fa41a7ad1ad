//! # mdvrp-ga
//!
//! Genetic algorithm for the multi-depot vehicle routing problem (MDVRP).
//!
//! Solutions are flat chromosomes of customer ids separated by route and
//! depot breaks. The initial population comes from a savings heuristic
//! (optionally mixed with random construction); crossover, heuristic swap
//! mutation and inversion mutation then breed offspring, and only
//! consistent ones enter the population.
//!
//! ## Modules
//!
//! - [`models`]: Depots, customers and the problem instance
//! - [`distance`]: Planar positions and Euclidean distance
//! - [`encoding`]: Chromosome grammar and route-plan decoding
//! - [`evaluation`]: Route feasibility, penalized distance and fitness
//! - [`constructive`]: Savings, random and nearest-neighbor construction
//! - [`ga`]: Operators, population, selection and the training loop
//! - [`io`]: Instance loader and solution report
//!
//! ## Example
//!
//! ```
//! use mdvrp_ga::ga::{GaConfig, SearchContext};
//! use mdvrp_ga::io::{parse_problem, SolutionReport};
//!
//! let problem = parse_problem("2 4 2\n0 50\n0 50\n1 1 1 0 10\n2 2 2 0 10\n\
//!                              3 9 9 0 10\n4 8 9 0 10\n5 0 0\n6 10 10\n").unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(10)
//!     .with_generations(20)
//!     .with_elitism(2)
//!     .with_seed(42);
//! let mut ctx = SearchContext::new(problem.clone(), config).unwrap();
//! let outcome = ctx.train();
//!
//! let best = outcome.best().expect("a consistent solution");
//! let report = SolutionReport::from_chromosome(&problem, &best.chromosome);
//! assert!(report.total_distance > 0.0);
//! ```

pub mod constructive;
pub mod distance;
pub mod encoding;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod io;
pub mod models;

pub use error::{MdvrpError, Result};
