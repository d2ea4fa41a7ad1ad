//! Search state shared by the training loop and the operators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::constructive::{random_chromosome, savings_chromosome};
use crate::encoding::Chromosome;
use crate::error::Result;
use crate::evaluation::Evaluator;
use crate::models::Problem;

use super::config::GaConfig;
use super::operators;
use super::population::{Individual, Population};

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    /// No population yet.
    Initializing,
    /// `generation` generations completed.
    Running { generation: usize },
    /// Training finished and the result has been extracted.
    Converged,
}

/// Everything a training run owns: problem, parameters, population, history
/// and the random source.
///
/// The random source is a type parameter so tests and embedders can supply
/// their own; [`SearchContext::new`] uses a [`StdRng`] seeded from the
/// configuration.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::{Customer, Depot, Problem};
/// use mdvrp_ga::ga::{GaConfig, SearchContext, TrainingState};
///
/// let problem = Problem::new(
///     vec![Depot::new(0, 2, 0.0, 100)],
///     vec![
///         Customer::new(1, 1.0, 0.0, 10, 0.0),
///         Customer::new(2, 2.0, 0.0, 10, 0.0),
///     ],
/// )
/// .unwrap();
/// let config = GaConfig::default().with_population_size(6).with_elitism(1).with_seed(1);
/// let mut ctx = SearchContext::new(problem, config).unwrap();
/// assert_eq!(ctx.state(), TrainingState::Initializing);
///
/// ctx.initialize();
/// assert_eq!(ctx.population().len(), 6);
/// assert_eq!(ctx.state(), TrainingState::Running { generation: 0 });
/// ```
#[derive(Debug)]
pub struct SearchContext<R = StdRng> {
    pub(crate) problem: Problem,
    pub(crate) config: GaConfig,
    pub(crate) population: Population,
    pub(crate) state: TrainingState,
    pub(crate) history: Vec<f64>,
    pub(crate) rng: R,
}

impl SearchContext<StdRng> {
    /// Creates a context seeded from `config.seed`, or from the OS when the
    /// seed is absent.
    pub fn new(problem: Problem, config: GaConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(problem, config, rng)
    }
}

impl<R: Rng> SearchContext<R> {
    /// Creates a context around a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns [`MdvrpError::InvalidConfig`](crate::MdvrpError::InvalidConfig)
    /// if the configuration is out of range.
    pub fn with_rng(problem: Problem, config: GaConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            population: Population::new(),
            state: TrainingState::Initializing,
            history: Vec::new(),
            rng,
        })
    }

    /// The instance being solved.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Run parameters.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Best fitness after each completed generation.
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// An evaluator bound to this context's problem.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.problem)
    }

    /// Replaces the population with savings and random chromosomes.
    ///
    /// `floor(population_size * random_portion)` members come from random
    /// construction, the rest from the savings heuristic. Initial members
    /// are not gated on consistency.
    pub fn initialize(&mut self) {
        let size = self.config.population_size;
        let random_count =
            ((size as f64 * self.config.random_portion) as usize).min(size);
        let savings_count = size - random_count;

        let groups = self.problem.nearest_depot_groups();
        let evaluator = Evaluator::new(&self.problem);
        let mut individuals = Vec::with_capacity(size);
        for _ in 0..savings_count {
            let chromosome = savings_chromosome(&self.problem, &groups, &mut self.rng);
            individuals.push(Individual::evaluate(chromosome, &evaluator));
        }
        for _ in 0..random_count {
            let chromosome = random_chromosome(&self.problem, &groups, &mut self.rng);
            individuals.push(Individual::evaluate(chromosome, &evaluator));
        }

        debug!(savings = savings_count, random = random_count, "initial population built");
        self.population = Population::from_individuals(individuals);
        self.history.clear();
        self.state = TrainingState::Running { generation: 0 };
    }

    /// Crossover of `parent1` into `parent2`; the child joins the population
    /// if it is consistent. Returns whether it did.
    pub fn crossover(&mut self, parent1: &Chromosome, parent2: &Chromosome) -> bool {
        let child = operators::crossover(parent1, parent2, &mut self.rng);
        let evaluator = Evaluator::new(&self.problem);
        self.population.admit(child, &evaluator)
    }

    /// Heuristic mutation of `parent`; the best swap variant joins the
    /// population if it is consistent.
    pub fn heuristic_mutate(&mut self, parent: &Chromosome) -> bool {
        let evaluator = Evaluator::new(&self.problem);
        match operators::heuristic_mutation(parent, &evaluator, &mut self.rng) {
            Some((child, fitness)) => self
                .population
                .admit_scored(Individual::new(child, fitness), &evaluator),
            None => false,
        }
    }

    /// Inversion mutation of `parent`; the child joins the population if it
    /// is consistent.
    pub fn inversion_mutate(&mut self, parent: &Chromosome) -> bool {
        match operators::inversion_mutation(parent, &mut self.rng) {
            Some(child) => {
                let evaluator = Evaluator::new(&self.problem);
                self.population.admit(child, &evaluator)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Depot};
    use crate::MdvrpError;

    fn problem() -> Problem {
        Problem::new(
            vec![
                Depot::new(0, 2, 0.0, 35).with_position(0.0, 0.0),
                Depot::new(1, 2, 0.0, 35).with_position(20.0, 0.0),
            ],
            vec![
                Customer::new(1, 1.0, 1.0, 10, 1.0),
                Customer::new(2, 2.0, -1.0, 10, 1.0),
                Customer::new(3, 3.0, 2.0, 10, 1.0),
                Customer::new(4, 19.0, 1.0, 10, 1.0),
                Customer::new(5, 18.0, -2.0, 10, 1.0),
            ],
        )
        .expect("valid problem")
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(10)
            .with_elitism(2)
            .with_seed(42)
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = SearchContext::new(problem(), config().with_elitism(10)).expect_err("invalid");
        assert!(matches!(err, MdvrpError::InvalidConfig(_)));
    }

    #[test]
    fn test_initialize_mixes_constructors() {
        let mut ctx = SearchContext::new(problem(), config().with_random_portion(0.35))
            .expect("valid config");
        ctx.initialize();
        assert_eq!(ctx.population().len(), 10);
        assert_eq!(ctx.state(), TrainingState::Running { generation: 0 });
        let eval = ctx.evaluator();
        for ind in ctx.population().individuals() {
            assert_eq!(ind.fitness, eval.fitness(&ind.chromosome));
            assert!(ind.chromosome.contains_all_customers(5));
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let mut a = SearchContext::new(problem(), config()).expect("valid config");
        let mut b = SearchContext::new(problem(), config()).expect("valid config");
        a.initialize();
        b.initialize();
        assert_eq!(a.population().individuals(), b.population().individuals());
    }

    #[test]
    fn test_operators_admit_only_consistent() {
        let mut ctx = SearchContext::new(problem(), config()).expect("valid config");
        ctx.initialize();
        let parents: Vec<Chromosome> = ctx
            .population()
            .individuals()
            .iter()
            .map(|i| i.chromosome.clone())
            .collect();

        for pair in parents.windows(2) {
            let before = ctx.population().len();
            let admitted = ctx.crossover(&pair[0], &pair[1]);
            assert_eq!(ctx.population().len(), before + usize::from(admitted));
            ctx.heuristic_mutate(&pair[0]);
            ctx.inversion_mutate(&pair[1]);
        }

        let eval = ctx.evaluator();
        for ind in &ctx.population().individuals()[parents.len()..] {
            assert!(eval.is_consistent(&ind.chromosome));
        }
    }

    #[test]
    fn test_mutating_empty_parent_is_noop() {
        let mut ctx = SearchContext::new(problem(), config()).expect("valid config");
        assert!(!ctx.heuristic_mutate(&Chromosome::default()));
        assert!(!ctx.inversion_mutate(&Chromosome::default()));
        assert!(ctx.population().is_empty());
    }
}
