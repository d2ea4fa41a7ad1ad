//! Generational training loop.
//!
//! One generation:
//!
//! 1. draw a breeding pool of `population_size * (cr + hr + ir)` parents;
//! 2. pair up the first `population_size * cr` parents and cross each pair
//!    both ways;
//! 3. apply heuristic mutation to the next `population_size * hr` parents;
//! 4. apply inversion mutation to the next `population_size * ir` parents;
//! 5. keep `population_size` survivors, the `elitism` fittest among them.
//!
//! Offspring enter the population only if they are consistent solutions.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::encoding::Chromosome;
use crate::evaluation::Evaluator;

use super::context::{SearchContext, TrainingState};

/// What one call to [`SearchContext::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Zero-based index of the generation just run.
    pub generation: usize,
    /// Consistent offspring added before survivor selection.
    pub offspring_admitted: usize,
    /// Best fitness among the survivors.
    pub best_fitness: f64,
}

/// Best consistent individual of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSolution {
    /// The winning chromosome.
    pub chromosome: Chromosome,
    /// Its fitness, `1 / distance`.
    pub fitness: f64,
    /// Its total route length.
    pub distance: f64,
    /// Best fitness after each generation.
    pub history: Vec<f64>,
}

/// Result of [`SearchContext::train`].
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    /// The fittest consistent individual was found.
    Solved(BestSolution),
    /// No member of the final population is a consistent solution.
    NoConsistentSolution { history: Vec<f64> },
}

impl TrainingOutcome {
    /// The solution, if training found one.
    pub fn best(&self) -> Option<&BestSolution> {
        match self {
            Self::Solved(best) => Some(best),
            Self::NoConsistentSolution { .. } => None,
        }
    }

    /// Returns `true` for [`TrainingOutcome::Solved`].
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// Best fitness after each generation, whatever the outcome.
    pub fn history(&self) -> &[f64] {
        match self {
            Self::Solved(best) => &best.history,
            Self::NoConsistentSolution { history } => history,
        }
    }
}

impl<R: Rng> SearchContext<R> {
    /// Runs one generation, initializing first if needed.
    pub fn step(&mut self) -> GenerationStats {
        let generation = match self.state {
            TrainingState::Running { generation } => generation,
            TrainingState::Initializing | TrainingState::Converged => {
                self.initialize();
                0
            }
        };

        if generation % self.config.log_interval == 0 {
            let best_fitness = self.population.best().map_or(0.0, |i| i.fitness);
            info!(generation, best_fitness, "generation");
        }

        let size = self.config.population_size;
        let pressure = self.config.selection_pressure;
        let pool: Vec<Chromosome> = self
            .population
            .select(self.config.breeding_portion(), 0, size, pressure, &mut self.rng)
            .into_iter()
            .map(|ind| ind.chromosome)
            .collect();

        let crossover_count = (size as f64 * self.config.crossover_rate) as usize;
        let heuristic_count = (size as f64 * self.config.heuristic_mutate_rate) as usize;
        let inversion_count = (size as f64 * self.config.inversion_mutate_rate) as usize;

        let before = self.population.len();
        let (crossover_parents, rest) = pool.split_at(crossover_count.min(pool.len()));
        for pair in crossover_parents.chunks_exact(2) {
            self.crossover(&pair[0], &pair[1]);
            self.crossover(&pair[1], &pair[0]);
        }
        let (heuristic_parents, rest) = rest.split_at(heuristic_count.min(rest.len()));
        for parent in heuristic_parents {
            self.heuristic_mutate(parent);
        }
        for parent in &rest[..inversion_count.min(rest.len())] {
            self.inversion_mutate(parent);
        }
        let offspring_admitted = self.population.len() - before;

        let survivors =
            self.population
                .select(1.0, self.config.elitism, size, pressure, &mut self.rng);
        self.population.replace(survivors);

        let best_fitness = self.population.best().map_or(0.0, |i| i.fitness);
        self.history.push(best_fitness);
        self.state = TrainingState::Running {
            generation: generation + 1,
        };
        debug!(generation, offspring_admitted, best_fitness, "generation done");

        GenerationStats {
            generation,
            offspring_admitted,
            best_fitness,
        }
    }

    /// Runs `config.generations` generations and extracts the fittest
    /// consistent individual.
    ///
    /// A context that is already running continues from its current
    /// population; a fresh or converged one is initialized first.
    pub fn train(&mut self) -> TrainingOutcome {
        if !matches!(self.state, TrainingState::Running { .. }) {
            self.initialize();
        }
        info!(
            customers = self.problem.num_customers(),
            depots = self.problem.num_depots(),
            population = self.config.population_size,
            generations = self.config.generations,
            "training started"
        );

        for _ in 0..self.config.generations {
            self.step();
        }

        self.state = TrainingState::Converged;
        self.population.sort_by_fitness();
        let evaluator = Evaluator::new(&self.problem);
        let history = self.history.clone();
        match self.population.best_consistent(&evaluator) {
            Some(best) => {
                let distance = evaluator.distance(&best.chromosome);
                info!(fitness = best.fitness, distance, "training finished");
                TrainingOutcome::Solved(BestSolution {
                    chromosome: best.chromosome.clone(),
                    fitness: best.fitness,
                    distance,
                    history,
                })
            }
            None => {
                warn!("no consistent solution in the final population");
                TrainingOutcome::NoConsistentSolution { history }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaConfig;
    use crate::models::{Customer, Depot, Problem};

    fn two_depot_problem() -> Problem {
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
                Customer::new(6, 10.0, 5.0, 10, 1.0),
            ],
        )
        .expect("valid problem")
    }

    fn config(generations: usize) -> GaConfig {
        GaConfig::default()
            .with_population_size(12)
            .with_generations(generations)
            .with_elitism(2)
            .with_random_portion(0.25)
            .with_seed(42)
    }

    #[test]
    fn test_train_solves_small_instance() {
        let problem = two_depot_problem();
        let mut ctx = SearchContext::new(problem.clone(), config(30)).expect("valid config");
        let outcome = ctx.train();

        let best = outcome.best().expect("solved");
        let eval = Evaluator::new(&problem);
        assert!(eval.is_consistent(&best.chromosome));
        assert!((best.fitness - eval.fitness(&best.chromosome)).abs() < 1e-12);
        assert!((best.distance * best.fitness - 1.0).abs() < 1e-9);
        assert_eq!(best.history.len(), 30);
        assert_eq!(ctx.state(), TrainingState::Converged);
    }

    #[test]
    fn test_elitism_keeps_best_fitness_monotone() {
        let mut ctx =
            SearchContext::new(two_depot_problem(), config(40)).expect("valid config");
        let outcome = ctx.train();
        for pair in outcome.history().windows(2) {
            assert!(pair[1] >= pair[0], "best fitness dropped: {pair:?}");
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let mut a = SearchContext::new(two_depot_problem(), config(15)).expect("valid config");
        let mut b = SearchContext::new(two_depot_problem(), config(15)).expect("valid config");
        assert_eq!(a.train(), b.train());
    }

    #[test]
    fn test_step_advances_state() {
        let mut ctx = SearchContext::new(two_depot_problem(), config(5)).expect("valid config");
        let stats = ctx.step();
        assert_eq!(stats.generation, 0);
        assert_eq!(ctx.state(), TrainingState::Running { generation: 1 });
        let stats = ctx.step();
        assert_eq!(stats.generation, 1);
        assert_eq!(ctx.population().len(), 12);
        assert_eq!(ctx.history().len(), 2);
    }

    #[test]
    fn test_pair_instance_reaches_optimum() {
        let h = (25.0f64 - 6.25).sqrt();
        let problem = Problem::new(
            vec![Depot::new(0, 2, 0.0, 100)],
            vec![
                Customer::new(1, 5.0, 0.0, 10, 0.0),
                Customer::new(2, 2.5, h, 10, 0.0),
            ],
        )
        .expect("valid problem");
        let cfg = GaConfig::default()
            .with_population_size(4)
            .with_generations(5)
            .with_elitism(1)
            .with_seed(3);
        let mut ctx = SearchContext::new(problem, cfg).expect("valid config");
        let best = ctx.train().best().cloned().expect("solved");
        assert!((best.fitness - 1.0 / 15.0).abs() < 1e-12);
        assert!((best.distance - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_unservable_customer_has_no_solution() {
        let problem = Problem::new(
            vec![Depot::new(0, 2, 0.0, 100)],
            vec![
                Customer::new(1, 1.0, 0.0, 10, 0.0),
                Customer::new(2, 2.0, 0.0, 150, 0.0),
            ],
        )
        .expect("valid problem");
        let cfg = GaConfig::default()
            .with_population_size(4)
            .with_generations(5)
            .with_elitism(1)
            .with_seed(9);
        let mut ctx = SearchContext::new(problem, cfg).expect("valid config");
        let outcome = ctx.train();
        assert!(!outcome.is_solved());
        assert_eq!(outcome.history().len(), 5);
    }
}
