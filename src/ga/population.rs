//! Population storage and fitness-weighted selection.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::encoding::Chromosome;
use crate::evaluation::Evaluator;

use super::config::SelectionPressure;

/// A chromosome with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// The encoded solution.
    pub chromosome: Chromosome,
    /// `1 / distance` as scored by the evaluator.
    pub fitness: f64,
}

impl Individual {
    /// Pairs a chromosome with a fitness computed elsewhere.
    pub fn new(chromosome: Chromosome, fitness: f64) -> Self {
        Self { chromosome, fitness }
    }

    /// Scores `chromosome` with the evaluator.
    pub fn evaluate(chromosome: Chromosome, evaluator: &Evaluator<'_>) -> Self {
        let fitness = evaluator.fitness(&chromosome);
        Self { chromosome, fitness }
    }
}

/// Per-individual selection weights.
///
/// `population_size` is the configured target size, not `individuals.len()`;
/// between generations the population holds more members than that, so
/// inverted weights need not sum to one. Degenerate inputs (zero total
/// fitness, a target size of one) yield non-finite weights, which
/// [`Population::select`] answers with uniform sampling.
pub fn selection_weights(
    individuals: &[Individual],
    population_size: usize,
    pressure: SelectionPressure,
) -> Vec<f64> {
    let total: f64 = individuals.iter().map(|i| i.fitness).sum();
    match pressure {
        SelectionPressure::Inverted => {
            let denom = total * population_size.saturating_sub(1) as f64;
            individuals
                .iter()
                .map(|i| (total - i.fitness) / denom)
                .collect()
        }
        SelectionPressure::Proportional => {
            individuals.iter().map(|i| i.fitness / total).collect()
        }
    }
}

/// The working set of individuals.
#[derive(Debug, Clone, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// An empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing individuals without checking them.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Members in insertion order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if there are no members.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Adds an individual without any check.
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Adds `chromosome` only if it is a consistent solution.
    ///
    /// Returns whether it was admitted.
    pub fn admit(&mut self, chromosome: Chromosome, evaluator: &Evaluator<'_>) -> bool {
        if !evaluator.is_consistent(&chromosome) {
            return false;
        }
        self.individuals.push(Individual::evaluate(chromosome, evaluator));
        true
    }

    /// Like [`admit`](Self::admit) for an already scored individual.
    pub fn admit_scored(&mut self, individual: Individual, evaluator: &Evaluator<'_>) -> bool {
        if !evaluator.is_consistent(&individual.chromosome) {
            return false;
        }
        self.individuals.push(individual);
        true
    }

    /// Replaces all members.
    pub fn replace(&mut self, individuals: Vec<Individual>) {
        self.individuals = individuals;
    }

    /// Sorts by fitness, best first. Equal fitness keeps insertion order.
    pub fn sort_by_fitness(&mut self) {
        self.individuals
            .sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    }

    /// The fittest member; the earliest one on ties.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().fold(None, |best, candidate| match best {
            Some(b) if b.fitness >= candidate.fitness => Some(b),
            _ => Some(candidate),
        })
    }

    /// The fittest member that passes the consistency gate.
    pub fn best_consistent(&self, evaluator: &Evaluator<'_>) -> Option<&Individual> {
        self.ranked()
            .into_iter()
            .map(|i| &self.individuals[i])
            .find(|ind| evaluator.is_consistent(&ind.chromosome))
    }

    /// Draws `floor(population_size * portion - elitism)` members with
    /// replacement by `pressure` weights, then appends the `elitism` fittest
    /// members, best first.
    ///
    /// The population itself is left untouched.
    pub fn select<R: Rng>(
        &self,
        portion: f64,
        elitism: usize,
        population_size: usize,
        pressure: SelectionPressure,
        rng: &mut R,
    ) -> Vec<Individual> {
        let count = (population_size as f64 * portion - elitism as f64).max(0.0) as usize;
        let mut selection = Vec::with_capacity(count + elitism);

        let weights = selection_weights(&self.individuals, population_size, pressure);
        match WeightedIndex::new(&weights) {
            Ok(dist) => {
                for _ in 0..count {
                    selection.push(self.individuals[dist.sample(rng)].clone());
                }
            }
            Err(_) => {
                for _ in 0..count {
                    if let Some(ind) = self.individuals.choose(rng) {
                        selection.push(ind.clone());
                    }
                }
            }
        }

        selection.extend(
            self.ranked()
                .into_iter()
                .take(elitism)
                .map(|i| self.individuals[i].clone()),
        );
        selection
    }

    /// Member indices by descending fitness, stable on ties.
    fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.sort_by(|&a, &b| {
            self.individuals[b]
                .fitness
                .total_cmp(&self.individuals[a].fitness)
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Depot, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn individual(tag: i32, fitness: f64) -> Individual {
        Individual::new(Chromosome::from_raw(&[tag]), fitness)
    }

    fn tag(ind: &Individual) -> i32 {
        ind.chromosome.to_raw()[0]
    }

    fn two_customer_problem() -> Problem {
        Problem::new(
            vec![Depot::new(0, 2, 0.0, 15)],
            vec![
                Customer::new(1, 1.0, 0.0, 10, 0.0),
                Customer::new(2, 2.0, 0.0, 10, 0.0),
            ],
        )
        .expect("valid problem")
    }

    #[test]
    fn test_inverted_weights_favor_low_fitness() {
        let pop = [individual(1, 0.9), individual(2, 0.1)];
        let w = selection_weights(&pop, 2, SelectionPressure::Inverted);
        assert!((w[0] - 0.1).abs() < 1e-12);
        assert!((w[1] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_inverted_weights_sum_to_one_at_target_size() {
        let pop = [individual(1, 0.5), individual(2, 0.3), individual(3, 0.2)];
        let w = selection_weights(&pop, 3, SelectionPressure::Inverted);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(w[0] < w[1] && w[1] < w[2]);
    }

    #[test]
    fn test_proportional_weights_favor_high_fitness() {
        let pop = [individual(1, 0.9), individual(2, 0.1)];
        let w = selection_weights(&pop, 2, SelectionPressure::Proportional);
        assert!((w[0] - 0.9).abs() < 1e-12);
        assert!((w[1] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_select_counts_and_elites() {
        let pop = Population::from_individuals(vec![
            individual(1, 0.2),
            individual(2, 0.5),
            individual(3, 0.1),
            individual(4, 0.5),
            individual(5, 0.3),
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = pop.select(1.0, 2, 5, SelectionPressure::Inverted, &mut rng);
        assert_eq!(picked.len(), 5);
        // Elites at the end, best first, ties in insertion order.
        assert_eq!(tag(&picked[3]), 2);
        assert_eq!(tag(&picked[4]), 4);
        assert_eq!(pop.len(), 5);
    }

    #[test]
    fn test_select_truncates_count() {
        let pop = Population::from_individuals(vec![individual(1, 0.4), individual(2, 0.6)]);
        let mut rng = StdRng::seed_from_u64(1);
        // 25 * 1.1 = 27.5 -> 27 samples, no elites.
        let picked = pop.select(1.1, 0, 25, SelectionPressure::Inverted, &mut rng);
        assert_eq!(picked.len(), 27);
        // Elitism larger than the draw leaves only elites.
        let picked = pop.select(0.05, 2, 25, SelectionPressure::Inverted, &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_select_direction() {
        let pop = Population::from_individuals(vec![individual(1, 0.9), individual(2, 0.1)]);
        let mut rng = StdRng::seed_from_u64(7);

        let inverted = pop.select(500.0, 0, 2, SelectionPressure::Inverted, &mut rng);
        let low = inverted.iter().filter(|i| tag(i) == 2).count();
        assert!(low > 800, "inverted drew the weak one {low} of 1000 times");

        let proportional = pop.select(500.0, 0, 2, SelectionPressure::Proportional, &mut rng);
        let high = proportional.iter().filter(|i| tag(i) == 1).count();
        assert!(high > 800, "proportional drew the strong one {high} of 1000 times");
    }

    #[test]
    fn test_select_degenerate_weights_fall_back_to_uniform() {
        let pop = Population::from_individuals(vec![individual(1, 0.0), individual(2, 0.0)]);
        let mut rng = StdRng::seed_from_u64(3);
        let picked = pop.select(5.0, 0, 2, SelectionPressure::Inverted, &mut rng);
        assert_eq!(picked.len(), 10);
    }

    #[test]
    fn test_select_empty_population() {
        let pop = Population::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(pop
            .select(1.0, 2, 10, SelectionPressure::Inverted, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_admit_gate() {
        let problem = two_customer_problem();
        let eval = Evaluator::new(&problem);
        let mut pop = Population::new();
        // Both customers on one route: load 20 is not below 15.
        assert!(!pop.admit(Chromosome::from_raw(&[1, 2]), &eval));
        assert!(!pop.admit(Chromosome::from_raw(&[1, 0, 1]), &eval));
        assert!(pop.admit(Chromosome::from_raw(&[1, 0, 2]), &eval));
        assert_eq!(pop.len(), 1);
        assert!(pop.individuals()[0].fitness > 0.0);
    }

    #[test]
    fn test_best_and_best_consistent() {
        let problem = two_customer_problem();
        let eval = Evaluator::new(&problem);
        let mut pop = Population::new();
        let bad = Individual::new(Chromosome::from_raw(&[1, 2]), 1.0);
        let good = Individual::evaluate(Chromosome::from_raw(&[2, 0, 1]), &eval);
        pop.push(bad.clone());
        pop.push(good.clone());
        assert_eq!(pop.best(), Some(&bad));
        assert_eq!(pop.best_consistent(&eval), Some(&good));

        pop.sort_by_fitness();
        assert_eq!(pop.individuals()[0], bad);
    }

    #[test]
    fn test_best_tie_keeps_first() {
        let pop = Population::from_individuals(vec![
            individual(1, 0.3),
            individual(2, 0.7),
            individual(3, 0.7),
        ]);
        assert_eq!(pop.best().map(tag), Some(2));
    }
}
