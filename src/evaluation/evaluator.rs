//! Route and chromosome evaluator: feasibility, length, and fitness.

use crate::encoding::Chromosome;
use crate::models::{Depot, Problem};

/// Cost charged instead of the real length for each infeasible route.
pub const INFEASIBLE_ROUTE_PENALTY: f64 = 3000.0;

/// What [`Evaluator::evaluate`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// `1 / total distance`; higher is better, `0` if customers are missing.
    #[default]
    Fitness,
    /// Total penalized distance; `+inf` if customers are missing.
    Distance,
}

/// Accumulated metrics of one route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Travel distance plus service durations, return leg included.
    pub duration: f64,
    /// Sum of customer demands.
    pub load: i32,
    /// Index of the depot nearest to the last stop, where the route ends.
    pub end_depot: usize,
    /// Whether the originating depot admits this load and duration.
    pub feasible: bool,
}

impl RouteSummary {
    /// Route length, or `None` if the route is infeasible.
    pub fn length(&self) -> Option<f64> {
        self.feasible.then_some(self.duration)
    }
}

/// Evaluates routes and chromosomes against a problem.
///
/// A route leaves its depot, visits customers in order, and returns to the
/// depot nearest to its last stop, which need not be the one it left.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::{Customer, Depot, Problem};
/// use mdvrp_ga::encoding::Chromosome;
/// use mdvrp_ga::evaluation::{EvaluationMode, Evaluator};
///
/// let problem = Problem::new(
///     vec![Depot::new(0, 2, 0.0, 100)],
///     vec![
///         Customer::new(1, 3.0, 4.0, 10, 0.0),
///         Customer::new(2, 6.0, 8.0, 20, 0.0),
///     ],
/// )
/// .unwrap();
/// let evaluator = Evaluator::new(&problem);
///
/// let chromosome = Chromosome::from_raw(&[1, 2]);
/// assert!(evaluator.is_consistent(&chromosome));
/// // 0→1 = 5, 1→2 = 5, 2→0 = 10
/// assert!((evaluator.evaluate(&chromosome, EvaluationMode::Distance) - 20.0).abs() < 1e-10);
/// assert!((evaluator.fitness(&chromosome) - 0.05).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    problem: &'a Problem,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for the given problem.
    pub fn new(problem: &'a Problem) -> Self {
        Self { problem }
    }

    /// The problem being evaluated.
    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// Accumulates load and duration along a route starting at `depot`.
    ///
    /// An empty route stays at the depot with zero load and duration. A route
    /// naming an unknown customer id is reported infeasible.
    pub fn evaluate_route(&self, route: &[usize], depot: &Depot) -> RouteSummary {
        let mut load = 0;
        let mut duration = 0.0;
        let mut last = depot.position();
        for &id in route {
            let Some(customer) = self.problem.customer(id) else {
                return RouteSummary {
                    duration,
                    load,
                    end_depot: depot.id(),
                    feasible: false,
                };
            };
            load += customer.demand();
            duration += last.distance_to(customer.position()) + customer.service_duration();
            last = customer.position();
        }
        let closest = self.problem.closest_depot(last);
        duration += closest.distance;

        RouteSummary {
            duration,
            load,
            end_depot: closest.index,
            feasible: depot.admits(load, duration),
        }
    }

    /// Returns true if `route` fits the load and duration limits of `depot`.
    pub fn is_consistent_route(&self, route: &[usize], depot: &Depot) -> bool {
        self.evaluate_route(route, depot).feasible
    }

    /// The admission gate for the population.
    ///
    /// Fails if a customer is missing, duplicated or unknown, if a depot has
    /// more routes than vehicles (or does not exist), or if any route is
    /// infeasible.
    pub fn is_consistent(&self, chromosome: &Chromosome) -> bool {
        let (counts, unknown) = chromosome.customer_counts(self.problem.num_customers());
        if unknown > 0 || counts.iter().any(|&c| c != 1) {
            return false;
        }

        let plan = chromosome.decode();
        plan.depots().iter().enumerate().all(|(d, routes)| {
            let Some(depot) = self.problem.depot(d) else {
                return false;
            };
            routes.len() <= depot.max_vehicles()
                && routes.iter().all(|r| self.is_consistent_route(r, depot))
        })
    }

    /// Total route length with each infeasible route charged
    /// [`INFEASIBLE_ROUTE_PENALTY`]; `+inf` if any customer is missing.
    ///
    /// Non-empty routes of a depot segment the problem does not have are
    /// charged the penalty too.
    pub fn distance(&self, chromosome: &Chromosome) -> f64 {
        if !chromosome.contains_all_customers(self.problem.num_customers()) {
            return f64::INFINITY;
        }

        chromosome
            .decode()
            .iter()
            .map(|(d, _, route)| match self.problem.depot(d) {
                Some(depot) => self
                    .evaluate_route(route, depot)
                    .length()
                    .unwrap_or(INFEASIBLE_ROUTE_PENALTY),
                None if route.is_empty() => 0.0,
                None => INFEASIBLE_ROUTE_PENALTY,
            })
            .sum()
    }

    /// `1 / distance`, or `0` if any customer is missing.
    ///
    /// Finite and positive whenever every customer is present, feasible or
    /// not.
    pub fn fitness(&self, chromosome: &Chromosome) -> f64 {
        let distance = self.distance(chromosome);
        if distance.is_infinite() {
            return 0.0;
        }
        1.0 / distance.max(f64::EPSILON)
    }

    /// Scores a chromosome in the given mode.
    pub fn evaluate(&self, chromosome: &Chromosome, mode: EvaluationMode) -> f64 {
        match mode {
            EvaluationMode::Fitness => self.fitness(chromosome),
            EvaluationMode::Distance => self.distance(chromosome),
        }
    }
}
