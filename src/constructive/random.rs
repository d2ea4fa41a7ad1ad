//! Random chromosome construction.
//!
//! Per depot, the assigned customers are shuffled and packed greedily into
//! sequential routes. A new route opens whenever the next customer would
//! push the current one past the depot's load or duration limit, where the
//! duration includes the leg back to the nearest depot. The vehicle cap is
//! not enforced here; the consistency gate filters such chromosomes.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distance::Position;
use crate::encoding::{Chromosome, RoutePlan};
use crate::models::Problem;

/// Builds a chromosome from shuffled depot groups.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::{Customer, Depot, Problem};
/// use mdvrp_ga::constructive::random_chromosome;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let problem = Problem::new(
///     vec![Depot::new(0, 3, 0.0, 25)],
///     vec![
///         Customer::new(1, 1.0, 0.0, 10, 0.0),
///         Customer::new(2, 2.0, 0.0, 10, 0.0),
///         Customer::new(3, 3.0, 0.0, 10, 0.0),
///     ],
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let chromosome = random_chromosome(&problem, &problem.nearest_depot_groups(), &mut rng);
/// // Load must stay below 25, so two routes are needed.
/// assert_eq!(chromosome.decode().num_routes(), 2);
/// ```
pub fn random_chromosome<R: Rng>(problem: &Problem, groups: &[Vec<usize>], rng: &mut R) -> Chromosome {
    let mut plan = Vec::with_capacity(problem.num_depots());

    for (d, depot) in problem.depots().iter().enumerate() {
        let mut group = groups.get(d).cloned().unwrap_or_default();
        group.shuffle(rng);

        let mut routes: Vec<Vec<usize>> = vec![Vec::new()];
        let mut cost = 0.0;
        let mut load = 0;
        let mut last = depot.position();

        for id in group {
            let Some(customer) = problem.customer(id) else {
                continue;
            };
            let leg = |from: &Position| {
                from.distance_to(customer.position()) + customer.service_duration()
            };
            let back = problem.closest_depot(customer.position()).distance;

            let fits = depot.admits(load + customer.demand(), cost + leg(last) + back);
            let current_is_empty = routes.last().map_or(true, Vec::is_empty);
            if !fits && !current_is_empty {
                routes.push(Vec::new());
                cost = 0.0;
                load = 0;
                last = depot.position();
            }

            cost += leg(last);
            load += customer.demand();
            last = customer.position();
            if let Some(route) = routes.last_mut() {
                route.push(id);
            }
        }
        plan.push(routes);
    }

    RoutePlan::new(plan).encode()
}
