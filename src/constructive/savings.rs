//! Savings-based chromosome construction for multi-depot problems.
//!
//! # Algorithm
//!
//! Customers are grouped by nearest depot. Within each depot group, every
//! ordered index pair `(i, j)` gets a savings value
//!
//! ```text
//! s(i, j) = d(depot, i) + d(depot, j) - d(i, j)    if i < j
//! s(i, j) = 0                                      otherwise
//! ```
//!
//! Pairs are processed in decreasing order of savings:
//!
//! - neither customer routed: open a new route `[ci, cj]` if the depot has a
//!   spare vehicle and the route is feasible (`[ci]` when `ci == cj`);
//! - one customer routed at an end of its route: append the other customer
//!   to that route if it stays feasible;
//! - both routed in different routes: concatenate the two routes if the
//!   result is feasible.
//!
//! Each resulting route is then reordered by a nearest-neighbor walk from a
//! random member. Customers that never made it into a route are appended,
//! in id order, to the tail of the chromosome; the consistency gate decides
//! what happens to them.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use rand::Rng;

use crate::encoding::{Chromosome, Gene, RoutePlan};
use crate::evaluation::Evaluator;
use crate::models::{Depot, Problem};

use super::nearest_neighbor::nearest_neighbor_order;

/// A savings value for serving two group members on one route.
#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Builds a chromosome with the savings heuristic.
///
/// `groups[d]` lists the customers assigned to depot `d`, usually from
/// [`Problem::nearest_depot_groups`].
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::{Customer, Depot, Problem};
/// use mdvrp_ga::constructive::savings_chromosome;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let problem = Problem::new(
///     vec![Depot::new(0, 2, 0.0, 100)],
///     vec![
///         Customer::new(1, 1.0, 0.0, 10, 0.0),
///         Customer::new(2, 2.0, 0.0, 10, 0.0),
///         Customer::new(3, 3.0, 0.0, 10, 0.0),
///     ],
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let groups = problem.nearest_depot_groups();
/// let chromosome = savings_chromosome(&problem, &groups, &mut rng);
///
/// let mut ids: Vec<usize> = chromosome.customer_ids().collect();
/// ids.sort();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub fn savings_chromosome<R: Rng>(
    problem: &Problem,
    groups: &[Vec<usize>],
    rng: &mut R,
) -> Chromosome {
    let evaluator = Evaluator::new(problem);
    let mut unrouted = vec![true; problem.num_customers()];
    let mut plan = Vec::with_capacity(problem.num_depots());

    for (d, depot) in problem.depots().iter().enumerate() {
        let group = groups.get(d).map(Vec::as_slice).unwrap_or(&[]);
        let mut routes: Vec<Vec<usize>> = Vec::new();

        for saving in sorted_savings(problem, d, group) {
            let (ci, cj) = (group[saving.i], group[saving.j]);
            let ri = routes.iter().position(|r| r.contains(&ci));
            let rj = routes.iter().position(|r| r.contains(&cj));

            match (ri, rj) {
                (None, None) => {
                    if routes.len() >= depot.max_vehicles() {
                        continue;
                    }
                    let route = if ci == cj { vec![ci] } else { vec![ci, cj] };
                    if evaluator.is_consistent_route(&route, depot) {
                        mark_routed(&mut unrouted, &route);
                        routes.push(route);
                    }
                }
                (Some(r), None) => {
                    try_extend(&evaluator, depot, &mut routes[r], ci, cj, &mut unrouted)
                }
                (None, Some(r)) => {
                    try_extend(&evaluator, depot, &mut routes[r], cj, ci, &mut unrouted)
                }
                (Some(a), Some(b)) if a != b => {
                    let merged: Vec<usize> = routes[a].iter().chain(&routes[b]).copied().collect();
                    if evaluator.is_consistent_route(&merged, depot) {
                        routes.remove(a.max(b));
                        routes.remove(a.min(b));
                        routes.push(merged);
                    }
                }
                _ => {}
            }
        }

        let ordered = routes
            .iter()
            .map(|route| nearest_neighbor_order(problem, route, rng))
            .collect::<Vec<_>>();
        plan.push(ordered);
    }

    let mut chromosome = RoutePlan::new(plan).encode();
    chromosome.genes_mut().extend(
        unrouted
            .iter()
            .enumerate()
            .filter_map(|(i, &pending)| pending.then_some(Gene::Customer(i + 1))),
    );
    chromosome
}

/// All `n * n` savings of a depot group, largest first.
///
/// Ties keep row-major index order.
fn sorted_savings(problem: &Problem, depot: usize, group: &[usize]) -> Vec<Saving> {
    let Some(depot) = problem.depot(depot) else {
        return Vec::new();
    };
    let n = group.len();
    let mut savings = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let value = match (problem.customer(group[i]), problem.customer(group[j])) {
                (Some(ci), Some(cj)) if i < j => {
                    depot.position().distance_to(ci.position())
                        + depot.position().distance_to(cj.position())
                        - ci.distance_to(cj)
                }
                _ => 0.0,
            };
            savings.push(Saving { i, j, value });
        }
    }
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));
    savings
}

/// Appends `other` to `route` if `anchor` sits at either end and the result
/// is still feasible.
fn try_extend(
    evaluator: &Evaluator<'_>,
    depot: &Depot,
    route: &mut Vec<usize>,
    anchor: usize,
    other: usize,
    unrouted: &mut [bool],
) {
    let at_end = route.first() == Some(&anchor) || route.last() == Some(&anchor);
    if !at_end {
        return;
    }
    route.push(other);
    if evaluator.is_consistent_route(route, depot) {
        mark_routed(unrouted, &[other]);
    } else {
        route.pop();
    }
}

fn mark_routed(unrouted: &mut [bool], ids: &[usize]) {
    for &id in ids {
        if let Some(flag) = id.checked_sub(1).and_then(|i| unrouted.get_mut(i)) {
            *flag = false;
        }
    }
}
