//! Nearest-neighbor ordering of the customers inside one route.
//!
//! Starting from a uniformly random member of the route, repeatedly visit
//! the closest customer not yet visited. Ties go to the customer that
//! appears first in the input route.
//!
//! # Complexity
//!
//! O(n²) where n = route length.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::Problem;

/// Reorders `route` by a nearest-neighbor walk from a random seed customer.
///
/// Returns a permutation of `route`. Ids unknown to the problem are kept at
/// the end in their original order.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::{Customer, Depot, Problem};
/// use mdvrp_ga::constructive::nearest_neighbor_order;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let problem = Problem::new(
///     vec![Depot::new(0, 1, 0.0, 100)],
///     vec![
///         Customer::new(1, 1.0, 0.0, 1, 0.0),
///         Customer::new(2, 2.0, 0.0, 1, 0.0),
///         Customer::new(3, 3.0, 0.0, 1, 0.0),
///     ],
/// )
/// .unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let ordered = nearest_neighbor_order(&problem, &[3, 1, 2], &mut rng);
/// assert_eq!(ordered.len(), 3);
/// ```
pub fn nearest_neighbor_order<R: Rng>(problem: &Problem, route: &[usize], rng: &mut R) -> Vec<usize> {
    let Some(&seed) = route.choose(rng) else {
        return Vec::new();
    };

    let mut remaining: Vec<usize> = route.to_vec();
    let mut ordered = Vec::with_capacity(route.len());
    take(&mut remaining, seed);
    ordered.push(seed);

    let mut current = seed;
    while !remaining.is_empty() {
        let Some(from) = problem.customer(current) else {
            break;
        };
        let next = remaining
            .iter()
            .copied()
            .filter_map(|id| problem.customer(id).map(|c| (id, from.distance_to(c))))
            .fold(None, |best: Option<(usize, f64)>, (id, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((id, d)),
            });
        let Some((next, _)) = next else {
            break;
        };
        take(&mut remaining, next);
        ordered.push(next);
        current = next;
    }

    ordered.extend(remaining);
    ordered
}

/// Removes the first occurrence of `id`.
fn take(remaining: &mut Vec<usize>, id: usize) {
    if let Some(pos) = remaining.iter().position(|&c| c == id) {
        remaining.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Depot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line_problem() -> Problem {
        Problem::new(
            vec![Depot::new(0, 1, 0.0, 100)],
            vec![
                Customer::new(1, 1.0, 0.0, 1, 0.0),
                Customer::new(2, 2.0, 0.0, 1, 0.0),
                Customer::new(3, 3.0, 0.0, 1, 0.0),
                Customer::new(4, 10.0, 0.0, 1, 0.0),
            ],
        )
        .expect("valid problem")
    }

    #[test]
    fn test_nn_empty() {
        let p = line_problem();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(nearest_neighbor_order(&p, &[], &mut rng).is_empty());
    }

    #[test]
    fn test_nn_single() {
        let p = line_problem();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(nearest_neighbor_order(&p, &[2], &mut rng), vec![2]);
    }

    #[test]
    fn test_nn_is_permutation() {
        let p = line_problem();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ordered = nearest_neighbor_order(&p, &[4, 2, 1, 3], &mut rng);
            ordered.sort();
            assert_eq!(ordered, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_nn_walks_to_nearest() {
        let p = line_problem();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ordered = nearest_neighbor_order(&p, &[1, 4], &mut rng);
            // With two customers the walk is fixed by the seed choice.
            assert!(ordered == vec![1, 4] || ordered == vec![4, 1]);
            let ordered = nearest_neighbor_order(&p, &[4, 3, 1], &mut rng);
            // Whatever the start, 4 is never visited between 1 and 3.
            let pos = |id| ordered.iter().position(|&c| c == id).unwrap_or(usize::MAX);
            assert!(pos(4) == 0 || pos(4) == 2);
        }
    }

    #[test]
    fn test_nn_tie_goes_to_first() {
        let p = Problem::new(
            vec![Depot::new(0, 1, 0.0, 100)],
            vec![
                Customer::new(1, 0.0, 0.0, 1, 0.0),
                Customer::new(2, 1.0, 0.0, 1, 0.0),
                Customer::new(3, -1.0, 0.0, 1, 0.0),
            ],
        )
        .expect("valid problem");
        // Find a seed that starts at customer 1, then both neighbors tie.
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ordered = nearest_neighbor_order(&p, &[1, 3, 2], &mut rng);
            if ordered[0] == 1 {
                assert_eq!(ordered, vec![1, 3, 2]);
                return;
            }
        }
    }
}
