//! Structured route plans.

use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::gene::Gene;

/// Routes grouped by originating depot.
///
/// Entry `d` holds the ordered routes of depot `d`; each route is an ordered
/// list of customer ids. A depot may have no routes.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::encoding::RoutePlan;
///
/// let plan = RoutePlan::new(vec![vec![vec![1], vec![2]], vec![vec![3]]]);
/// assert_eq!(plan.encode().to_raw(), vec![1, 0, 2, -1, 3]);
/// assert_eq!(plan.encode().decode(), plan);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    depots: Vec<Vec<Vec<usize>>>,
}

impl RoutePlan {
    /// Creates a plan from per-depot route lists.
    pub fn new(depots: Vec<Vec<Vec<usize>>>) -> Self {
        Self { depots }
    }

    /// Per-depot route lists.
    pub fn depots(&self) -> &[Vec<Vec<usize>>] {
        &self.depots
    }

    /// Routes of depot `depot`; empty if the plan has no such segment.
    pub fn routes(&self, depot: usize) -> &[Vec<usize>] {
        self.depots.get(depot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of depot segments.
    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    /// Total number of routes across all depots.
    pub fn num_routes(&self) -> usize {
        self.depots.iter().map(Vec::len).sum()
    }

    /// Iterates `(depot index, route index, route)` in encoding order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &[usize])> + '_ {
        self.depots.iter().enumerate().flat_map(|(d, routes)| {
            routes
                .iter()
                .enumerate()
                .map(move |(r, route)| (d, r, route.as_slice()))
        })
    }

    /// Encodes the plan as a flat chromosome.
    ///
    /// Emits a depot break before every depot but the first and a route
    /// break before every route but the first of its depot.
    pub fn encode(&self) -> Chromosome {
        let mut genes = Vec::new();
        for (d, routes) in self.depots.iter().enumerate() {
            if d != 0 {
                genes.push(Gene::DepotBreak);
            }
            for (r, route) in routes.iter().enumerate() {
                if r != 0 {
                    genes.push(Gene::RouteBreak);
                }
                genes.extend(route.iter().map(|&id| Gene::Customer(id)));
            }
        }
        Chromosome::new(genes)
    }
}

impl From<Vec<Vec<Vec<usize>>>> for RoutePlan {
    fn from(depots: Vec<Vec<Vec<usize>>>) -> Self {
        Self::new(depots)
    }
}
