//! Flat chromosome encoding a multi-depot route plan.
//!
//! A chromosome is one sequence of genes covering every depot. Depot
//! segments are separated by [`Gene::DepotBreak`] (`-1`), and routes inside a
//! segment by [`Gene::RouteBreak`] (`0`). The first depot has no leading
//! break and neither does the first route of a segment:
//!
//! ```text
//! [1, 0, 2, -1, 3]   depot 0: [1] [2]   depot 1: [3]
//! ```
//!
//! Positional operators (crossover, swaps, inversion) treat sentinels like
//! any other gene, so depot and route boundaries move through evolution.

use serde::{Deserialize, Serialize};

use super::gene::Gene;
use super::plan::RoutePlan;

/// A flat sequence of genes.
///
/// Serializes as its raw integer form.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::encoding::{Chromosome, Gene};
///
/// let chromosome = Chromosome::from_raw(&[1, 0, 2, -1, 3]);
/// assert_eq!(chromosome.len(), 5);
/// assert_eq!(chromosome.genes()[1], Gene::RouteBreak);
/// assert_eq!(chromosome.to_raw(), vec![1, 0, 2, -1, 3]);
///
/// let plan = chromosome.decode();
/// assert_eq!(plan.routes(0), &[vec![1], vec![2]]);
/// assert_eq!(plan.routes(1), &[vec![3]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<i32>", into = "Vec<i32>")]
pub struct Chromosome {
    genes: Vec<Gene>,
}

impl Chromosome {
    /// Creates a chromosome from genes.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// Creates a chromosome from its flat integer form.
    pub fn from_raw(raw: &[i32]) -> Self {
        Self::new(raw.iter().copied().map(Gene::from).collect())
    }

    /// Returns the flat integer form.
    pub fn to_raw(&self) -> Vec<i32> {
        self.genes.iter().copied().map(i32::from).collect()
    }

    /// Returns the genes.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Returns a mutable reference to the genes.
    pub fn genes_mut(&mut self) -> &mut Vec<Gene> {
        &mut self.genes
    }

    /// Number of genes, sentinels included.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Customer ids in gene order.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes.iter().filter_map(|g| g.customer())
    }

    /// Counts how often each customer `1..=num_customers` occurs.
    ///
    /// Index `k - 1` holds the count for customer `k`. Ids outside the range
    /// are reported separately as the second value.
    pub fn customer_counts(&self, num_customers: usize) -> (Vec<usize>, usize) {
        let mut counts = vec![0usize; num_customers];
        let mut unknown = 0;
        for id in self.customer_ids() {
            match id.checked_sub(1).and_then(|i| counts.get_mut(i)) {
                Some(count) => *count += 1,
                None => unknown += 1,
            }
        }
        (counts, unknown)
    }

    /// Returns true if every customer `1..=num_customers` occurs at least once.
    pub fn contains_all_customers(&self, num_customers: usize) -> bool {
        self.customer_counts(num_customers).0.iter().all(|&c| c > 0)
    }

    /// Decodes the chromosome into a route plan.
    ///
    /// Single left-to-right scan; depot 0 starts with one open empty route.
    /// No bounds checking happens here: a chromosome with more depot breaks
    /// than the problem has depots decodes to extra segments, which the
    /// evaluator later rejects.
    pub fn decode(&self) -> RoutePlan {
        let mut depots: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new()]];
        for gene in &self.genes {
            match *gene {
                Gene::DepotBreak => depots.push(vec![Vec::new()]),
                Gene::RouteBreak => {
                    if let Some(routes) = depots.last_mut() {
                        routes.push(Vec::new());
                    }
                }
                Gene::Customer(id) => {
                    if let Some(route) = depots.last_mut().and_then(|r| r.last_mut()) {
                        route.push(id);
                    }
                }
            }
        }
        RoutePlan::new(depots)
    }
}

impl From<Vec<i32>> for Chromosome {
    fn from(raw: Vec<i32>) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<Chromosome> for Vec<i32> {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.to_raw()
    }
}

impl From<Vec<Gene>> for Chromosome {
    fn from(genes: Vec<Gene>) -> Self {
        Self::new(genes)
    }
}
