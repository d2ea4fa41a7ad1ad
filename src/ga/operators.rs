//! Genetic operators over flat chromosomes.
//!
//! All operators work positionally on the gene sequence and treat route and
//! depot breaks like customers, so they can move customers between routes
//! and depots. None of them checks feasibility: the caller decides whether
//! the child enters the population.
//!
//! # Operators
//!
//! - **Crossover**: keep a slice of the first parent in place, fill the gaps
//!   with the second parent's remaining genes in order
//! - **Heuristic mutation**: best of all pairwise swaps among three loci
//! - **Inversion mutation**: reverse one slice

use rand::Rng;

use crate::encoding::{Chromosome, Gene};
use crate::evaluation::Evaluator;

/// Draws `(cut1, cut2)` with `0 <= cut1 <= cut2 <= len`.
///
/// `cut1` is uniform over `[0, len)` and `cut2` uniform over `[cut1, len)`,
/// both truncated toward zero. Returns `(0, 0)` for an empty sequence.
pub fn cut_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let cut1 = ((rng.random::<f64>() * len as f64) as usize).min(len - 1);
    let cut2 = ((cut1 as f64 + rng.random::<f64>() * (len - cut1) as f64) as usize).min(len);
    (cut1, cut2)
}

/// Crossover with explicit cut points.
///
/// The child is as long as the longer parent. Positions `cut1..cut2` copy
/// `parent1`; every value in that slice is removed once from `parent2`,
/// taking the last occurrence first; the remaining `parent2` genes fill the
/// other positions left to right. Unfilled positions are dropped.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::encoding::Chromosome;
/// use mdvrp_ga::ga::operators::crossover_at;
///
/// let p1 = Chromosome::from_raw(&[1, 2, 3, 4, 5]);
/// let p2 = Chromosome::from_raw(&[5, 4, 3, 2, 1]);
/// let child = crossover_at(&p1, &p2, 1, 3);
/// assert_eq!(child.to_raw(), vec![5, 2, 3, 4, 1]);
/// ```
pub fn crossover_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    cut1: usize,
    cut2: usize,
) -> Chromosome {
    let p1 = parent1.genes();
    let cut2 = cut2.min(p1.len());
    let cut1 = cut1.min(cut2);
    let slice = &p1[cut1..cut2];

    let mut remaining: Vec<Gene> = parent2.genes().to_vec();
    for gene in slice {
        if let Some(pos) = remaining.iter().rposition(|g| g == gene) {
            remaining.remove(pos);
        }
    }

    let mut protochild: Vec<Option<Gene>> = vec![None; p1.len().max(parent2.len())];
    for (slot, &gene) in protochild[cut1..cut2].iter_mut().zip(slice) {
        *slot = Some(gene);
    }

    let mut fill = remaining.into_iter();
    for slot in protochild.iter_mut().filter(|s| s.is_none()) {
        match fill.next() {
            Some(gene) => *slot = Some(gene),
            None => break,
        }
    }

    Chromosome::new(protochild.into_iter().flatten().collect())
}

/// Crossover with random cut points over `parent1`.
pub fn crossover<R: Rng>(parent1: &Chromosome, parent2: &Chromosome, rng: &mut R) -> Chromosome {
    let (cut1, cut2) = cut_points(parent1.len(), rng);
    crossover_at(parent1, parent2, cut1, cut2)
}

/// Every ordered pair swap among `loci`, self-pairs included.
///
/// With three loci this yields nine variants; a self-pair (or two equal
/// loci) reproduces the parent unchanged. Out-of-range loci are skipped.
pub fn swap_variants(parent: &Chromosome, loci: &[usize]) -> Vec<Chromosome> {
    let len = parent.len();
    let mut variants = Vec::with_capacity(loci.len() * loci.len());
    for &a in loci {
        for &b in loci {
            if a >= len || b >= len {
                continue;
            }
            let mut variant = parent.clone();
            variant.genes_mut().swap(a, b);
            variants.push(variant);
        }
    }
    variants
}

/// Heuristic mutation: picks three loci (with replacement) and returns the
/// fittest swap variant with its fitness.
///
/// Ties keep the first variant generated. Returns `None` for an empty
/// parent.
pub fn heuristic_mutation<R: Rng>(
    parent: &Chromosome,
    evaluator: &Evaluator<'_>,
    rng: &mut R,
) -> Option<(Chromosome, f64)> {
    let len = parent.len();
    if len == 0 {
        return None;
    }
    let loci: Vec<usize> = (0..3)
        .map(|_| ((rng.random::<f64>() * len as f64) as usize).min(len - 1))
        .collect();

    swap_variants(parent, &loci)
        .into_iter()
        .map(|variant| {
            let fitness = evaluator.fitness(&variant);
            (variant, fitness)
        })
        .fold(None, |best, candidate| match best {
            Some((_, best_fitness)) if best_fitness >= candidate.1 => best,
            _ => Some(candidate),
        })
}

/// Inversion with explicit cut points: reverses `cut1..cut2`.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::encoding::Chromosome;
/// use mdvrp_ga::ga::operators::inversion_at;
///
/// let parent = Chromosome::from_raw(&[1, 2, 0, 3, 4]);
/// assert_eq!(inversion_at(&parent, 1, 4).to_raw(), vec![1, 3, 0, 2, 4]);
/// assert_eq!(inversion_at(&parent, 2, 2), parent);
/// ```
pub fn inversion_at(parent: &Chromosome, cut1: usize, cut2: usize) -> Chromosome {
    let mut child = parent.clone();
    let cut2 = cut2.min(child.len());
    let cut1 = cut1.min(cut2);
    child.genes_mut()[cut1..cut2].reverse();
    child
}

/// Inversion mutation with random cut points. Returns `None` for an empty
/// parent.
pub fn inversion_mutation<R: Rng>(parent: &Chromosome, rng: &mut R) -> Option<Chromosome> {
    if parent.is_empty() {
        return None;
    }
    let (cut1, cut2) = cut_points(parent.len(), rng);
    Some(inversion_at(parent, cut1, cut2))
}
