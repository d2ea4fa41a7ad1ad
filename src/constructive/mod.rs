//! Constructive heuristics for seeding the initial population.
//!
//! - [`savings_chromosome`]: Per-depot savings merge (Clarke & Wright, 1964), O(n² log n)
//! - [`random_chromosome`]: Shuffled greedy packing into load/duration-feasible routes, O(n)
//! - [`nearest_neighbor_order`]: Intra-route nearest-neighbor walk from a random seed, O(n²)

mod nearest_neighbor;
mod random;
mod savings;

pub use nearest_neighbor::nearest_neighbor_order;
pub use random::random_chromosome;
pub use savings::savings_chromosome;
