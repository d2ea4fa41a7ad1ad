//! Domain model types for multi-depot routing problems.
//!
//! Depots carry fleet, duration, and load limits; customers carry a
//! position, demand, and service duration. A [`Problem`] owns both lists
//! and is read-only once built.

mod customer;
mod depot;
mod problem;

pub use customer::Customer;
pub use depot::Depot;
pub use problem::{ClosestDepot, Problem};
