//! Chromosome encoding for multi-depot, multi-route solutions.
//!
//! - [`Gene`]: Typed chromosome element (customer, route break, depot break)
//! - [`Chromosome`]: Flat gene sequence, convertible to and from raw integers
//! - [`RoutePlan`]: Depot → routes → customers, the decoded form

mod chromosome;
mod gene;
mod plan;

pub use chromosome::Chromosome;
pub use gene::{Gene, DEPOT_BREAK, ROUTE_BREAK};
pub use plan::RoutePlan;
