//! Customer type.

use serde::{Deserialize, Serialize};

use crate::distance::Position;

/// A customer to be served by exactly one route.
///
/// Customer ids are 1-based and contiguous, so id `k` lives at index `k - 1`
/// of the problem's customer list.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::Customer;
///
/// let c = Customer::new(1, 41.0, 49.0, 10, 5.0);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
/// assert_eq!(c.service_duration(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    position: Position,
    demand: i32,
    service_duration: f64,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: i32, service_duration: f64) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            demand,
            service_duration,
        }
    }

    /// Customer id (1-based).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location of this customer.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Demand delivered at this customer.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Time spent serving this customer.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    /// Euclidean distance to another customer.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        self.position.distance_to(&other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_new() {
        let c = Customer::new(3, 10.0, 20.0, 5, 3.0);
        assert_eq!(c.id(), 3);
        assert_eq!(c.position().x(), 10.0);
        assert_eq!(c.position().y(), 20.0);
        assert_eq!(c.demand(), 5);
        assert_eq!(c.service_duration(), 3.0);
    }

    #[test]
    fn test_customer_distance() {
        let a = Customer::new(1, 0.0, 0.0, 0, 0.0);
        let b = Customer::new(2, 3.0, 4.0, 0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
    }
}
