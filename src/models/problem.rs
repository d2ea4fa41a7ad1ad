//! Multi-depot problem instance.

use serde::{Deserialize, Serialize};

use super::{Customer, Depot};
use crate::distance::Position;
use crate::error::{MdvrpError, Result};

/// The depot nearest to some position.
#[derive(Debug, Clone, Copy)]
pub struct ClosestDepot<'a> {
    /// The nearest depot.
    pub depot: &'a Depot,
    /// Its index in the problem's depot list.
    pub index: usize,
    /// Euclidean distance from the queried position.
    pub distance: f64,
}

/// An immutable MDVRP instance: ordered depots and ordered customers.
///
/// Construction checks that there is at least one depot and one customer,
/// that depot `k` carries id `k`, and that customer ids run `1..=N` in order.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::{Customer, Depot, Problem};
///
/// let depots = vec![
///     Depot::new(0, 2, 0.0, 100).with_position(0.0, 0.0),
///     Depot::new(1, 2, 0.0, 100).with_position(10.0, 0.0),
/// ];
/// let customers = vec![
///     Customer::new(1, 1.0, 0.0, 10, 0.0),
///     Customer::new(2, 9.0, 0.0, 10, 0.0),
/// ];
/// let problem = Problem::new(depots, customers).unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.closest_depot(problem.customers()[1].position()).index, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct Problem {
    depots: Vec<Depot>,
    customers: Vec<Customer>,
}

/// Unvalidated field layout of [`Problem`]; deserialization goes through
/// [`Problem::new`].
#[derive(Deserialize)]
struct RawProblem {
    depots: Vec<Depot>,
    customers: Vec<Customer>,
}

impl TryFrom<RawProblem> for Problem {
    type Error = MdvrpError;

    fn try_from(raw: RawProblem) -> Result<Self> {
        Problem::new(raw.depots, raw.customers)
    }
}

impl Problem {
    /// Creates a problem, validating depot and customer ids.
    pub fn new(depots: Vec<Depot>, customers: Vec<Customer>) -> Result<Self> {
        if depots.is_empty() {
            return Err(MdvrpError::InvalidProblem("no depots".into()));
        }
        if customers.is_empty() {
            return Err(MdvrpError::InvalidProblem("no customers".into()));
        }
        for (index, depot) in depots.iter().enumerate() {
            if depot.id() != index {
                return Err(MdvrpError::InvalidProblem(format!(
                    "depot at index {index} has id {}",
                    depot.id()
                )));
            }
        }
        for (index, customer) in customers.iter().enumerate() {
            if customer.id() != index + 1 {
                return Err(MdvrpError::InvalidProblem(format!(
                    "customer at position {} has id {}, expected {}",
                    index + 1,
                    customer.id(),
                    index + 1
                )));
            }
        }
        Ok(Self { depots, customers })
    }

    /// All depots, in index order.
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    /// All customers, in id order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Depot by index.
    pub fn depot(&self, index: usize) -> Option<&Depot> {
        self.depots.get(index)
    }

    /// Customer by 1-based id.
    pub fn customer(&self, id: usize) -> Option<&Customer> {
        id.checked_sub(1).and_then(|i| self.customers.get(i))
    }

    /// Number of depots.
    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    /// Number of customers.
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Finds the depot nearest to `position`.
    ///
    /// Ties go to the lowest depot index.
    pub fn closest_depot(&self, position: &Position) -> ClosestDepot<'_> {
        let mut closest = ClosestDepot {
            depot: &self.depots[0],
            index: 0,
            distance: self.depots[0].position().distance_to(position),
        };
        for (index, depot) in self.depots.iter().enumerate().skip(1) {
            let distance = depot.position().distance_to(position);
            if distance < closest.distance {
                closest = ClosestDepot {
                    depot,
                    index,
                    distance,
                };
            }
        }
        closest
    }

    /// Groups customer ids by their nearest depot.
    ///
    /// Entry `d` lists, in id order, the customers whose nearest depot is `d`.
    pub fn nearest_depot_groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.depots.len()];
        for customer in &self.customers {
            let closest = self.closest_depot(customer.position());
            groups[closest.index].push(customer.id());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_depot_problem() -> Problem {
        let depots = vec![
            Depot::new(0, 2, 0.0, 100).with_position(0.0, 0.0),
            Depot::new(1, 2, 0.0, 100).with_position(10.0, 0.0),
        ];
        let customers = vec![
            Customer::new(1, 1.0, 0.0, 10, 0.0),
            Customer::new(2, 9.0, 1.0, 10, 0.0),
            Customer::new(3, 2.0, 2.0, 10, 0.0),
        ];
        Problem::new(depots, customers).expect("valid problem")
    }

    #[test]
    fn test_new_rejects_empty() {
        let c = vec![Customer::new(1, 0.0, 0.0, 1, 0.0)];
        assert!(matches!(
            Problem::new(vec![], c),
            Err(MdvrpError::InvalidProblem(_))
        ));
        let d = vec![Depot::new(0, 1, 0.0, 10)];
        assert!(Problem::new(d, vec![]).is_err());
    }

    #[test]
    fn test_new_rejects_gap_in_ids() {
        let d = vec![Depot::new(0, 1, 0.0, 10)];
        let c = vec![
            Customer::new(1, 0.0, 0.0, 1, 0.0),
            Customer::new(3, 0.0, 0.0, 1, 0.0),
        ];
        assert!(Problem::new(d, c).is_err());
    }

    #[test]
    fn test_new_rejects_misnumbered_depot() {
        let d = vec![Depot::new(1, 1, 0.0, 10)];
        let c = vec![Customer::new(1, 0.0, 0.0, 1, 0.0)];
        assert!(Problem::new(d, c).is_err());
    }

    #[test]
    fn test_customer_lookup() {
        let p = two_depot_problem();
        assert_eq!(p.customer(1).map(Customer::id), Some(1));
        assert_eq!(p.customer(3).map(Customer::id), Some(3));
        assert!(p.customer(0).is_none());
        assert!(p.customer(4).is_none());
    }

    #[test]
    fn test_closest_depot() {
        let p = two_depot_problem();
        let c = p.closest_depot(&Position::new(8.0, 0.0));
        assert_eq!(c.index, 1);
        assert_eq!(c.depot.id(), 1);
        assert!((c.distance - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_closest_depot_tie_goes_to_first() {
        let p = two_depot_problem();
        let c = p.closest_depot(&Position::new(5.0, 3.0));
        assert_eq!(c.index, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let p = two_depot_problem();
        let json = serde_json::to_string(&p).expect("serialize");
        let back: Problem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.num_depots(), 2);
        assert_eq!(back.customers(), p.customers());
    }

    #[test]
    fn test_json_rejects_invalid_problem() {
        let customer = serde_json::to_value(Customer::new(7, 1.0, 1.0, 5, 0.0)).expect("customer");
        let no_depots = serde_json::json!({ "depots": [], "customers": [customer] });
        assert!(serde_json::from_value::<Problem>(no_depots).is_err());

        let depot = serde_json::to_value(Depot::new(0, 1, 0.0, 10)).expect("depot");
        let id_gap = serde_json::json!({ "depots": [depot], "customers": [customer] });
        let err = serde_json::from_value::<Problem>(id_gap).expect_err("id gap");
        assert!(err.to_string().contains("expected 1"));
    }

    #[test]
    fn test_nearest_depot_groups() {
        let p = two_depot_problem();
        assert_eq!(p.nearest_depot_groups(), vec![vec![1, 3], vec![2]]);
    }
}
