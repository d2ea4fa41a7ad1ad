//! Chromosome genes.

/// Raw value marking the start of the next depot's segment.
pub const DEPOT_BREAK: i32 = -1;

/// Raw value marking the start of the next route within a depot.
pub const ROUTE_BREAK: i32 = 0;

/// One element of a chromosome.
///
/// The flat integer form maps positive values to customers, `0` to a route
/// break and any negative value to a depot break.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::encoding::Gene;
///
/// assert_eq!(Gene::from(7), Gene::Customer(7));
/// assert_eq!(Gene::from(0), Gene::RouteBreak);
/// assert_eq!(Gene::from(-1), Gene::DepotBreak);
/// assert_eq!(i32::from(Gene::Customer(7)), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gene {
    /// A customer id (1-based).
    Customer(usize),
    /// Ends the current route and opens a new one at the same depot.
    RouteBreak,
    /// Ends the current depot segment and opens the next depot.
    DepotBreak,
}

impl Gene {
    /// Returns the customer id if this gene is a customer.
    pub fn customer(self) -> Option<usize> {
        match self {
            Gene::Customer(id) => Some(id),
            _ => None,
        }
    }
}

impl From<i32> for Gene {
    fn from(raw: i32) -> Self {
        match raw {
            r if r < 0 => Gene::DepotBreak,
            ROUTE_BREAK => Gene::RouteBreak,
            id => Gene::Customer(id as usize),
        }
    }
}

impl From<Gene> for i32 {
    fn from(gene: Gene) -> Self {
        match gene {
            Gene::Customer(id) => id as i32,
            Gene::RouteBreak => ROUTE_BREAK,
            Gene::DepotBreak => DEPOT_BREAK,
        }
    }
}
