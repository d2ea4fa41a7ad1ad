//! Depot type with fleet, duration, and load limits.

use serde::{Deserialize, Serialize};

use crate::distance::Position;

/// A depot that routes depart from.
///
/// Every route originating here must carry strictly less than `max_load`
/// and, when a duration limit is set, last strictly less than
/// `max_duration`. At most `max_vehicles` routes may originate here.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::models::Depot;
///
/// let d = Depot::new(0, 4, 0.0, 80).with_position(10.0, 20.0);
/// assert_eq!(d.max_vehicles(), 4);
/// assert!(d.max_duration().is_none()); // 0 means unconstrained
/// assert_eq!(d.max_load(), 80);
/// assert_eq!(d.position().x(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    id: usize,
    max_vehicles: usize,
    max_duration: Option<f64>,
    max_load: i32,
    position: Position,
}

impl Depot {
    /// Creates a depot at the origin.
    ///
    /// A `max_duration` of zero (or less) means routes have no duration limit.
    pub fn new(id: usize, max_vehicles: usize, max_duration: f64, max_load: i32) -> Self {
        Self {
            id,
            max_vehicles,
            max_duration: (max_duration > 0.0).then_some(max_duration),
            max_load,
            position: Position::default(),
        }
    }

    /// Places the depot.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Depot index (0-based, matches its position in the problem).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum number of routes that may start here.
    pub fn max_vehicles(&self) -> usize {
        self.max_vehicles
    }

    /// Route duration limit, if any.
    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    /// Route load limit.
    pub fn max_load(&self) -> i32 {
        self.max_load
    }

    /// Location of this depot.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns `true` if a route with this load and duration fits the depot.
    ///
    /// Both comparisons are strict: a route exactly at a limit is rejected.
    pub fn admits(&self, load: i32, duration: f64) -> bool {
        load < self.max_load && self.max_duration.map_or(true, |max| duration < max)
    }
}
