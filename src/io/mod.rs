//! Problem files in, solution reports out.

mod loader;
mod report;

pub use loader::{load_problem, parse_problem, read_problem};
pub use report::{RouteReport, SolutionReport};
