//! Route feasibility checking and chromosome scoring.

mod evaluator;

pub use evaluator::{EvaluationMode, Evaluator, RouteSummary, INFEASIBLE_ROUTE_PENALTY};
