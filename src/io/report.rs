//! Solution report: total distance plus one record per route.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::encoding::Chromosome;
use crate::error::Result;
use crate::evaluation::{Evaluator, INFEASIBLE_ROUTE_PENALTY};
use crate::models::Problem;

/// One non-empty route. Depot and vehicle numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    /// Originating depot.
    pub depot: usize,
    /// Route number within the depot.
    pub vehicle: usize,
    /// Route length, or the infeasibility penalty.
    pub length: f64,
    /// Sum of customer demands.
    pub load: i32,
    /// Depot nearest to the last stop, where the vehicle ends.
    pub end_depot: usize,
    /// Customer ids in visiting order.
    pub customers: Vec<usize>,
}

/// A decoded solution ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    /// Penalized total distance of the chromosome.
    pub total_distance: f64,
    /// Non-empty routes, depot by depot.
    pub routes: Vec<RouteReport>,
}

impl SolutionReport {
    /// Decodes `chromosome` against `problem`.
    ///
    /// Empty routes and routes of depot segments the problem does not have
    /// are left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdvrp_ga::encoding::Chromosome;
    /// use mdvrp_ga::io::SolutionReport;
    /// use mdvrp_ga::models::{Customer, Depot, Problem};
    ///
    /// let problem = Problem::new(
    ///     vec![Depot::new(0, 2, 0.0, 100)],
    ///     vec![
    ///         Customer::new(1, 3.0, 4.0, 10, 0.0),
    ///         Customer::new(2, 0.0, 5.0, 20, 0.0),
    ///     ],
    /// )
    /// .unwrap();
    /// let report = SolutionReport::from_chromosome(&problem, &Chromosome::from_raw(&[1, 0, 2]));
    /// assert_eq!(report.routes.len(), 2);
    /// assert_eq!(report.to_text(), "20.00\n1\t1\t10.00\t10\t1\t1\n1\t2\t10.00\t20\t1\t2\n");
    /// ```
    pub fn from_chromosome(problem: &Problem, chromosome: &Chromosome) -> Self {
        let evaluator = Evaluator::new(problem);
        let plan = chromosome.decode();
        let mut routes = Vec::new();

        for (d, r, route) in plan.iter() {
            let Some(depot) = problem.depot(d) else {
                continue;
            };
            if route.is_empty() {
                continue;
            }
            let summary = evaluator.evaluate_route(route, depot);
            routes.push(RouteReport {
                depot: d + 1,
                vehicle: r + 1,
                length: summary.length().unwrap_or(INFEASIBLE_ROUTE_PENALTY),
                load: summary.load,
                end_depot: summary.end_depot + 1,
                customers: route.to_vec(),
            });
        }

        Self {
            total_distance: evaluator.distance(chromosome),
            routes,
        }
    }

    /// Writes the tab-separated text form.
    pub fn write_text<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "{self}")?;
        Ok(())
    }

    /// The text form as a string.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Total distance with two decimals, then one tab-separated line per route:
/// `depot  vehicle  length  load  end_depot  c1 c2 ...`.
impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:.2}", self.total_distance)?;
        for route in &self.routes {
            let customers = route
                .customers
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                f,
                "{}\t{}\t{:.2}\t{}\t{}\t{}",
                route.depot, route.vehicle, route.length, route.load, route.end_depot, customers
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Depot};

    fn problem() -> Problem {
        Problem::new(
            vec![
                Depot::new(0, 2, 0.0, 25).with_position(0.0, 0.0),
                Depot::new(1, 2, 0.0, 25).with_position(10.0, 0.0),
            ],
            vec![
                Customer::new(1, 3.0, 0.0, 10, 0.0),
                Customer::new(2, 8.0, 0.0, 10, 0.0),
                Customer::new(3, 1.0, 0.0, 20, 0.0),
            ],
        )
        .expect("valid problem")
    }

    #[test]
    fn test_report_routes_and_end_depots() {
        let p = problem();
        // Depot 0 runs 1 -> 2 and ends at depot 1; depot 1 runs 3 and ends at depot 0.
        let report = SolutionReport::from_chromosome(&p, &Chromosome::from_raw(&[1, 2, -1, 0, 3]));
        assert_eq!(report.routes.len(), 2);

        let first = &report.routes[0];
        assert_eq!((first.depot, first.vehicle, first.end_depot), (1, 1, 2));
        assert_eq!(first.load, 20);
        assert!((first.length - 10.0).abs() < 1e-10);

        // The empty first route of depot 1 is skipped, so this is vehicle 2.
        let second = &report.routes[1];
        assert_eq!((second.depot, second.vehicle, second.end_depot), (2, 2, 1));
        assert!((second.length - 10.0).abs() < 1e-10);
        assert!((report.total_distance - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_charges_penalty() {
        let p = problem();
        // Load 40 is over the cap.
        let report = SolutionReport::from_chromosome(&p, &Chromosome::from_raw(&[1, 2, 3]));
        assert_eq!(report.routes[0].length, INFEASIBLE_ROUTE_PENALTY);
        assert_eq!(report.total_distance, INFEASIBLE_ROUTE_PENALTY);
    }

    #[test]
    fn test_text_format() {
        let p = problem();
        let report = SolutionReport::from_chromosome(&p, &Chromosome::from_raw(&[3, 1, 0, 2]));
        let text = report.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], format!("{:.2}", report.total_distance));
        assert!(lines[1].starts_with("1\t1\t"));
        assert!(lines[1].ends_with("\t3 1"));
        assert!(lines[2].ends_with("\t2\t2"));
    }

    #[test]
    fn test_write_text_matches_display() {
        let p = problem();
        let report = SolutionReport::from_chromosome(&p, &Chromosome::from_raw(&[1, 2, -1, 3]));
        let mut buffer = Vec::new();
        report.write_text(&mut buffer).expect("write");
        let written = String::from_utf8(buffer).expect("utf8");
        assert_eq!(written, report.to_string());
        assert_eq!(written, report.to_text());
        assert!(written.starts_with("20.00\n"));
    }

    #[test]
    fn test_json_output() {
        let p = problem();
        let report = SolutionReport::from_chromosome(&p, &Chromosome::from_raw(&[1, 3, -1, 2]));
        let mut buffer = Vec::new();
        report.write_json(&mut buffer).expect("json");
        let value: serde_json::Value = serde_json::from_slice(&buffer).expect("parse back");
        assert_eq!(value["routes"][1]["customers"], serde_json::json!([2]));
        assert_eq!(value["routes"][0]["depot"], 1);
    }
}
