//! Reader for line-oriented multi-depot instance files.
//!
//! ```text
//! max_vehicles num_customers num_depots
//! max_duration max_load            (one line per depot)
//! id x y service_duration demand   (one line per customer, extra columns ignored)
//! id x y                           (one line per depot, id ignored)
//! ```
//!
//! Blank lines are skipped. A `max_duration` of zero means no limit.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{MdvrpError, Result};
use crate::models::{Customer, Depot, Problem};

/// Parses an instance from text.
///
/// # Examples
///
/// ```
/// use mdvrp_ga::io::parse_problem;
///
/// let text = "\
/// 2 3 2
/// 0 80
/// 0 80
/// 1 10 10 0 20
/// 2 12 8 0 30
/// 3 50 50 0 10
/// 4 0 0
/// 5 60 60
/// ";
/// let problem = parse_problem(text).unwrap();
/// assert_eq!(problem.num_depots(), 2);
/// assert_eq!(problem.num_customers(), 3);
/// assert_eq!(problem.depot(1).unwrap().position().x(), 60.0);
/// ```
pub fn parse_problem(text: &str) -> Result<Problem> {
    read_problem(text.as_bytes())
}

/// Reads an instance file from disk.
pub fn load_problem(path: impl AsRef<Path>) -> Result<Problem> {
    let file = std::fs::File::open(path)?;
    read_problem(file)
}

/// Reads an instance from any byte source.
pub fn read_problem<R: Read>(reader: R) -> Result<Problem> {
    let mut lines = Lines::new(BufReader::new(reader));

    let (line, fields) = lines.next_record("header")?;
    let max_vehicles: usize = field(&fields, 0, line, "max_vehicles")?;
    let num_customers: usize = field(&fields, 1, line, "num_customers")?;
    let num_depots: usize = field(&fields, 2, line, "num_depots")?;

    let mut limits = Vec::with_capacity(num_depots);
    for _ in 0..num_depots {
        let (line, fields) = lines.next_record("depot limits")?;
        let max_duration: f64 = field(&fields, 0, line, "max_duration")?;
        let max_load: i32 = field(&fields, 1, line, "max_load")?;
        limits.push((max_duration, max_load));
    }

    let mut customers = Vec::with_capacity(num_customers);
    for _ in 0..num_customers {
        let (line, fields) = lines.next_record("customer")?;
        let id: usize = field(&fields, 0, line, "id")?;
        let x: f64 = field(&fields, 1, line, "x")?;
        let y: f64 = field(&fields, 2, line, "y")?;
        let service_duration: f64 = field(&fields, 3, line, "service_duration")?;
        let demand: i32 = field(&fields, 4, line, "demand")?;
        customers.push(Customer::new(id, x, y, demand, service_duration));
    }

    let mut depots = Vec::with_capacity(num_depots);
    for (index, (max_duration, max_load)) in limits.into_iter().enumerate() {
        let (line, fields) = lines.next_record("depot position")?;
        let x: f64 = field(&fields, 1, line, "x")?;
        let y: f64 = field(&fields, 2, line, "y")?;
        depots.push(Depot::new(index, max_vehicles, max_duration, max_load).with_position(x, y));
    }

    Problem::new(depots, customers)
}

/// Non-blank lines with their 1-based line numbers.
struct Lines<R: BufRead> {
    reader: R,
    buffer: String,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
        }
    }

    fn next_record(&mut self, what: &str) -> Result<(usize, Vec<String>)> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Err(MdvrpError::Parse {
                    line: self.line + 1,
                    message: format!("unexpected end of file, expected {what} line"),
                });
            }
            self.line += 1;
            let fields: Vec<String> = self.buffer.split_whitespace().map(str::to_owned).collect();
            if !fields.is_empty() {
                return Ok((self.line, fields));
            }
        }
    }
}

fn field<T: FromStr>(fields: &[String], index: usize, line: usize, name: &str) -> Result<T> {
    let raw = fields.get(index).ok_or_else(|| MdvrpError::Parse {
        line,
        message: format!("missing field `{name}`"),
    })?;
    raw.parse().map_err(|_| MdvrpError::Parse {
        line,
        message: format!("invalid value `{raw}` for `{name}`"),
    })
}
