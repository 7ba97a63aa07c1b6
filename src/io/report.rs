//! Result line formatting.
//!
//! One line per run:
//!
//! ```text
//! Tour <name> <algorithm> <seconds> <length> [<c1>,...,<cN>]
//! ```
//!
//! with seconds to six decimals and the length rounded to an integer.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TspResult;
use crate::models::Tour;

/// Name printed when no instance could be loaded.
pub const UNKNOWN_NAME: &str = "unknown";

/// A single result line.
///
/// # Examples
///
/// ```
/// use u_tsp::io::ReportLine;
/// use u_tsp::models::Tour;
///
/// let mut tour = Tour::canonical(4);
/// tour.set_length(40.0);
/// let line = ReportLine::new("square", "canonical", 0.0, &tour);
/// assert_eq!(line.to_string(), "Tour square canonical 0.000000 40 [1,2,3,4]");
///
/// let failed = ReportLine::failure(None, "bf");
/// assert_eq!(failed.to_string(), "Tour unknown bf 0.000000 0 []");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Instance name.
    pub name: String,
    /// Algorithm code (`canonical`, `bf`, `nn`, ...).
    pub algorithm: String,
    /// Wall-clock seconds spent in the algorithm.
    pub seconds: f64,
    /// Tour length; `0` for a failure line.
    pub length: f64,
    /// Visiting order; empty for a failure line.
    pub cities: Vec<usize>,
}

impl ReportLine {
    /// Builds a line from a tour; an uncomputed length prints as `0`.
    pub fn new(
        name: impl Into<String>,
        algorithm: impl Into<String>,
        seconds: f64,
        tour: &Tour,
    ) -> Self {
        Self {
            name: name.into(),
            algorithm: algorithm.into(),
            seconds,
            length: tour.length().unwrap_or(0.0),
            cities: tour.cities().to_vec(),
        }
    }

    /// The placeholder line printed when a run fails.
    pub fn failure(name: Option<&str>, algorithm: impl Into<String>) -> Self {
        Self {
            name: name.unwrap_or(UNKNOWN_NAME).to_string(),
            algorithm: algorithm.into(),
            seconds: 0.0,
            length: 0.0,
            cities: Vec::new(),
        }
    }

    /// Appends the line (with a trailing newline) to `path`, creating it if
    /// needed.
    pub fn append_to(&self, path: impl AsRef<Path>) -> TspResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{self}")?;
        Ok(())
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tour {} {} {:.6} {:.0} [",
            self.name, self.algorithm, self.seconds, self.length
        )?;
        for (i, c) in self.cities.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}
