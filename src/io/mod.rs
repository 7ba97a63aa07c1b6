//! Instance loading and result reporting.
//!
//! - [`tsplib`] — TSPLIB `NODE_COORD_SECTION` parser
//! - [`ReportLine`] — `Tour <name> <algorithm> <seconds> <length> [...]` line

mod report;
pub mod tsplib;

pub use report::{ReportLine, UNKNOWN_NAME};
