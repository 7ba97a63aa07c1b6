//! TSPLIB distance formulas.
//!
//! # Formulas
//!
//! - `EUC_2D` / `EUCL_2D`: Euclidean distance rounded to the nearest integer
//! - `ATT`: pseudo-Euclidean `sqrt((dx² + dy²) / 10)`, rounded, then bumped
//!   up by one if the rounded value is below the true value
//! - `GEO`: great-circle distance on the TSPLIB idealized sphere
//!   (radius 6378.388 km) with `ddd.mm` coordinates, truncated after adding 1
//!
//! Unrecognized tags fall back to `EUC_2D`.
//!
//! # Reference
//!
//! Reinelt, G. (1991). "TSPLIB — A Traveling Salesman Problem Library",
//! *ORSA Journal on Computing* 3(4), 376-384.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::models::{Instance, Node};

/// Earth radius used by TSPLIB `GEO` instances, in kilometers.
pub const GEO_RADIUS_KM: f64 = 6378.388;

/// A pairwise distance formula selected from an edge-weight-type tag.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::Metric;
/// use u_tsp::models::Node;
///
/// let a = Node::new(1, 0.0, 0.0);
/// let b = Node::new(2, 3.0, 4.0);
/// assert_eq!(Metric::from_tag("EUC_2D").distance(&a, &b), 5.0);
/// assert_eq!(Metric::from_tag("SOMETHING_ELSE"), Metric::Euc2d);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Rounded Euclidean distance.
    Euc2d,
    /// Pseudo-Euclidean distance with ceiling-biased rounding.
    Att,
    /// Geographic great-circle distance in kilometers.
    Geo,
}

impl Metric {
    /// Selects the formula for an edge-weight-type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "ATT" => Self::Att,
            "GEO" => Self::Geo,
            // EUC_2D, EUCL_2D, and anything unrecognized
            _ => Self::Euc2d,
        }
    }

    /// Canonical TSPLIB tag for this formula.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Euc2d => "EUC_2D",
            Self::Att => "ATT",
            Self::Geo => "GEO",
        }
    }

    /// Distance between two nodes. Zero when both have the same id.
    pub fn distance(&self, a: &Node, b: &Node) -> f64 {
        if a.id() == b.id() {
            return 0.0;
        }
        match self {
            Self::Euc2d => euc_2d(a, b),
            Self::Att => att(a, b),
            Self::Geo => geo(a, b),
        }
    }
}

/// Selects the distance formula for an instance from its edge-weight-type tag.
pub fn select_distance(instance: &Instance) -> Metric {
    Metric::from_tag(instance.edge_weight_type())
}

fn euc_2d(a: &Node, b: &Node) -> f64 {
    (a.euclidean_to(b) + 0.5).floor()
}

fn att(a: &Node, b: &Node) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    let r = ((dx * dx + dy * dy) / 10.0).sqrt();
    let t = (r + 0.5).floor();
    if t < r {
        t + 1.0
    } else {
        t
    }
}

/// Converts a `ddd.mm` coordinate to radians.
fn geo_to_rad(coord: f64) -> f64 {
    let deg = coord.trunc();
    let min = coord - deg;
    PI * (deg + 5.0 * min / 3.0) / 180.0
}

fn geo(a: &Node, b: &Node) -> f64 {
    let lat_i = geo_to_rad(a.x());
    let lon_i = geo_to_rad(a.y());
    let lat_j = geo_to_rad(b.x());
    let lon_j = geo_to_rad(b.y());

    let q1 = (lon_i - lon_j).cos();
    let q2 = (lat_i - lat_j).cos();
    let q3 = (lat_i + lat_j).cos();

    // rounding can push the argument just past ±1
    let arg = (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).clamp(-1.0, 1.0);
    (GEO_RADIUS_KM * arg.acos() + 1.0).floor()
}
