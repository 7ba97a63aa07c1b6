//! City node type.

use serde::{Deserialize, Serialize};

/// A city in a TSP instance.
///
/// Identifiers are 1-based: an instance of dimension N holds nodes `1..=N`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Node;
///
/// let a = Node::new(1, 0.0, 0.0);
/// let b = Node::new(2, 3.0, 4.0);
/// assert_eq!(b.id(), 2);
/// assert!((a.euclidean_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
}

impl Node {
    /// Creates a node.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// 1-based identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate (latitude in `ddd.mm` form for GEO instances).
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate (longitude in `ddd.mm` form for GEO instances).
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Unrounded Euclidean distance to another node.
    pub fn euclidean_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
