//! TSP instance type.

use serde::{Deserialize, Serialize};

use super::Node;
use crate::error::{TspError, TspResult};

/// A symmetric TSP instance over 2D cities.
///
/// Node `k` (1-based) is stored at index `k - 1`. The edge-weight-type tag is
/// kept verbatim; [`select_distance`](crate::distance::select_distance) maps
/// it to a formula.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Instance;
///
/// let inst = Instance::from_coords("square", "EUC_2D", &[
///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
/// ]);
/// assert_eq!(inst.dimension(), 4);
/// assert_eq!(inst.node(3).y(), 10.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    name: String,
    comment: String,
    problem_type: String,
    edge_weight_type: String,
    nodes: Vec<Node>,
}

impl Instance {
    /// Creates an instance from nodes, checking that ids are exactly `1..=N`
    /// in order.
    pub fn new(
        name: impl Into<String>,
        edge_weight_type: impl Into<String>,
        nodes: Vec<Node>,
    ) -> TspResult<Self> {
        if let Some((idx, node)) = nodes
            .iter()
            .enumerate()
            .find(|(idx, node)| node.id() != idx + 1)
        {
            return Err(TspError::InvalidArgument(format!(
                "node at position {} has id {}, expected {}",
                idx,
                node.id(),
                idx + 1
            )));
        }
        Ok(Self {
            name: name.into(),
            comment: String::new(),
            problem_type: "TSP".to_string(),
            edge_weight_type: edge_weight_type.into(),
            nodes,
        })
    }

    /// Creates an instance numbering the coordinates `1..=N` in order.
    pub fn from_coords(
        name: impl Into<String>,
        edge_weight_type: impl Into<String>,
        coords: &[(f64, f64)],
    ) -> Self {
        let nodes = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Node::new(i + 1, x, y))
            .collect();
        Self {
            name: name.into(),
            comment: String::new(),
            problem_type: "TSP".to_string(),
            edge_weight_type: edge_weight_type.into(),
            nodes,
        }
    }

    /// Sets the free-text comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the problem type tag (`TSP` for loaded instances).
    pub fn with_problem_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = problem_type.into();
        self
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Problem type tag.
    pub fn problem_type(&self) -> &str {
        &self.problem_type
    }

    /// Edge-weight-type tag as written in the source.
    pub fn edge_weight_type(&self) -> &str {
        &self.edge_weight_type
    }

    /// Number of cities.
    pub fn dimension(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node with the given 1-based id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside `1..=dimension`.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id - 1]
    }
}
