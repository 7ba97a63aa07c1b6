//! Domain model types for the traveling salesman problem.
//!
//! Provides cities with 2D coordinates, instances that group them under a
//! distance tag, and tours as ordered visiting sequences.

mod instance;
mod node;
mod tour;

pub use instance::Instance;
pub use node::Node;
pub use tour::{is_permutation, Tour};
