use thiserror::Error;

use crate::edge::Weight;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors reported by the graph store, its readers and the algorithm suite.
///
/// All variants are recoverable; the library never terminates the process on bad input.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid header in line {line}: expected {expected}, found `{found}`")]
    Validation {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Cannot parse weight `{found}` in line {line}")]
    Parse { line: usize, found: String },

    #[error("Malformed edge in line {line}: expected `<label> <label> <weight>`, found `{found}`")]
    MalformedLine { line: usize, found: String },

    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("Graph is disconnected: reached {reached} of {total} vertices")]
    Disconnected { reached: usize, total: usize },

    #[error("Negative cycle reachable from the source")]
    NegativeCycleDetected,

    #[error("No path found")]
    NoPathFound,

    #[error("Operation requires a directed graph")]
    NotDirected,

    #[error("Negative weight {weight} on edge ({from}, {to})")]
    NegativeWeight {
        from: String,
        to: String,
        weight: Weight,
    },

    #[error("Total weight exceeds the range of i64")]
    WeightOverflow,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
