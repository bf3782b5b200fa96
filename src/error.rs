use thiserror::Error;

/// Possible errors that arise while building a graph or approximating a Steiner tree on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteinerError {
    /// The input graph, terminal set or solver configuration is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A structure computed by an earlier pass is inconsistent. Indicates a bug, never bad input.
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
    /// A distance, reweighted key or weight sum does not fit into the edge weight type.
    #[error("Weight overflow: {0}")]
    WeightOverflow(String),
}
