use thiserror::Error;

use crate::interfaces::VertexId;

/// Precondition failures reported before any placement or symmetry work starts.
///
/// Failed automorphism candidates are not errors (they show up as `None` inside
/// the search) and broken internal invariants panic instead of returning here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    #[error("a periodic graph needs at least one edge")]
    NoEdges,

    #[error("edge shifts must have at least one coordinate")]
    ZeroDimension,

    #[error("inconsistent shift dimensions: expected {expected}, found {found}")]
    InconsistentDimension { expected: usize, found: usize },

    #[error("self-loop at vertex {0} has a zero shift")]
    DegenerateLoop(VertexId),

    #[error("vertex {0} does not occur in the graph")]
    UnknownVertex(VertexId),

    #[error("vertex mapping sends two vertices to {0}")]
    NonInjectiveMapping(VertexId),

    #[error("transform has dimension {found}, graph has dimension {expected}")]
    TransformDimension { expected: usize, found: usize },

    #[error("transform is not an integer matrix with determinant +1 or -1")]
    NotUnimodular,

    #[error("barycentric placement system is singular")]
    SingularPlacement,

    #[error("graph is not connected")]
    NotConnected,

    #[error("graph is not locally stable (two neighbours of a vertex collide)")]
    NotLocallyStable,

    #[error("structure is non-crystallographic (a ladder)")]
    Ladder,
}
