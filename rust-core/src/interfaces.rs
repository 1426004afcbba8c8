// Definitions that are used throughout all modules

/// Identifier of a vertex in a periodic graph. Identifiers are small integers
/// chosen by whoever builds the graph; they need not be contiguous.
pub type VertexId = u32;

/// Integer lattice translation carried by an edge.
pub type Shift = Vec<i64>;

// Enumeration to track whether a bounded search ran to the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Completeness {
    Complete,
    Truncated,
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        matches!(self, Completeness::Complete)
    }
}
