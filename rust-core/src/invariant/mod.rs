// Invariant module: canonical traversals and the Systre key
// This module turns a graph and its symmetry group into a representation-independent fingerprint

// ======================== MODULE DECLARATIONS ========================
pub mod basis;
pub mod key;
pub mod traversal;


// ======================== TRAVERSALS ========================
pub use basis::LatticeBasisAccumulator; // struct - projects shifts onto a basis fixed by discovery order
pub use traversal::{
    PlacementOrderedTraversal,      // struct - BFS edge iterator ordered by transformed edge vectors
    NormalizedTraversal,            // struct - lazily numbered and normalized steps, get(i)/advance()
    TraversalStep,                  // struct - (head#, tail#, rational shift) with derived total order
};

// ======================== INVARIANT ========================
pub use key::{
    Invariant,                      // struct - dimension and sorted integer steps; Display gives the key
    InvariantStep,                  // struct - (head#, tail#, integer shift)
    compute_invariant,              // fn(graph, placement, group) -> Invariant - smallest traversal over bases
};
