// Periodic graph module: quotient graph data model, barycentric placement and the analysis cache
// This module is the entry point of the analysis pipeline

// ======================== MODULE DECLARATIONS ========================
pub mod analyzed;
pub mod density;
pub mod periodic;
pub mod placement;

#[cfg(test)]
pub(crate) mod test_nets;

mod _tests_periodic;
mod _tests_placement;

// ======================== GRAPHS ========================
pub use periodic::{
    Edge,                           // struct - directed edge (head, tail, shift) with canonical form
    Component,                      // struct - connected component with its translation lattice
    PeriodicGraph,                  // struct - canonical edge set with derived vertices and incidences
};
// PeriodicGraph impl methods:
//   new(triples) -> Result<Self>                     - builds and validates from (head, tail, shift)
//   vertices(&self) -> &[VertexId]                   - sorted vertices
//   incidences(&self, v) -> &[Edge]                  - both orientations of the edges at v
//   directed_edges(&self) -> Vec<Edge>               - every edge in both orientations
//   connected_components(&self) -> Vec<Component>   - components with basis and multiplicity
//   is_connected(&self) -> bool                      - one component of multiplicity 1
//   coordination_sequence(&self, v, n) -> Result<Vec<usize>> - shell sizes around v
//   with_vertex_mapping / with_shift_transform       - relabelled or re-based copies

// ======================== PLACEMENT ========================
pub use placement::{
    Placement,                      // struct - exact rational vertex positions
    barycentric_placement,          // fn(graph: &PeriodicGraph) -> Result<Placement>
};

// ======================== COORDINATION ========================
pub use density::{
    OrbitShells,                    // struct - shell sizes around one representative of a vertex orbit
    TopologicalDensity,             // struct - per orbit shells and the averaged cumulative count
    topological_density,            // fn(graph, orbits, dist, cap) -> Result<TopologicalDensity>
};

// ======================== ANALYSIS ========================
pub use analyzed::AnalyzedGraph;    // struct - graph with write-once caches for placement, symmetry and key
