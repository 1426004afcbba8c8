// Symmetries module: automorphism search, symmetry groups and translational redundancy
// This module provides everything the canonical key needs to know about the symmetry of a net

// ======================== MODULE DECLARATIONS ========================
pub mod automorphism;
pub mod characteristic;
pub mod directions;
pub mod finder;
pub mod stationary;
pub mod translations;


// ======================== AUTOMORPHISMS ========================
pub use automorphism::{
    Automorphism,                   // struct - vertex bijection, directed edge bijection and lattice transform
    find_automorphism,              // fn(graph, placement, index, start_src, start_img, transform) -> Option<Automorphism>
};
// Automorphism impl methods:
//   identity(graph: &PeriodicGraph) -> Self          - the identity symmetry
//   image(&self, v: VertexId) -> VertexId            - image of a vertex
//   edge_image(&self, e: &Edge) -> Option<&Edge>     - image of a directed edge
//   compose(&self, other: &Automorphism) -> Self     - self followed by other
//   inverse(&self) -> Self                           - inverse symmetry

pub use directions::DirectionIndex; // struct - per vertex map from edge vector to the unique edge with it

// ======================== SYMMETRY GROUPS ========================
pub use characteristic::{
    characteristic_bases,           // fn(graph, placement) -> Vec<Vec<Edge>> - candidate bases in enumeration order
    basis_matrix,                   // fn(edges, placement) -> DMatrix<Rational> - edge vectors as rows
};
pub use finder::{
    SymmetryGroup,                  // struct - generators, closed element list and representative bases
    find_symmetries,                // fn(graph, placement) -> Result<SymmetryGroup>
};
// SymmetryGroup impl methods:
//   order(&self) -> usize                            - number of elements modulo translations
//   point_group_order(&self) -> usize                - number of distinct transforms
//   representative_bases(&self) -> &[Vec<Edge>]      - one basis per orbit
//   vertex_orbits(&self) -> Vec<Vec<VertexId>>       - vertices grouped by symmetry
//   edge_orbits(&self) -> Vec<Vec<Edge>>             - canonical edges grouped by symmetry

// ======================== TRANSLATIONS ========================
pub use translations::{
    Translations,                   // struct - translation classes and fractional translations
    MinimalImage,                   // struct - graph on the smallest cell plus vertex collapse map
    find_translations,              // fn(graph, placement) -> Result<Translations>
    minimal_image,                  // fn(graph, placement, translations) -> Result<MinimalImage>
};

// ======================== STATIONARY SYMMETRIES ========================
pub use stationary::{
    StationaryOptions,              // struct - step budget for the search
    StationarySymmetries,           // struct - symmetries found and whether the search finished
    stationary_symmetries,          // fn(graph, placement, options) -> Result<StationarySymmetries>
};
