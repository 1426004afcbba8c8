
//! Periodic graph analysis library
//!
//! This library computes barycentric placements, full symmetry groups and
//! canonical keys ("Systre keys") for crystal nets, i.e. finite quotient graphs
//! whose edges carry integer lattice translations. All computations are exact.
//!
//! ```
//! use periodic_nets::pgraph::{AnalyzedGraph, PeriodicGraph};
//!
//! let pcu = PeriodicGraph::new(vec![
//!     (1, 1, vec![1, 0, 0]),
//!     (1, 1, vec![0, 1, 0]),
//!     (1, 1, vec![0, 0, 1]),
//! ])
//! .unwrap();
//! let net = AnalyzedGraph::new(pcu);
//! assert_eq!(net.systre_key().unwrap(), "3 1 1 0 0 1 1 1 0 1 0 1 1 1 0 0");
//! ```

pub mod arithmetic;
pub mod common;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod invariant;
pub mod pgraph;
pub mod symmetries;

pub use error::NetError;
pub use interfaces::{Shift, VertexId};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, NetError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A convenience prelude for the analysis pipeline.
pub mod prelude {
    pub use crate::invariant::Invariant;
    pub use crate::pgraph::{AnalyzedGraph, Edge, PeriodicGraph, Placement};
    pub use crate::symmetries::{Automorphism, MinimalImage, StationarySymmetries, SymmetryGroup};
    pub use crate::{NetError, Result, VertexId};
}
